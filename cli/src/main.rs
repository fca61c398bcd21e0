use std::io::{self, Write};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

const RULE_WIDTH: usize = 60;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {body}")]
    ServerError { status: u16, body: String },
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
    #[error("question is empty")]
    EmptyQuestion,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "insight-cli", about = "Terminal chat client for the Insight query service")]
struct Cli {
    #[arg(long, env = "INSIGHT_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    #[arg(long, env = "INSIGHT_TIMEOUT_SECS", default_value_t = 120)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Interactive session (the default).
    Chat,
    /// Ask one question and print the answer.
    Ask { question: Vec<String> },
}

/// One line of user input, classified.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Skip,
    Exit,
    Query(&'a str),
}

struct QueryClient {
    http: reqwest::Client,
    base_url: String,
}

impl QueryClient {
    fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CliError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    async fn ask(&self, question: &str) -> Result<String, CliError> {
        let response = self
            .http
            .post(endpoint(&self.base_url, "/query"))
            .json(&serde_json::json!({ "query": question }))
            .send()
            .await?;
        let status = response.status().as_u16();
        let value = response.json::<Value>().await.unwrap_or(Value::Null);
        extract_answer(status, &value)
    }

    async fn ping(&self) -> Result<(), CliError> {
        let response = self.http.get(endpoint(&self.base_url, "/healthz")).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CliError::ServerError { status: status.as_u16(), body: "health check failed".to_owned() });
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let client = QueryClient::new(&cli.base_url, cli.timeout_secs)?;

    match cli.command.unwrap_or(Command::Chat) {
        Command::Ping => {
            client.ping().await?;
            println!("ok");
            Ok(())
        }
        Command::Ask { question } => {
            let question = question.join(" ");
            let Input::Query(question) = classify_input(&question) else {
                return Err(CliError::EmptyQuestion);
            };
            let answer = client.ask(question).await?;
            println!("{}", rewrite_references(&answer, &client.base_url));
            Ok(())
        }
        Command::Chat => run_chat(&client).await,
    }
}

async fn run_chat(client: &QueryClient) -> Result<(), CliError> {
    print_banner(&client.base_url);
    let lines = BufReader::new(tokio::io::stdin()).lines();
    chat_loop(client, lines, tokio::signal::ctrl_c()).await
}

/// Prompt/answer loop. `interrupt` ends the session at any point, including
/// while a query is in flight.
async fn chat_loop<R>(
    client: &QueryClient,
    mut lines: Lines<R>,
    interrupt: impl Future<Output = io::Result<()>>,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
{
    tokio::pin!(interrupt);
    loop {
        print!("{} ", "ASK ME ANYTHING:".blue().bold());
        io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut interrupt => None,
        };
        let Some(line) = line else {
            print_goodbye();
            return Ok(());
        };

        match classify_input(&line) {
            Input::Skip => {}
            Input::Exit => {
                println!("\n{}", "Exiting... Have a great day!".magenta().bold());
                return Ok(());
            }
            Input::Query(question) => {
                println!("{}", "Searching enterprise intelligence...".bright_black().italic());
                let reply = tokio::select! {
                    reply = client.ask(question) => reply,
                    _ = &mut interrupt => {
                        print_goodbye();
                        return Ok(());
                    }
                };
                match reply {
                    Ok(answer) => {
                        println!("{}", rule());
                        println!("{}", rewrite_references(&answer, &client.base_url));
                        println!("{}\n", rule());
                    }
                    Err(e) => eprintln!("\n{}", format!("An error occurred: {e}").red().bold()),
                }
            }
        }
    }
}

fn print_banner(base_url: &str) {
    let bar = "=".repeat(RULE_WIDTH);
    println!("{}", bar.cyan().bold());
    println!("{}", "      INSIGHT AI - INTELLIGENT RAG TERMINAL".cyan().bold());
    println!("{}", bar.cyan().bold());
    println!("\n{} {}", "Connected to".green().bold(), base_url);
    println!("{}", "(Ask about employees, clients, IT tickets, revenue, or company policies)".bright_black());
    println!("Type {} to close the session.\n", "'exit'".red().bold());
}

fn print_goodbye() {
    println!("\n\n{}", "Goodbye!".magenta().bold());
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH).blue().to_string()
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn classify_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Skip;
    }
    if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        return Input::Exit;
    }
    Input::Query(trimmed)
}

/// Pull `answer` out of a `/query` response body.
///
/// Any status is accepted when the body carries an answer: the service
/// reports its own errors that way.
fn extract_answer(status: u16, value: &Value) -> Result<String, CliError> {
    if let Some(answer) = value.get("answer").and_then(Value::as_str) {
        return Ok(answer.to_owned());
    }
    if (200..300).contains(&status) {
        return Err(CliError::MissingField("answer"));
    }
    Err(CliError::ServerError { status, body: value.to_string() })
}

/// Rewrite `[[name]]` source references as `name (<base>/view_source/name)`.
///
/// Names are non-empty and never span a line break; anything else is left
/// as typed.
fn rewrite_references(answer: &str, base_url: &str) -> String {
    let mut out = String::with_capacity(answer.len());
    let mut rest = answer;
    while let Some(start) = rest.find("[[") {
        out.push_str(&rest[..start]);
        let candidate = &rest[start + 2..];
        match candidate.find("]]") {
            Some(end) if end > 0 && !candidate[..end].contains(['\n', '\r']) => {
                let name = &candidate[..end];
                out.push_str(&format!("{name} ({})", endpoint(base_url, &format!("/view_source/{name}"))));
                rest = &candidate[end + 2..];
            }
            _ => {
                out.push('[');
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
