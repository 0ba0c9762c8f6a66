mod bedrock;
mod cli;
mod config;
mod error;
mod session;
mod ui;

use std::io::{BufRead, Write};
use std::path::Path;

use clap::Parser;
use console::Style;

use bedrock::{AgentClient, AgentInvoker, InvokeAgentRequest};
use cli::{Cli, Command};
use config::ChatConfig;
use session::{Role, Session};
use ui::TurnProgress;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = ChatConfig::load()?;
    config.apply_cli(&cli);
    config.validate()?;

    match cli.command {
        Command::Ask { prompt } => run_ask(&config, prompt, cli.verbose).await,
        Command::Chat { export } => run_chat(&config, export, cli.verbose).await,
        Command::Status => {
            print_status(&config);
            Ok(())
        }
    }
}

/// One-shot invocation: fresh session, one request, print the outcome.
///
/// Classified API errors are printed as diagnostics and the process still
/// exits normally — the call is terminal either way, nothing is retried.
async fn run_ask(config: &ChatConfig, prompt: Option<String>, verbose: bool) -> anyhow::Result<()> {
    let input = prompt.unwrap_or_else(|| config.default_prompt.clone());
    let session = Session::new();

    let progress = TurnProgress::start("Invoking agent...");
    match AgentClient::from_env(&config.region).await {
        Ok(client) => {
            let req = request_for(config, &session.id, &input);
            match client.invoke(&req).await {
                Ok(response) => progress.complete_ok(&response, verbose),
                Err(err) => progress.complete_err(&err),
            }
        }
        Err(err) => progress.complete_err(&err),
    }
    Ok(())
}

/// Interactive loop: one session identifier shared across turns, so the
/// service keeps the multi-turn context. Errors are shown and the loop
/// continues; `exit`, `quit` or EOF ends it.
async fn run_chat(config: &ChatConfig, export: Option<String>, verbose: bool) -> anyhow::Result<()> {
    let client = match AgentClient::from_env(&config.region).await {
        Ok(client) => client,
        Err(err) => {
            ui::print_failure(&err);
            return Ok(());
        }
    };

    let mut session = Session::new();
    let dim = Style::new().dim();
    println!(
        "Chatting with agent {} (alias {}) in {}",
        config.agent_id, config.agent_alias_id, config.region
    );
    println!(
        "{}",
        dim.apply_to(format!("session {} — type \"exit\" to quit", session.id))
    );

    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "exit" || input == "quit" {
            break;
        }

        chat_turn(&client, config, &mut session, input, verbose).await;
    }

    if let Some(path) = export {
        session.export(Path::new(&path))?;
        println!("Transcript exported to {path}");
    }
    Ok(())
}

/// One conversation turn against any invoker (mockable in tests).
async fn chat_turn(
    client: &impl AgentInvoker,
    config: &ChatConfig,
    session: &mut Session,
    input: &str,
    verbose: bool,
) {
    session.record(Role::User, input);
    let req = request_for(config, &session.id, input);

    let progress = TurnProgress::start("Agent is thinking...");
    match client.invoke(&req).await {
        Ok(response) => {
            let text = response.body_text().into_owned();
            progress.complete_ok(&response, verbose);
            session.record(Role::Agent, text);
        }
        Err(err) => progress.complete_err(&err),
    }
}

fn request_for(config: &ChatConfig, session_id: &str, input: &str) -> InvokeAgentRequest {
    InvokeAgentRequest {
        agent_id: config.agent_id.clone(),
        agent_alias_id: config.agent_alias_id.clone(),
        session_id: session_id.to_string(),
        input_text: input.to_string(),
    }
}

fn print_status(config: &ChatConfig) {
    println!("agent id:       {}", config.agent_id);
    println!("alias id:       {}", config.agent_alias_id);
    println!("region:         {}", config.region);
    println!("default prompt: {}", config.default_prompt);
}
