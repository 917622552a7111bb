use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use insure_agents::{
    GeminiBackend, GenerationBackend, GenerationClient, ResponseComposer, DEFAULT_GEMINI_MODEL,
};
use insure_core::{
    classify_intent, normalize_text, GenerationError, GenerationRequest, OutboundMessage,
};
use insure_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "insure")]
#[command(about = "Insurance chat bot CLI: classify text and preview replies")]
struct Cli {
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Classify { text: String },
    Reply { text: String },
    Chat,
}

// Without an API key every fallback reply is the apology text.
enum CliBackend {
    Gemini(GeminiBackend),
    Offline,
}

impl GenerationBackend for CliBackend {
    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, GenerationError> {
        match self {
            Self::Gemini(backend) => backend.generate_content(request).await,
            Self::Offline => Err(GenerationError::Transport(
                "GEMINI_API_KEY is not set".to_string(),
            )),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("insure_cli");
    let cli = Cli::parse();

    match cli.command {
        Command::Classify { text } => {
            let intent = classify_intent(&normalize_text(&text));
            println!("{}", intent.as_code());
        }
        Command::Reply { text } => {
            let composer = build_composer(cli.gemini_api_key, cli.gemini_model)?;
            let text = normalize_text(&text);
            let reply = composer.compose(classify_intent(&text), &text).await;
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        Command::Chat => {
            let composer = build_composer(cli.gemini_api_key, cli.gemini_model)?;
            run_chat(composer).await?;
        }
    }

    Ok(())
}

async fn run_chat(composer: ResponseComposer<CliBackend>) -> Result<()> {
    println!("Insurance bot chat mode. type 'exit' to quit.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let message = normalize_text(&line);
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        if message.is_empty() {
            continue;
        }

        let intent = classify_intent(&message);
        let reply = composer.compose(intent, &message).await;

        println!("\n[{}]", intent.as_code());
        for outbound in &reply {
            print_message(outbound);
        }
        println!();
    }

    Ok(())
}

fn print_message(message: &OutboundMessage) {
    match message {
        OutboundMessage::Text { text, quick_reply } => {
            println!("{text}");
            if let Some(quick_reply) = quick_reply {
                println!("  options: {}", quick_reply.trigger_texts().join(" | "));
            }
        }
        OutboundMessage::Flex { alt_text, .. } => println!("[card] {alt_text}"),
    }
}

fn build_composer(api_key: Option<String>, model: String) -> Result<ResponseComposer<CliBackend>> {
    let backend = match api_key {
        Some(key) => {
            let http_client = reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(6))
                .timeout(Duration::from_secs(20))
                .build()
                .context("failed to build HTTP client")?;
            CliBackend::Gemini(GeminiBackend::new(http_client, key).with_model(model))
        }
        None => CliBackend::Offline,
    };

    let generation = GenerationClient::new(backend, AppMetrics::shared());
    Ok(ResponseComposer::new(generation))
}
