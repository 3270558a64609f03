use anyhow::Result;
use clap::{Parser, Subcommand};
use quizchat::ai::GeminiChatClient;
use quizchat::chat::{Composer, HttpGatewayClient, PayloadMode};
use quizchat::models::{Config, Difficulty, Language, Level, QuestionType, QuizParameters, Role};
use quizchat::server::{self, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "quizchat")]
#[command(about = "Quiz question chat backed by Gemini")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP gateway and browser chat page.
    Serve {
        /// Address to listen on. Overrides LISTEN_ADDR.
        #[arg(long, value_name = "ADDR")]
        listen: Option<SocketAddr>,
    },
    /// Chat with a running gateway from the terminal, one question per line.
    Chat(ChatArgs),
}

#[derive(Debug, clap::Args)]
struct ChatArgs {
    /// Gateway base URL. Overrides QUIZCHAT_URL.
    #[arg(long)]
    url: Option<String>,

    #[arg(long, value_enum)]
    language: Option<Language>,

    #[arg(long, value_enum)]
    level: Option<Level>,

    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    #[arg(long = "question-type", value_enum)]
    question_type: Option<QuestionType>,

    /// Number of questions to ask for.
    #[arg(long)]
    count: Option<u32>,

    /// Send the framed instruction instead of the raw question.
    #[arg(long)]
    send_instruction: bool,
}

impl ChatArgs {
    fn parameters(&self) -> QuizParameters {
        QuizParameters {
            language: self.language,
            level: self.level,
            difficulty: self.difficulty,
            question_type: self.question_type,
            count: self.count,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quizchat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    let config = Config::from_env()?;

    match args.command {
        Command::Serve { listen } => run_server(config, listen).await,
        Command::Chat(chat_args) => run_chat(config, chat_args).await,
    }
}

async fn run_server(config: Config, listen: Option<SocketAddr>) -> Result<()> {
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; chat requests will fail");
    }

    let completion = GeminiChatClient::from_config(&config);
    info!("Completion provider: Gemini (model: {})", completion.model());

    let state = AppState::new(Arc::new(completion));
    server::serve(listen.unwrap_or(config.listen_addr), state).await?;
    Ok(())
}

async fn run_chat(config: Config, args: ChatArgs) -> Result<()> {
    let url = args.url.clone().unwrap_or(config.gateway_url);
    info!("Chatting with gateway at {}", url);

    let mode = if args.send_instruction {
        PayloadMode::Instruction
    } else {
        PayloadMode::RawInput
    };
    let mut composer = Composer::new(HttpGatewayClient::new(url))
        .with_parameters(args.parameters())
        .with_payload_mode(mode);

    let mut printed = 0;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        composer.set_input(line);
        if !composer.submit().await {
            continue;
        }

        for message in &composer.transcript()[printed..] {
            let prefix = match message.role {
                Role::User => "you",
                Role::Bot => "bot",
            };
            println!("{}> {}", prefix, message.content);
        }
        printed = composer.transcript().len();
    }

    Ok(())
}
