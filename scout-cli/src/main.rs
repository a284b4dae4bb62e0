#![allow(dead_code, unused_imports, unused_variables, unused_mut)]

use clap::{Parser, Subcommand};
use colored::Colorize;
use scout_core::{CliErrorDisplay, ScoutError};
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

use commands::{handle_agents_command, handle_chat_command, handle_prices_command, PricesCommand};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Parser)]
#[command(name = "scout")]
#[command(version = VERSION)]
#[command(about = "Sonic Scout - chat with the DeFi assistant from your terminal")]
#[command(long_about = r#"
Sonic Scout is a terminal client for the Sonic Scout DeFi assistant. It
discovers the remote agent, opens a chat session, and keeps an eye on the
market with live token prices.

Use 'scout chat' to start a conversation, 'scout agents' to inspect the agent
directory, and 'scout prices' for the featured token quotes.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start an interactive chat session with the assistant")]
    Chat {
        #[arg(short, long, help = "Address a specific agent id instead of the first directory entry")]
        agent: Option<String>,
    },

    #[command(about = "List the agents known to the directory")]
    Agents {
        #[arg(
            short,
            long,
            default_value = "text",
            help = "Output format (text, json)"
        )]
        format: String,
    },

    #[command(about = "Show featured token prices")]
    Prices {
        #[command(subcommand)]
        action: Option<PricesCommand>,
    },

    #[command(about = "Show version information")]
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ScoutError>() {
                Some(scout_err) => {
                    eprintln!("{}: {}", "Error".red().bold(), CliErrorDisplay::new(scout_err))
                }
                None => eprintln!("{}: {}", "Error".red().bold(), e),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Chat { agent } => handle_chat_command(agent).await,
        Commands::Agents { format } => handle_agents_command(&format).await,
        Commands::Prices { action } => handle_prices_command(action).await,
        Commands::Version => {
            println!("{} {}", NAME, VERSION);
            Ok(())
        }
    }
}
