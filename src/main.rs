use anyhow::Result;
use clap::{Parser, Subcommand};

use llmstxt_gen::cli;

#[derive(Parser)]
#[command(name = "llmstxt-gen", version)]
#[command(about = "Generate llms.txt summaries for remote repositories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an llms.txt file for a repository
    Generate {
        /// Repository URL (e.g., https://github.com/stanfordnlp/dspy)
        repo_url: String,

        /// Output file path
        #[arg(short = 'o', long, default_value = "llms.txt")]
        output: String,

        /// Path to config file (defaults to ./llmstxt.toml or ~/.config/llmstxt-gen/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Override LLM provider (anthropic, openai, openai-compatible, gemini)
        #[arg(long)]
        provider: Option<String>,

        /// Override LLM model (e.g., "gpt-4o-mini", "claude-sonnet-4-20250514")
        #[arg(long)]
        model: Option<String>,

        /// Override base URL for OpenAI-compatible APIs
        #[arg(long)]
        base_url: Option<String>,

        /// Override max analysis retries (default: from config)
        #[arg(long)]
        max_retries: Option<usize>,

        /// Use mock LLM client for testing
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("llmstxt_gen=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            repo_url,
            output,
            config,
            provider,
            model,
            base_url,
            max_retries,
            dry_run,
        } => {
            cli::generate::run(
                repo_url,
                output,
                config,
                provider,
                model,
                base_url,
                max_retries,
                dry_run,
            )
            .await?;
        }
    }

    Ok(())
}
