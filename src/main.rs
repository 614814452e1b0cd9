// src/main.rs — heyme entry point

use clap::Parser;

use heyme::cli::{account, chat, docs, groups, Cli, CliContext, Commands};
use heyme::infra::config::Config;
use heyme::infra::{logger, paths};

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    paths::ensure_dirs().await?;

    let ctx = CliContext::new(config);
    ctx.session.init().await;

    match cli.command {
        Commands::Login { email, google } => account::run_login(&ctx, email, google).await,
        Commands::Signup { email, name } => account::run_signup(&ctx, email, name).await,
        Commands::Logout => account::run_logout(&ctx),
        Commands::Whoami { verify } => account::run_whoami(&ctx, verify).await,
        Commands::Docs { action } => docs::run_docs(&ctx, action).await,
        Commands::Groups { action } => groups::run_groups(&ctx, action).await,
        Commands::Ask {
            question,
            group,
            top_k,
        } => chat::run_ask(&ctx, &question.join(" "), group, top_k).await,
        Commands::Chat { group } => chat::run_chat(&ctx, group).await,
        Commands::Share { group, list } => chat::run_share(&ctx, group, list).await,
    }
}
