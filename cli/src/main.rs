use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tracing::debug;

use trip_core::{ApiClient, FileStore, SessionContext};

mod app;
mod cli;
mod config;
mod logging;
mod output;
mod views;

use crate::app::{report, App};
use crate::cli::{Args, Command};
use crate::config::{resolve_config, save_api_url, ResolvedConfig};
use crate::logging::init_logging;
use crate::output::print_usage_instructions;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let resolved = match resolve_config(args.config.as_deref(), args.api_url.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => {
            init_logging(None, args.verbose);
            report(Err(e));
            std::process::exit(1);
        }
    };
    init_logging(resolved.config.log_level.as_deref(), args.verbose);

    let Some(command) = args.command else {
        print_usage_instructions();
        return;
    };

    if !report(run(command, resolved).await) {
        std::process::exit(1);
    }
}

async fn run(command: Command, resolved: ResolvedConfig) -> Result<()> {
    if let Command::Config { set_api_url } = &command {
        return show_config(&resolved, set_api_url.as_deref());
    }

    let data_dir = resolved.config.data_dir()?;
    debug!("Using data directory {}", data_dir.display());

    let session = SessionContext::from_store(FileStore::new(data_dir));
    let client = ApiClient::new(&resolved.config, session)
        .context("Failed to initialize the API client")?;
    let app = App::new(resolved.config, client);

    match command {
        Command::Plan {
            destination,
            days,
            budget,
        } => app.plan(&destination, days, budget).await,
        Command::Recent { limit } => app.recent(limit).await,
        Command::Destinations => app.destinations().await,
        Command::Dashboard => app.dashboard().await,
        Command::Trip { id } => app.trip(id).await,
        Command::Saved { clear } => app.saved(clear).await,
        Command::Chat {
            message,
            interactive,
        } => match (message, interactive) {
            (_, true) => app.chat_interactive().await,
            (Some(message), false) => app.chat_once(&message).await,
            (None, false) => Err(anyhow::anyhow!(
                "Provide a message or use --interactive"
            )),
        },
        Command::Flights {
            from,
            to,
            depart,
            return_date,
        } => app.flights(&from, &to, &depart, return_date).await,
        Command::Hotels {
            location,
            check_in,
            check_out,
            guests,
        } => app.hotels(&location, &check_in, &check_out, guests).await,
        Command::Register {
            email,
            username,
            full_name,
        } => app.register(&email, &username, full_name.as_deref()).await,
        Command::Login { username } => app.login(&username).await,
        Command::Logout => app.logout().await,
        Command::Me => app.me().await,
        Command::Config { .. } => Ok(()),
    }
}

fn show_config(resolved: &ResolvedConfig, set_api_url: Option<&str>) -> Result<()> {
    if let Some(url) = set_api_url {
        save_api_url(&resolved.path, url)?;
        println!("{} {}", "Saved API URL:".green(), url.trim_end_matches('/'));
        return Ok(());
    }

    let config = &resolved.config;
    println!("{}", "Configuration".cyan().bold());
    println!("  file:             {}", resolved.path.display());
    println!("  api_url:          {}", config.base_url());
    println!("  timeout:          {}s", config.timeout().as_secs());
    println!("  recent_limit:     {}", config.recent_limit());
    println!(
        "  follow_up_delay:  {}ms",
        config.follow_up_delay().as_millis()
    );
    match config.data_dir() {
        Ok(dir) => println!("  data_dir:         {}", dir.display()),
        Err(e) => println!("  data_dir:         {}", e.to_string().red()),
    }
    Ok(())
}
