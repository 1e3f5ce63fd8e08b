//! siteproof operator console.
//!
//! An interactive shell over the siteproof API: the same navigation rules
//! and screens as the web dashboard, driven from a prompt. `cd /demo`
//! switches everything (routing, credentials, data partition) to the
//! demo side.

mod commands;
mod config;
mod render;
mod screen;
mod shell;

use anyhow::Context;
use clap::Parser;
use config::ConsoleConfig;
use rustyline::error::ReadlineError;
use shell::Shell;
use siteproof_client::{ApiClient, StaticTokenSource};
use siteproof_session::SessionStore;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ConsoleConfig::parse();
    tracing::debug!(api_url = %config.api_url, state_file = %config.state_file.display(), "console configured");
    let store = SessionStore::open(&config.state_file);
    let mut client = ApiClient::new(&config.api_url)
        .with_context(|| format!("invalid API url: {}", config.api_url))?;
    if let Some(token) = &config.id_token {
        client = client.with_token_source(Arc::new(StaticTokenSource::new(token.clone())));
    }

    let mut shell = Shell::new(store, config.start_path.clone());
    println!("siteproof console: `help` lists commands, `ls` shows your screens");

    let mut editor = rustyline::DefaultEditor::new().context("could not start line editor")?;
    loop {
        let prompt = format!("siteproof:{}> ", shell.path());
        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                match commands::run(&mut shell, &client, line).await {
                    Ok(ControlFlow::Continue(())) => {}
                    Ok(ControlFlow::Break(())) => break,
                    Err(err) => render::error_banner(&format!("{err:#}")),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                render::error_banner(&format!("input error: {err}"));
                break;
            }
        }
    }
    Ok(())
}
