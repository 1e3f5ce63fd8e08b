//! Console configuration.

use clap::Parser;
use std::path::PathBuf;

/// Operator console for the siteproof inspection workflow.
///
/// Navigate the dashboard with `cd`, inspect the sidebar with `ls`, and run
/// the current screen's operations (`list`, `get`, `create`, ...). Paths
/// under `/demo` talk to the demo data partition with a locally chosen
/// role; everything else is live and authenticated.
#[derive(Debug, Parser)]
#[command(name = "siteproof-console", version)]
pub struct ConsoleConfig {
    /// Origin of the siteproof API.
    #[arg(long, env = "SITEPROOF_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Where the local session state lives (the browser-storage analog).
    #[arg(long, env = "SITEPROOF_STATE_FILE", default_value = ".siteproof/session.json")]
    pub state_file: PathBuf,

    /// Bearer token for live-mode calls, as issued by the identity
    /// provider. Optional: without it live calls go out anonymous.
    #[arg(long, env = "SITEPROOF_ID_TOKEN", hide_env_values = true)]
    pub id_token: Option<String>,

    /// Path to start on.
    #[arg(long, default_value = "/dashboard")]
    pub start_path: String,
}
