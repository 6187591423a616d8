//! Purge command - authenticate, resolve the user, remove every membership

use std::process::ExitCode;

use clap::Args;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::domain::{DirectoryError, PrincipalName, RunSummary, Sweeper};
use crate::infrastructure::graph::{Credentials, GraphDirectory, TokenClient};
use crate::infrastructure::http_client::HttpClient;
use crate::infrastructure::logging;

const CLIENT_SECRET_ENV: &str = "GROUPSWEEP_CLIENT_SECRET";

// Exit codes: all removed / one or more removal failures / fatal error
const EXIT_OK: u8 = 0;
const EXIT_PARTIAL: u8 = 1;
const EXIT_FATAL: u8 = 2;

#[derive(Args, Debug)]
pub struct PurgeArgs {
    /// Principal name of the user to sweep (e.g. alice@example.com)
    #[arg(long)]
    pub user: String,

    /// Directory tenant identifier
    #[arg(long)]
    pub tenant_id: String,

    /// Application (client) identifier
    #[arg(long)]
    pub client_id: String,

    /// Client secret; falls back to the GROUPSWEEP_CLIENT_SECRET environment
    /// variable so it does not have to appear on the command line
    #[arg(long)]
    pub client_secret: Option<String>,
}

/// Run the purge workflow and map its result to an exit code
pub async fn run(args: PurgeArgs) -> ExitCode {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    match purge(args, &config).await {
        Ok(summary) if summary.all_removed() => ExitCode::from(EXIT_OK),
        Ok(_) => ExitCode::from(EXIT_PARTIAL),
        Err(fatal) => {
            error!("{}", fatal);
            ExitCode::from(EXIT_FATAL)
        }
    }
}

async fn purge(args: PurgeArgs, config: &AppConfig) -> anyhow::Result<RunSummary> {
    let principal = PrincipalName::new(args.user.as_str())?;

    let secret = args
        .client_secret
        .or_else(|| std::env::var(CLIENT_SECRET_ENV).ok())
        .ok_or_else(|| {
            DirectoryError::configuration(format!(
                "client secret missing: pass --client-secret or set {}",
                CLIENT_SECRET_ENV
            ))
        })?;
    let credentials = Credentials::new(args.tenant_id, args.client_id, secret)?;

    let endpoints = config.graph_endpoints();
    let http = HttpClient::with_timeout(config.http_timeout())?;
    let retry = config.retry_policy();

    info!("Authenticating against tenant {}", credentials.tenant_id());
    let token_client = TokenClient::new(&http, &endpoints);
    let session = retry
        .run("session establishment", || {
            token_client.acquire(&credentials)
        })
        .await?;

    let directory = GraphDirectory::new(http, &endpoints, session);
    let sweeper = Sweeper::new(config.sweep_config());

    Ok(sweeper.run(&directory, &principal).await?)
}
