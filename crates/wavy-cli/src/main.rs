mod campaigns;
mod creator;
mod session;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use reqwest::Url;
use tracing_subscriber::EnvFilter;
use wavy_client::{ApiClient, FileStore, MemoryNavigator, PageSettings, TokenManager};
use wavy_core::AppConfig;

use crate::campaigns::CampaignCommands;

#[derive(Debug, Parser)]
#[command(name = "wavy")]
#[command(about = "Wavy creator and brand dashboard from the command line")]
struct Cli {
    /// Origin the dashboard pages are served from
    #[arg(long, env = "WAVY_APP_URL", default_value = "http://localhost:3001")]
    app_url: Url,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the TikTok login URL
    LoginUrl {
        /// Where the backend should send the browser after login
        #[arg(long)]
        redirect_uri: Option<String>,
    },
    /// Land on a page URL: pick up and store its token, print the clean address
    Open { url: Url },
    /// Finish the OAuth redirect from a callback URL
    Callback { url: Url },
    /// List the creator's videos once
    Videos {
        /// Print the raw profile snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Follow profile processing until it completes
    Watch {
        /// Poll interval in milliseconds (overrides `WAVY_POLL_INTERVAL_MS`)
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Brand campaign management
    Campaigns {
        #[command(subcommand)]
        command: CampaignCommands,
    },
    /// End the session locally and tell the backend
    Logout,
}

/// Shared state for command handlers.
pub(crate) struct Context {
    pub(crate) settings: PageSettings,
    pub(crate) app_url: Url,
    pub(crate) client: Arc<ApiClient>,
    pub(crate) tokens: Arc<TokenManager<FileStore>>,
}

impl Context {
    fn new(config: &AppConfig, app_url: Url) -> anyhow::Result<Self> {
        let client = Arc::new(ApiClient::new(config)?);
        let tokens = Arc::new(TokenManager::new(FileStore::new(&config.session_dir)));
        Ok(Self {
            settings: PageSettings::from_config(config),
            app_url,
            client,
            tokens,
        })
    }

    /// Navigator positioned at `path` on the app origin.
    pub(crate) fn navigator_at(&self, path: &str) -> anyhow::Result<Arc<MemoryNavigator>> {
        let start = self.app_url.join(path)?;
        Ok(Arc::new(MemoryNavigator::new(start)))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = wavy_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, base_url = %config.api_base_url, "configuration loaded");
    let ctx = Context::new(&config, cli.app_url)?;

    match cli.command {
        Commands::LoginUrl { redirect_uri } => session::run_login_url(&ctx, redirect_uri.as_deref())?,
        Commands::Open { url } => session::run_open(&ctx, url),
        Commands::Callback { url } => session::run_callback(&ctx, url).await?,
        Commands::Videos { json } => creator::run_videos(&ctx, json).await?,
        Commands::Watch { interval_ms } => creator::run_watch(&ctx, interval_ms).await?,
        Commands::Campaigns { command } => campaigns::run(&ctx, command).await?,
        Commands::Logout => session::run_logout(&ctx).await,
    }

    Ok(())
}
