//! Command execution context
//!
//! Wires the configuration, session storage, response cache and API client
//! together so handlers only deal with their own endpoint calls.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::cache::CacheStorage;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{AeroCastClient, AuthApi, MockAuthClient};
use crate::config::Config;
use crate::error::Result;
use crate::router::ProtectedRoute;
use crate::session::{ActiveSession, FileStorage, SessionContext, SessionStore};

/// Shared state for one command invocation.
pub struct CommandContext {
    /// Loaded configuration with CLI/env overrides applied
    pub config: Config,
    /// Session store plus terminal notifier and navigator
    pub session: SessionContext,
    /// API client (Arc-wrapped for concurrent reads)
    pub client: Arc<AeroCastClient>,
    /// Authentication backend: the API client, or the offline mock
    pub auth: Arc<dyn AuthApi>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Build the context from global options.
    ///
    /// The response cache is attached unless `--no-cache` is given or the
    /// config disables it. A cache that fails to open is skipped with a
    /// warning.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?.with_api_base_url(opts.api_url_ref())?;
        if opts.mock {
            config.mock_auth = true;
        }

        let storage = FileStorage::open(config.session_dir()?)?;
        let session = SessionContext::terminal(SessionStore::new(Arc::new(storage)));

        let mut client = AeroCastClient::new(&config, session.clone())?;
        if config.cache.enabled && !opts.no_cache {
            let opened = match config.cache.dir {
                Some(ref dir) => CacheStorage::open_at(dir),
                None => CacheStorage::open(),
            };
            match opened {
                Ok(cache) => client = client.with_cache(cache),
                Err(e) => log::warn!("Response cache unavailable: {}", e),
            }
        }
        let client = Arc::new(client);

        let auth: Arc<dyn AuthApi> = if config.mock_auth {
            log::debug!("Using offline mock authentication");
            Arc::new(MockAuthClient::new(session.clone()).with_latency(config.mock_latency))
        } else {
            client.clone()
        };

        Ok(Self {
            config,
            session,
            client,
            auth,
            format: opts.format,
        })
    }

    /// Admit the command to a protected route or fail with the login
    /// redirect. A spinner runs while the session is checked.
    pub async fn open(&self, path: &str) -> Result<ActiveSession> {
        let mut route = ProtectedRoute::new(path);
        let spinner = spinner("Checking session...");
        route.verify(&self.session).await;
        spinner.finish_and_clear();
        route.into_session()
    }
}

/// Stderr spinner; hidden automatically when stderr is not a terminal
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
