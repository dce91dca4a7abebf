//! CLI command implementations

pub mod activity;
pub mod auth;
pub mod challenge;
pub mod dashboard;
pub mod leaderboard;

use std::sync::Arc;

use anyhow::Result;

use ecobuddy::config::Config;
use ecobuddy::gateway::{Gateway, HttpGateway};
use ecobuddy::session::Session;

/// Shared setup for every command: configuration, gateway, session.
pub struct Context {
    pub config: Config,
    pub gateway: Arc<dyn Gateway>,
    pub session: Session,
}

impl Context {
    /// Load the config, restore the persisted session and build the
    /// gateway against the effective backend URL.
    pub fn load(api_url_override: Option<String>) -> Result<Self> {
        let mut config = Config::load()?;
        if let Some(api_url) = api_url_override {
            config.api_url = api_url;
        }

        let mut gateway = HttpGateway::new(&config.api_url);
        let session = match &config.session {
            Some(stored) => {
                gateway = gateway.with_token(&stored.token);
                Session::restored(stored.user.clone(), &stored.token)
            }
            None => Session::new(),
        };

        Ok(Self {
            config,
            gateway: Arc::new(gateway),
            session,
        })
    }
}
