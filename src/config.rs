use std::env;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
pub struct Config {
    /// Session cookie authorizing requests to the Stacker News GraphQL API.
    pub sn_auth_cookie: String,
    /// Discord webhook URL that receives activity and error embeds.
    pub discord_webhook: String,
    /// Stacker News base URL (defaults to https://stacker.news).
    pub sn_url: String,
    /// Hacker News Firebase API base URL, overridable for testing.
    pub hn_firebase_url: String,
    /// Territory (sub) that cross-posts are published to.
    pub sn_sub: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Only the base URLs and the territory have defaults. The auth
    /// cookie and webhook are required for anything that talks to the
    /// outside world, enforced by the `require_*` guards below.
    pub fn load() -> Result<Self> {
        Ok(Self {
            sn_auth_cookie: env::var("SN_AUTH_COOKIE").unwrap_or_default(),
            discord_webhook: env::var("DISCORD_WEBHOOK").unwrap_or_default(),
            sn_url: env::var("SN_URL")
                .unwrap_or_else(|_| crate::sn::client::DEFAULT_SN_URL.to_string()),
            hn_firebase_url: env::var("HN_FIREBASE_URL")
                .unwrap_or_else(|_| crate::hn::DEFAULT_FIREBASE_URL.to_string()),
            sn_sub: env::var("SN_SUB").unwrap_or_else(|_| "tech".to_string()),
        })
    }

    /// Check that the Stacker News session cookie is configured.
    /// Call this before any operation that hits the SN GraphQL API.
    pub fn require_sn(&self) -> Result<()> {
        if self.sn_auth_cookie.is_empty() {
            anyhow::bail!(
                "SN_AUTH_COOKIE not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }

    /// Check that the Discord webhook is configured.
    /// Every post, dupe conflict and error is mirrored to this channel.
    pub fn require_discord(&self) -> Result<()> {
        if self.discord_webhook.is_empty() {
            anyhow::bail!(
                "DISCORD_WEBHOOK not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}
