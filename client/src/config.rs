use std::{env, fmt::Display, str::FromStr, time::Duration};

use chroma_api::consts::{SETTLEMENT_GRACE_MS, TICK_MS};
use tracing::{info, warn};

use crate::error::ClientError;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// What the coordinator does after the settlement grace delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlePolicy {
    /// Poll status once.
    Fixed,
    /// Poll status until the round id moves past the settled round, at most
    /// `attempts` times, `interval` apart.
    UntilAdvanced { attempts: u32, interval: Duration },
}

impl SettlePolicy {
    pub fn until_advanced(attempts: u32, interval: Duration) -> Self {
        SettlePolicy::UntilAdvanced {
            attempts: attempts.max(1),
            interval,
        }
    }
}

impl Default for SettlePolicy {
    fn default() -> Self {
        SettlePolicy::until_advanced(5, Duration::from_secs(1))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub server_url: String,
    pub tick: Duration,
    pub settle_grace: Duration,
    pub settle_policy: SettlePolicy,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            tick: Duration::from_millis(TICK_MS),
            settle_grace: Duration::from_millis(SETTLEMENT_GRACE_MS),
            settle_policy: SettlePolicy::default(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Reads the `CHROMA_*` environment variables, falling back to defaults.
    pub fn load() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let policy: String = try_load(&lookup, "CHROMA_SETTLE_POLICY", "until-advanced")?;
        let settle_policy = match policy.as_str() {
            "fixed" => SettlePolicy::Fixed,
            "until-advanced" => SettlePolicy::until_advanced(
                try_load(&lookup, "CHROMA_SETTLE_ATTEMPTS", "5")?,
                millis(try_load(&lookup, "CHROMA_SETTLE_INTERVAL_MS", "1000")?),
            ),
            other => {
                return Err(ClientError::Config(format!(
                    "CHROMA_SETTLE_POLICY must be fixed or until-advanced, got {other}"
                )))
            }
        };

        Ok(Self {
            server_url: try_load(&lookup, "CHROMA_SERVER_URL", DEFAULT_SERVER_URL)?,
            tick: millis(try_load(&lookup, "CHROMA_TICK_MS", "1000")?),
            settle_grace: millis(try_load(&lookup, "CHROMA_SETTLE_GRACE_MS", "3000")?),
            settle_policy,
            request_timeout: millis(try_load(&lookup, "CHROMA_REQUEST_TIMEOUT_MS", "10000")?),
        })
    }

    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    pub fn with_settle_policy(mut self, settle_policy: SettlePolicy) -> Self {
        self.settle_policy = settle_policy;
        self
    }
}

fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ClientError>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        ClientError::Config(format!("{key}={raw}: {e}"))
    })
}
