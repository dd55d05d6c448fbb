use core::fmt;
use std::str::FromStr;

use pressroom_common::ServerBase;

use crate::env;

/// Runtime configuration, read once from the values baked in at build time.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub app_env: AppEnv,
    /// Prepended to relative media URLs. Empty means same origin.
    pub server_base: ServerBase,
    /// Root of the media API, e.g. `https://api.example.com/api`.
    pub api_base: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_values(
            env::PRESSROOM_APP_ENV,
            env::PRESSROOM_SERVER_BASE,
            env::PRESSROOM_API_BASE,
        )
    }

    pub fn from_values(app_env: &str, server_base: &str, api_base: &str) -> Self {
        let app_env = AppEnv::from_str(app_env).unwrap_or_else(|e| {
            tracing::warn!("{e}, falling back to dev");
            AppEnv::Dev
        });
        let server_base = ServerBase::new(server_base);

        // A relative API base hangs off the server base.
        let api_base = if api_base.starts_with('/') && !server_base.is_same_origin() {
            format!("{}{}", server_base.as_str(), api_base)
        } else {
            api_base.to_string()
        };

        Self {
            app_env,
            server_base,
            api_base,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Dev,
    Prod,
}

impl FromStr for AppEnv {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            s => Err(format!("Invalid AppEnv: {s}")),
        }
    }
}

impl fmt::Display for AppEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppEnv::Dev => write!(f, "dev"),
            AppEnv::Prod => write!(f, "prod"),
        }
    }
}
