//! API endpoint selection
//!
//! Release builds talk to the live API. Development runs use the dev API
//! unless `LIVE_API` or `LOCAL_API` is set.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

pub const LIVE_API: &str = "https://api.invite-tui.io";
pub const DEV_API: &str = "https://dev.api.invite-tui.io";
pub const LOCAL_API: &str = "http://localhost:3000";

/// Which backend invites are addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiTarget {
    Live,
    Dev,
    Local,
}

impl ApiTarget {
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Live => LIVE_API,
            Self::Dev => DEV_API,
            Self::Local => LOCAL_API,
        }
    }
}

impl fmt::Display for ApiTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Live => "live",
            Self::Dev => "dev",
            Self::Local => "local",
        };
        write!(f, "{name}")
    }
}

/// Inputs that decide the API target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Environment {
    pub is_dev_mode: bool,
    pub use_live_api: bool,
    pub use_local_api: bool,
}

impl Environment {
    /// Read the process environment.
    ///
    /// Debug builds count as development, as does setting `INVITE_TUI_DEV`.
    pub fn detect() -> Self {
        Self {
            is_dev_mode: cfg!(debug_assertions) || env_flag("INVITE_TUI_DEV"),
            use_live_api: env_flag("LIVE_API"),
            use_local_api: env_flag("LOCAL_API"),
        }
    }

    /// Live wins outside development or when explicitly requested; local
    /// only applies in development.
    pub fn api_target(&self) -> ApiTarget {
        if !self.is_dev_mode || self.use_live_api {
            ApiTarget::Live
        } else if self.use_local_api {
            ApiTarget::Local
        } else {
            ApiTarget::Dev
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name).is_ok_and(|value| !value.is_empty())
}
