//! Process configuration from environment variables and an optional `.env`.
//!
//! `RARITY_PROFILE` selects a profile (e.g. `STAGING`). With a profile set,
//! each key is looked up as `{PROFILE}_{KEY}` before the bare `{KEY}`.
//!
//! | key               | default | meaning                                   |
//! |-------------------|---------|-------------------------------------------|
//! | `RULES_DIR`       | unset   | rule document directory, unset = built-in |
//! | `RULES_STRICT`    | false   | fail on any rule file that does not load  |
//! | `RARITY_LOG`      | `info`  | log filter when `RUST_LOG` is unset       |
//! | `RARITY_LOG_ANSI` | true    | colored log output                        |

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load `.env` from the working directory if there is one.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
}

/// Key lookup scoped to one profile.
struct ProfileEnv<'a> {
    profile: &'a str,
}

impl ProfileEnv<'_> {
    fn raw(key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.is_empty())
    }

    fn get(&self, key: &str) -> Option<String> {
        if self.profile.is_empty() {
            return Self::raw(key);
        }
        Self::raw(&format!("{}_{key}", self.profile)).or_else(|| Self::raw(key))
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
            None => default,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upper-cased profile name, empty for the default profile.
    pub profile: String,
    pub rules: RulesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    pub rules_dir: Option<PathBuf>,
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    pub ansi: bool,
}

impl Config {
    /// Read the profile from `RARITY_PROFILE`, then everything else.
    /// Call [`load_dotenv`] first if `.env` should be honored.
    pub fn from_env() -> Self {
        Self::for_profile(&env::var("RARITY_PROFILE").unwrap_or_default())
    }

    pub fn for_profile(profile: &str) -> Self {
        let profile = profile.trim().to_uppercase();
        let vars = ProfileEnv { profile: &profile };

        let rules = RulesConfig {
            rules_dir: vars.get("RULES_DIR").map(PathBuf::from),
            strict: vars.flag("RULES_STRICT", false),
        };
        let logging = LoggingConfig {
            filter: vars.string("RARITY_LOG", "info"),
            ansi: vars.flag("RARITY_LOG_ANSI", true),
        };

        Self {
            profile,
            rules,
            logging,
        }
    }

    pub fn profile_label(&self) -> &str {
        match self.profile.as_str() {
            "" => "default",
            p => p,
        }
    }

    /// One startup line per section.
    pub fn log_summary(&self) {
        tracing::info!(profile = self.profile_label(), "configuration loaded");
        match &self.rules.rules_dir {
            Some(dir) => tracing::info!(dir = %dir.display(), strict = self.rules.strict, "rules from directory"),
            None => tracing::info!("rules: built-in defaults"),
        }
        tracing::info!(filter = %self.logging.filter, ansi = self.logging.ansi, "logging");
    }
}
