//! # Client settings
//!
//! Layered configuration for talking to the backend. Sources, lowest priority first:
//!
//! 1. built-in defaults,
//! 2. an optional `taskdeck.toml` in the working directory,
//! 3. environment variables, split on `_` (`SUPABASE_URL` → `supabase.url`).
//!
//! A `.env` file is loaded into the environment first, so local development can
//! keep `SUPABASE_URL` / `SUPABASE_KEY` there.
//!
//! ```toml
//! [supabase]
//! url = "https://xyzcompany.supabase.co/rest/v1"
//! key = "public-anon-key"
//!
//! [http]
//! timeout = 30   # seconds
//! ```

use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct Supabase {
    pub url: String,
    pub key: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Http {
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

impl Default for Http {
    fn default() -> Self {
        Self { timeout: 30 }
    }
}

impl Http {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct Settings {
    pub supabase: Supabase,
    pub http: Http,
}

impl Settings {
    /// Well-known name of the optional settings file.
    pub const FILE_NAME: &'static str = "taskdeck.toml";

    /// Load settings from defaults, `taskdeck.toml`, and the environment.
    pub fn new() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("supabase.url", "")?
            .set_default("supabase.key", "")?
            .set_default("http.timeout", 30)?
            .add_source(
                File::with_name(Self::FILE_NAME)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().separator("_"))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a TOML string (no environment overlay).
    pub fn from_toml(s: &str) -> Result<Self> {
        let config = Config::builder()
            .set_default("http.timeout", 30)?
            .add_source(File::from_str(s, FileFormat::Toml))
            .build()?;
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that cannot reach a backend.
    pub fn validate(&self) -> Result<()> {
        if self.supabase.url.trim().is_empty() {
            return Err(Error::Config("SUPABASE_URL not set".into()));
        }
        if self.supabase.key.trim().is_empty() {
            return Err(Error::Config("SUPABASE_KEY not set".into()));
        }
        Ok(())
    }
}
