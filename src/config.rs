use ::config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

const CONFIG_FILE: &str = "contact_cleaner";
const ENV_PREFIX: &str = "CONTACTS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Drop later records sharing a phone or email.
    pub dedupe: bool,
    /// Drop records with neither phone nor email after cleaning.
    pub require_contact: bool,
    /// Records per parallel cleaning chunk in the CLI batch path.
    pub chunk_size: usize,
    pub preview_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dedupe: true,
            require_contact: false,
            chunk_size: 500,
            preview_rows: 10,
        }
    }
}

impl Settings {
    /// Defaults, then `contact_cleaner.toml` if present, then `CONTACTS_*`
    /// environment variables.
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name(CONFIG_FILE).required(false))
                .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)),
        )
    }

    fn from_builder(
        builder: ::config::ConfigBuilder<::config::builder::DefaultState>,
    ) -> Result<Self> {
        let defaults = Settings::default();
        let settings = builder
            .set_default("dedupe", defaults.dedupe)?
            .set_default("require_contact", defaults.require_contact)?
            .set_default("chunk_size", defaults.chunk_size as u64)?
            .set_default("preview_rows", defaults.preview_rows as u64)?
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(Settings {
            chunk_size: settings.chunk_size.max(1),
            ..settings
        })
    }
}
