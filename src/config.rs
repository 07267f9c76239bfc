//! Layered settings for the converter.
//!
//! Sources, later ones winning:
//! 1. the built-in `Config.toml`
//! 2. a `Config.toml` next to the executable, if present
//! 3. an explicit file given by the caller (`--config`)
//! 4. `CSV2WIKI_*` environment variables, e.g. `CSV2WIKI_SPLITTER=quoted`

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::{env, path::Path};
use tracing::debug;

use crate::converter::csv2rows::Splitter;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub table_class: String,
    pub splitter: Splitter,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../Config.toml"),
            FileFormat::Toml,
        ));

        if let Ok(exe_path) = env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            let external = dir.join("Config.toml");
            if external.is_file() {
                debug!(path = %external.display(), "loading config next to executable");
                builder = builder.add_source(File::from(external).required(false));
            }
        }

        if let Some(path) = config_path {
            debug!(path = %path.display(), "loading config file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(Environment::with_prefix("CSV2WIKI"));

        builder.build()?.try_deserialize()
    }
}
