use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, io::ErrorKind, path::Path};

pub const CONFIG_FILE: &str = "stub.toml";

const DEFAULT_INDEX: &str = "index.html";

/// Defaults read from `stub.toml` beside the generated pages, all optional.
#[derive(Deserialize, PartialEq, Eq, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub escape: bool,
    pub insert: bool,
    pub index: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            escape: false,
            insert: false,
            index: DEFAULT_INDEX.to_owned(),
        }
    }
}

impl Config {
    /// the config in `dir`, or the defaults if there is none
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);

        match fs::read_to_string(&path) {
            Ok(text) => toml::from_str::<Config>(&text)
                .context(format!("parse(\"{}\")", path.display())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Config::default()),
            Err(e) => Err(anyhow::Error::from(e).context(format!("read(\"{}\")", path.display()))),
        }
    }
}
