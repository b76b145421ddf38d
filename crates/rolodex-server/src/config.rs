//! Runtime server configuration, deserialised from `config.toml` with
//! `ROLODEX_`-prefixed environment overrides layered on top.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rolodex_core::list::OnListDelete;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,

  #[serde(default = "default_port")]
  pub port: u16,

  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,

  /// What happens to a list's contacts when the list is deleted:
  /// `restrict`, `cascade`, or `set-null`.
  #[serde(default)]
  pub on_list_delete: OnListDelete,
}

impl ServerConfig {
  /// Read `path` (if it exists) and layer `ROLODEX_*` environment
  /// variables on top.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("ROLODEX"))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("rolodex.db") }
