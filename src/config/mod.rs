//! Configuration loading.
//!
//! Every key has a built-in default, so no config file is required. Layers
//! are merged in this order, later winning:
//!
//! 1. User global config (`~/.stackup/config.yml`)
//! 2. Project config (`.stackup/config.yml`)
//! 3. Local overrides (`.stackup/config.local.yml`)
//! 4. `--config <file>`
//!
//! # Example
//!
//! ```
//! use stackup::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".stackup");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "probe_timeout_secs: 3").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.probe_timeout_secs, 3);
//! ```

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{load_config, load_config_value, ConfigPaths};
pub use merger::{deep_merge, merge_layers};
pub use schema::StackupConfig;
