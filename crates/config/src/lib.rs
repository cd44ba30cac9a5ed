//! Configuration loading and env substitution.
//!
//! Config files: `tgpanel.toml`, `tgpanel.yaml` or `tgpanel.json`.
//! Searched in `./` then `~/.config/tgpanel/`.
//!
//! Supports `${ENV_VAR}` and `${ENV_VAR:-default}` substitution in the raw
//! file before parsing.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{
        config_dir, data_dir, discover_and_load, find_config_file, load_config, set_config_dir,
    },
    schema::{PanelsConfig, SessionsConfig, TelegramConfig, TgPanelConfig},
};
