//! Marquee Runner - terminal front end
//!
//! Stands in for the mobile screens: loads the inventory snapshot set and
//! renders one card per event, and turns a purchase action into a call on
//! the purchase channel.
//!
//! - **Command**: argument parsing for `events` and `buy`
//! - **Render**: event cards, the empty state and purchase outcomes
//! - **Notifier**: user-visible alerts on stderr

pub mod command;
pub mod render;

pub use command::{Command, CommandError, USAGE};
pub use render::{
    EMPTY_STATE, StderrNotifier, render_event_card, render_events, render_outcome,
};

use marquee_client::config::CONFIG_PATH_ENV;
use marquee_client::{ClientConfigFile, ConfigError, load_config, load_default_config};

/// Config from `MARQUEE_CONFIG` (or the embedded default), with env overrides
pub fn load_client_config() -> Result<ClientConfigFile, ConfigError> {
    let file = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => {
            tracing::info!("Loading config from {}", path);
            load_config(path)?
        }
        Err(_) => load_default_config()?,
    };
    file.apply_env_overrides()
}
