pub mod loader;
pub mod types;

pub use loader::{
    BASE_URL_ENV, CONFIG_PATH_ENV, ConfigError, WS_URL_ENV, load_config, load_config_from_str,
    load_default_config,
};
pub use types::{ClientConfigFile, MatchingEngineConfigJson, RestConfigJson};
