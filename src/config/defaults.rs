use super::{ApiConfig, Config, InputConfig, LogConfig, PathsConfig, PlayerConfig, SearchConfig, UiConfig};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const BASE_URL: &str = "http://127.0.0.1:5000";
pub const TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = "Lyrebird/0.1.0";
pub const RECENT_LIMIT: usize = 5;
pub const PAGE_SIZE: usize = 12;

pub fn data_dir() -> PathBuf {
    ProjectDirs::from("dev", "lyrebird", "lyrebird")
        .map(|p| p.data_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("lyrebird"))
}

pub fn defaults() -> Config {
    Config {
        api: ApiConfig::default(),
        paths: PathsConfig::default(),
        search: SearchConfig::default(),
        ui: UiConfig::default(),
        input: InputConfig::default(),
        player: PlayerConfig::default(),
        log: LogConfig::default(),
    }
}
