use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub paths: PathsConfig,
    pub search: SearchConfig,
    pub ui: UiConfig,
    pub input: InputConfig,
    pub player: PlayerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the lyrics backend (search, lyrics, translate, explain).
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
}

/// How concurrent artist searches are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrdering {
    /// Every response is applied in completion order; the last one to arrive wins.
    #[default]
    LastResolved,
    /// Responses older than the most recently issued search are dropped.
    LatestIssued,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub ordering: SearchOrdering,
    /// Maximum number of recent searches kept on disk.
    pub recent_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Cards revealed per "load more" step.
    pub page_size: usize,
    /// Artist searched when the app was last closed.
    pub last_artist: Option<String>,
    /// Re-run `last_artist` on startup.
    pub restore_last_artist: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mouse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// mpv audio device name (see `mpv --audio-device=help`)
    pub audio_device: Option<String>,
    /// Preview volume (0-100)
    pub preview_volume: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        defaults::defaults()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            timeout_secs: defaults::TIMEOUT_SECS,
            user_agent: defaults::USER_AGENT.to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: defaults::data_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ordering: SearchOrdering::default(),
            recent_limit: defaults::RECENT_LIMIT,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::PAGE_SIZE,
            last_artist: None,
            restore_last_artist: false,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { mouse: true }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            audio_device: None,
            preview_volume: 70,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn database_path(&self) -> PathBuf {
        self.paths.data_dir.join("lyrebird.sqlite3")
    }

    pub fn log_path(&self) -> PathBuf {
        self.paths.data_dir.join("lyrebird.log")
    }
}

pub fn save(cfg: &Config, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    write_config(cfg, &path)
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj = ProjectDirs::from("dev", "lyrebird", "lyrebird").context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        let cfg = defaults::defaults();
        write_config(&cfg, &path).context("write default config")?;
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    parse(&raw).with_context(|| format!("parse {}", path.display()))
}

fn parse(raw: &str) -> anyhow::Result<Config> {
    let mut cfg = toml::from_str::<Config>(raw)?;
    if cfg.ui.page_size == 0 {
        cfg.ui.page_size = defaults::PAGE_SIZE;
    }
    Ok(cfg)
}

fn write_config(cfg: &Config, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let cfg = parse(
            r#"
[api]
base_url = "http://lyrics.local"

[search]
ordering = "latest_issued"
"#,
        )
        .unwrap();
        assert_eq!(cfg.api.base_url, "http://lyrics.local");
        assert_eq!(cfg.api.timeout_secs, defaults::TIMEOUT_SECS);
        assert_eq!(cfg.search.ordering, SearchOrdering::LatestIssued);
        assert_eq!(cfg.search.recent_limit, 5);
        assert_eq!(cfg.ui.page_size, 12);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let cfg = parse("[ui]\npage_size = 0\n").unwrap();
        assert_eq!(cfg.ui.page_size, defaults::PAGE_SIZE);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut cfg = defaults::defaults();
        cfg.ui.last_artist = Some("Adele".into());
        let raw = toml::to_string_pretty(&cfg).unwrap();
        let back = parse(&raw).unwrap();
        assert_eq!(back.ui.last_artist.as_deref(), Some("Adele"));
        assert_eq!(back.search.ordering, SearchOrdering::LastResolved);
    }

    #[test]
    fn test_load_creates_missing_file() {
        let dir = std::env::temp_dir().join(format!("lyrebird-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let cfg = load(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.ui.page_size, defaults::PAGE_SIZE);

        let _ = fs::remove_dir_all(&dir);
    }
}
