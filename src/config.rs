use anyhow::Context;
use log::info;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.to_string_lossy()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }

    /// Like [`Config::load`], but a missing file falls back to the defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            info!(
                "Config {} not found, using defaults",
                path.to_string_lossy()
            );
            Ok(Config::default())
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: 1,
            http: HttpConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
    /// uploads above this size are rejected, unlimited when absent
    #[serde(default)]
    pub max_upload_bytes: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: None,
        }
    }
}

/// Directories whose music files are queued at startup
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    #[serde(default)]
    pub roots: Vec<PathBuf>,
    #[serde(default)]
    pub follow_symlinks: bool,
    #[serde(default)]
    pub ignored_dirs: Vec<PathBuf>,
    #[serde(default = "default_artist")]
    pub default_artist: String,
}

fn default_artist() -> String {
    "Unknown artist".to_string()
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            follow_symlinks: false,
            ignored_dirs: Vec::new(),
            default_artist: default_artist(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config_toml() -> anyhow::Result<()> {
        let toml_str = r#"
version = 1

[http]
bind_addr = "0.0.0.0"
port = 9000
max_upload_bytes = 1048576

[import]
roots = ["/home/listener/Music"]
follow_symlinks = true
ignored_dirs = ['/home/listener/Music/Samples']
default_artist = "Various"
"#;

        let cfg: Config = toml::from_str(toml_str)?;

        assert_eq!(cfg.version, 1);

        assert_eq!(cfg.http.bind_addr, "0.0.0.0");
        assert_eq!(cfg.http.port, 9000);
        assert_eq!(cfg.http.max_upload_bytes, Some(1_048_576));

        assert_eq!(
            cfg.import.roots,
            vec![PathBuf::from("/home/listener/Music")]
        );
        assert!(cfg.import.follow_symlinks);
        assert_eq!(cfg.import.default_artist, "Various");

        Ok(())
    }

    #[test]
    fn test_sections_default_when_missing() -> anyhow::Result<()> {
        let cfg: Config = toml::from_str("version = 1\n")?;

        assert_eq!(cfg.http.port, 8080);
        assert_eq!(cfg.http.max_upload_bytes, None);
        assert!(cfg.import.roots.is_empty());
        assert!(!cfg.import.follow_symlinks);
        assert_eq!(cfg.import.default_artist, "Unknown artist");

        Ok(())
    }

    #[test]
    fn test_load_or_default_without_file() -> anyhow::Result<()> {
        let dir = tempdir()?;

        let cfg = Config::load_or_default(&dir.path().join("missing.toml"))?;

        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.http.bind_addr, "127.0.0.1");

        Ok(())
    }

    #[test]
    fn test_load_reports_bad_toml() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "version = \"one\"")?;

        let err = Config::load(&path).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config TOML"));

        Ok(())
    }
}
