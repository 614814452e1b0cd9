// src/infra/paths.rs — Local state locations
//
// All paths respect the HEYME_HOME environment variable for isolation.
// When HEYME_HOME is set, config, storage and cookies live under that
// directory. When unset, everything lives under ~/.heyme/.

use std::path::PathBuf;

/// Returns the HEYME_HOME override, if set.
fn heyme_home() -> Option<PathBuf> {
    std::env::var_os("HEYME_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Configuration directory: $HEYME_HOME/ or ~/.heyme/
pub fn config_dir() -> PathBuf {
    if let Some(home) = heyme_home() {
        return home;
    }
    dirs_home().join(".heyme")
}

/// Home directory. Falls back to the working directory when the platform
/// cannot report one (e.g. a stripped-down container).
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Durable key/value storage (the session token and cached profile).
pub fn storage_path() -> PathBuf {
    config_dir().join("storage.json")
}

/// Cookie jar
pub fn cookies_path() -> PathBuf {
    config_dir().join("cookies.json")
}

/// Ensure all required directories exist
pub async fn ensure_dirs() -> anyhow::Result<()> {
    tokio::fs::create_dir_all(config_dir()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_config_dir() {
        let dir = config_dir();
        assert!(storage_path().starts_with(&dir));
        assert!(cookies_path().starts_with(&dir));
        assert_eq!(config_file_path().file_name().unwrap(), "config.toml");
    }
}
