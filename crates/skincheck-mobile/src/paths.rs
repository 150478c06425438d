//! Mobile filesystem path helpers.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use skincheck_core::config::AppConfig;

const APP_DIR_NAME: &str = "skincheck";

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Writable app data directory, resolved once per process.
#[must_use]
pub fn skincheck_data_dir() -> PathBuf {
    DATA_DIR.get_or_init(resolve_data_dir).clone()
}

/// Promotion outbox; relative config values live under the data directory.
#[must_use]
pub fn outbox_dir(config: &AppConfig) -> PathBuf {
    outbox_dir_in(&skincheck_data_dir(), config)
}

fn outbox_dir_in(data_dir: &Path, config: &AppConfig) -> PathBuf {
    let configured = PathBuf::from(config.outbox_dir());
    if configured.is_absolute() {
        configured
    } else {
        data_dir.join(configured)
    }
}

fn resolve_data_dir() -> PathBuf {
    let selected = candidate_base_dirs()
        .into_iter()
        .map(|base| base.join(APP_DIR_NAME))
        .find(|candidate| ensure_writable_dir(candidate))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR_NAME));

    tracing::info!("Resolved mobile data directory: {}", selected.display());
    selected
}

fn candidate_base_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = std::env::var_os("SKINCHECK_DATA_DIR").map(PathBuf::from) {
        candidates.push(path);
    }
    if let Some(path) = dirs::data_local_dir() {
        candidates.push(path);
    }
    if let Some(path) = dirs::data_dir() {
        candidates.push(path);
    }
    if let Some(path) = std::env::var_os("HOME").map(PathBuf::from) {
        candidates.push(path);
    }
    if let Some(path) = std::env::var_os("TMPDIR").map(PathBuf::from) {
        candidates.push(path);
    }
    candidates.push(std::env::temp_dir());
    candidates
}

fn ensure_writable_dir(path: &Path) -> bool {
    if std::fs::create_dir_all(path).is_err() {
        return false;
    }

    let probe = path.join(".skincheck-write-test");
    let Ok(mut file) = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&probe)
    else {
        return false;
    };

    let writable = file.write_all(b"ok").is_ok();
    let _ = std::fs::remove_file(probe);
    writable
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn writable_dir_is_created() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a").join("b");
        assert!(ensure_writable_dir(&nested));
        assert!(nested.is_dir());
        assert!(!nested.join(".skincheck-write-test").exists());
    }

    #[test]
    fn relative_outbox_lives_under_data_dir() {
        let data_dir = PathBuf::from("/data/app");
        assert_eq!(
            outbox_dir_in(&data_dir, &AppConfig::default()),
            data_dir.join("outbox")
        );

        let config = AppConfig {
            outbox_dir: Some("mail/queue".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(outbox_dir_in(&data_dir, &config), data_dir.join("mail/queue"));
    }

    #[test]
    fn absolute_outbox_is_kept() {
        let temp = tempfile::tempdir().unwrap();
        let config = AppConfig {
            outbox_dir: Some(temp.path().display().to_string()),
            ..AppConfig::default()
        };
        assert_eq!(outbox_dir_in(Path::new("/data/app"), &config), temp.path());
    }
}
