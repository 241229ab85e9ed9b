use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_tracklist_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("TRACKLIST_CONFIG_PATH", "/tmp/tracklist-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/tracklist-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("tracklist")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("tracklist")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file_and_parse_field_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
auto_advance = false
autoplay = true

[ui]
header_text = "hello"
track_fields = ["file", "length"]
track_separator = " | "

[library]
extensions = ["mp3"]
recursive = false
include_hidden = true
follow_links = false
max_depth = 3

[logging]
level = "debug"
file = "/tmp/tracklist.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TRACKLIST_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TRACKLIST__PLAYBACK__AUTO_ADVANCE");

    let s = Settings::load().unwrap();
    assert!(!s.playback.auto_advance);
    assert!(s.playback.autoplay);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(
        s.ui.track_fields,
        vec![TrackField::Filename, TrackField::Duration]
    );
    assert_eq!(s.ui.track_separator, " | ");
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.library.max_depth, Some(3));
    assert_eq!(s.logging.level, "debug");
    assert_eq!(
        s.logging.file,
        Some(std::path::PathBuf::from("/tmp/tracklist.log"))
    );
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
auto_advance = true
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("TRACKLIST_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("TRACKLIST__PLAYBACK__AUTO_ADVANCE", "false");

    let s = Settings::load().unwrap();
    assert!(!s.playback.auto_advance);
}

#[test]
fn missing_config_file_yields_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("does-not-exist.toml");
    let _g1 = EnvGuard::set("TRACKLIST_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("TRACKLIST__PLAYBACK__AUTO_ADVANCE");

    let s = Settings::load().unwrap();
    assert!(s.playback.auto_advance);
    assert!(!s.playback.autoplay);
    assert_eq!(s.logging.level, "warn");
    assert!(s.logging.file.is_none());
    assert_eq!(s.ui.track_fields.len(), 3);
}

#[test]
fn validate_rejects_empty_extensions_and_fields() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.library.extensions = vec![" . ".to_string()];
    assert!(s.validate().is_err());

    s.library.extensions = vec!["flac".to_string()];
    s.ui.track_fields.clear();
    assert!(s.validate().is_err());
}
