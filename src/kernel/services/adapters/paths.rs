//! Per-user data and cache directories.
//!
//! XDG variables win, then `$HOME` with the XDG default suffix, then
//! `%LOCALAPPDATA%`. Logs live in `<data>/ztouch/logs`.

use std::ffi::OsString;
use std::path::PathBuf;

const APP_NAME: &str = "ztouch";
const LOG_DIR: &str = "logs";

fn resolve_dir(
    xdg: Option<OsString>,
    home: Option<OsString>,
    local_app_data: Option<OsString>,
    home_suffix: &str,
) -> Option<PathBuf> {
    xdg.filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home.map(|home| PathBuf::from(home).join(home_suffix)))
        .or_else(|| local_app_data.map(PathBuf::from))
}

fn user_dir(xdg_var: &str, home_suffix: &str) -> Option<PathBuf> {
    resolve_dir(
        std::env::var_os(xdg_var),
        std::env::var_os("HOME"),
        std::env::var_os("LOCALAPPDATA"),
        home_suffix,
    )
}

fn get_app_data_dir() -> Option<PathBuf> {
    user_dir("XDG_DATA_HOME", ".local/share").map(|dir| dir.join(APP_NAME))
}

pub(super) fn get_cache_dir() -> Option<PathBuf> {
    user_dir("XDG_CACHE_HOME", ".cache")
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_app_data_dir()
        .map(|dir| dir.join(LOG_DIR))
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Cannot determine log directory",
            )
        })?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
