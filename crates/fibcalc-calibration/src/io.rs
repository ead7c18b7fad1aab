//! Profile persistence (load/save).

use std::path::PathBuf;

use crate::profile::{self, CalibrationProfile};

const PROFILE_FILENAME: &str = "fibcalc_calibration.json";
const CONFIG_DIR_NAME: &str = "fibcalc";

/// Load calibration profile from the standard location.
/// Tries XDG config dir first, then the working directory.
#[must_use]
pub fn load_profile() -> Option<CalibrationProfile> {
    // Try XDG config directory first
    if let Some(path) = xdg_profile_path() {
        if path.exists() {
            if let Some(p) = load_from_path(&path) {
                return Some(p);
            }
        }
    }

    // Fall back to working directory
    let path = cwd_profile_path();
    if path.exists() {
        return load_from_path(&path);
    }

    None
}

/// Load a profile and validate it against the current environment.
/// Returns `None` if the profile is incompatible, invalid, or for a different CPU.
pub fn load_validated_profile() -> Option<CalibrationProfile> {
    let p = load_profile()?;

    if !p.is_compatible() {
        tracing::info!("Profile version mismatch, ignoring cached profile");
        return None;
    }
    if !p.is_valid() {
        tracing::info!("Profile has invalid thresholds, ignoring cached profile");
        return None;
    }

    let current_fp = profile::cpu_fingerprint();
    if !p.matches_cpu(&current_fp) {
        tracing::info!("Profile CPU mismatch, ignoring cached profile");
        return None;
    }

    Some(p)
}

/// Save calibration profile to the XDG config directory.
/// Falls back to the working directory if the config dir can't be created.
pub fn save_profile(p: &CalibrationProfile) -> std::io::Result<()> {
    let path = if let Some(xdg_path) = xdg_profile_path() {
        // Ensure the config directory exists
        if let Some(parent) = xdg_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        xdg_path
    } else {
        cwd_profile_path()
    };

    save_to_path(p, &path)
}

/// Save profile to a specific path.
pub fn save_to_path(p: &CalibrationProfile, path: &std::path::Path) -> std::io::Result<()> {
    let content = serde_json::to_string_pretty(p).map_err(std::io::Error::other)?;
    std::fs::write(path, content)
}

/// Delete the saved profile if it exists.
pub fn delete_profile() -> std::io::Result<bool> {
    if let Some(path) = xdg_profile_path() {
        if path.exists() {
            std::fs::remove_file(&path)?;
            return Ok(true);
        }
    }
    let path = cwd_profile_path();
    if path.exists() {
        std::fs::remove_file(&path)?;
        return Ok(true);
    }
    Ok(false)
}

fn load_from_path(path: &std::path::Path) -> Option<CalibrationProfile> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Get the XDG config directory path for the profile.
fn xdg_profile_path() -> Option<PathBuf> {
    // Try XDG_CONFIG_HOME, fall back to ~/.config
    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| {
                let mut p = PathBuf::from(home);
                p.push(".config");
                p
            })
        })?;

    Some(config_dir.join(CONFIG_DIR_NAME).join(PROFILE_FILENAME))
}

/// Get the working directory profile path.
fn cwd_profile_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(format!(".{PROFILE_FILENAME}"))
}
