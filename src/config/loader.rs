use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::BowtieConfig;
use crate::core::errors::{Error, ResultExt};

/// Project configuration file name
pub const CONFIG_FILE_NAME: &str = ".bowtie.toml";

/// Load configuration from .bowtie.toml if it exists
/// Pure function to read and parse config file contents
pub(crate) fn read_config_file(path: &Path) -> Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<BowtieConfig, Error> {
    let mut config = toml::from_str::<BowtieConfig>(contents)?;

    // A zero-frame or zero-fps animation would never finish; fall back to defaults
    if let Some(ref mut display) = config.display {
        if display.animation_frames == 0 || display.fps == 0 {
            log::warn!(
                "Invalid animation settings (frames={}, fps={}). Using defaults.",
                display.animation_frames,
                display.fps
            );
            let defaults = super::core::DisplayConfig::default();
            display.animation_frames = defaults.animation_frames;
            display.fps = defaults.fps;
        }
    }

    Ok(config)
}

/// Load an explicitly requested config file; any failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<BowtieConfig, Error> {
    let contents =
        read_config_file(path).map_err(|e| Error::file_system_io(path.to_path_buf(), e))?;
    parse_and_validate_config(&contents).context(format!("Failed to parse {}", path.display()))
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<BowtieConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Per-user configuration file (`~/.config/bowtie/config.toml` on Linux)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bowtie").join("config.toml"))
}

/// Search `start` and its ancestors, then the user config, for a configuration.
pub fn discover_config(start: PathBuf) -> BowtieConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .or_else(|| user_config_path().and_then(|path| try_load_config_from_path(&path)))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            BowtieConfig::default()
        })
}

pub fn load_config() -> BowtieConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            BowtieConfig::default()
        }
    }
}

/// Explicit path when given, discovery otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> Result<BowtieConfig, Error> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => Ok(load_config()),
    }
}
