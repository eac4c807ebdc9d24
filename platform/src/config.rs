//! Configuration for the daily games platform
//!
//! Every setting comes from the environment, with a default when unset:
//! 1. DAILY_DATA_DIR, else the platform data directory, else ./data
//! 2. DAILY_DATABASE_PATH, else <data dir>/daily-games.db
//! 3. DAILY_SEED, optional RNG seed for reproducible factory output
//! 4. DAILY_LOG_DIR, optional directory for daily-rolling log files

use std::path::PathBuf;

use directories::ProjectDirs;

const DEV_DATA_DIR: &str = "./data";
const DATABASE_FILE: &str = "daily-games.db";

/// Get the data directory for persistence.
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("DAILY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(dirs) = ProjectDirs::from("", "", "daily-games") {
        return dirs.data_dir().to_path_buf();
    }

    PathBuf::from(DEV_DATA_DIR)
}

/// Get the SQLite database file path.
pub fn get_database_path() -> PathBuf {
    match std::env::var("DAILY_DATABASE_PATH") {
        Ok(path) => PathBuf::from(path),
        Err(_) => get_data_dir().join(DATABASE_FILE),
    }
}

/// RNG seed for factories. Unset or unparsable means a random seed.
pub fn get_seed() -> Option<u64> {
    parse_seed(std::env::var("DAILY_SEED").ok().as_deref())
}

pub fn get_log_dir() -> Option<PathBuf> {
    std::env::var_os("DAILY_LOG_DIR").map(PathBuf::from)
}

fn parse_seed(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();
    match raw.parse() {
        Ok(seed) => Some(seed),
        Err(_) => {
            tracing::warn!(value = raw, "Ignoring DAILY_SEED, not an unsigned integer");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir_fallback() {
        // Returns DAILY_DATA_DIR when the environment sets it
        let dir = get_data_dir();
        assert!(!dir.as_os_str().is_empty());
    }

    #[test]
    fn test_database_path_is_a_file_path() {
        let path = get_database_path();
        assert!(path.file_name().is_some());
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed(None), None);
        assert_eq!(parse_seed(Some("42")), Some(42));
        assert_eq!(parse_seed(Some(" 7 ")), Some(7));
        assert_eq!(parse_seed(Some("-1")), None);
        assert_eq!(parse_seed(Some("seed")), None);
    }
}
