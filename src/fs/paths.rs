//! Path resolution utilities for fieldmaster
//!
//! Everything fieldmaster stores lives in a single data directory.

use std::path::{Path, PathBuf};

/// Environment variable naming the data directory
pub const DATA_DIR_ENV: &str = "FIELDMASTER_DIR";

/// Directory name used under the working directory when nothing else is set
pub const DEFAULT_DATA_DIR_NAME: &str = ".fieldmaster";

/// Resolve the data directory: explicit override, then `FIELDMASTER_DIR`,
/// then `.fieldmaster` under the current working directory.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> PathBuf {
    let env_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    resolve_data_dir_from(override_dir, env_dir, &resolve_cwd(None))
}

/// Pure form of [`resolve_data_dir`] with the environment passed in.
pub fn resolve_data_dir_from(
    override_dir: Option<&Path>,
    env_dir: Option<PathBuf>,
    cwd: &Path,
) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    match env_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => cwd.join(DEFAULT_DATA_DIR_NAME),
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the config.json file.
pub fn get_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// Get the path of the file holding the record stored under `key`.
///
/// Characters outside `[A-Za-z0-9_-]` are replaced so a key can never
/// escape the data directory.
pub fn get_record_path(data_dir: &Path, key: &str) -> PathBuf {
    let safe: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    data_dir.join(format!("{}.json", safe))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_prefers_override() {
        let dir = resolve_data_dir_from(
            Some(Path::new("/custom")),
            Some(PathBuf::from("/from-env")),
            Path::new("/work"),
        );
        assert_eq!(dir, PathBuf::from("/custom"));
    }

    #[test]
    fn test_resolve_data_dir_uses_env() {
        let dir = resolve_data_dir_from(None, Some(PathBuf::from("/from-env")), Path::new("/work"));
        assert_eq!(dir, PathBuf::from("/from-env"));
    }

    #[test]
    fn test_resolve_data_dir_defaults_under_cwd() {
        let dir = resolve_data_dir_from(None, None, Path::new("/work"));
        assert_eq!(dir, PathBuf::from("/work/.fieldmaster"));

        let dir = resolve_data_dir_from(None, Some(PathBuf::new()), Path::new("/work"));
        assert_eq!(dir, PathBuf::from("/work/.fieldmaster"));
    }

    #[test]
    fn test_get_config_path() {
        let root = PathBuf::from("/data");
        assert_eq!(get_config_path(&root), PathBuf::from("/data/config.json"));
    }

    #[test]
    fn test_get_record_path() {
        let root = PathBuf::from("/data");
        assert_eq!(
            get_record_path(&root, "currentOrder"),
            PathBuf::from("/data/currentOrder.json")
        );
        assert_eq!(
            get_record_path(&root, "../etc/passwd"),
            PathBuf::from("/data/___etc_passwd.json")
        );
    }

    #[test]
    fn test_resolve_cwd_with_override() {
        let path = PathBuf::from("/custom/path");
        assert_eq!(resolve_cwd(Some(&path)), path);
    }

    #[test]
    fn test_resolve_cwd_without_override() {
        let resolved = resolve_cwd(None);
        assert!(!resolved.as_os_str().is_empty());
    }
}
