// Filesystem locations for persisted state.
// History lives in the data directory, logs in the cache directory.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "summit")
}

/// Base data directory (~/.local/share/summit on Linux).
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Base cache directory (~/.cache/summit on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the persisted article history.
pub fn articles_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("articles.json"))
}

/// Path to the log file.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("summit.log"))
}
