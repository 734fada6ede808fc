//! Location of the state file.
//!
//! Resolution order: `--state-file` / `OMNI_STATE_FILE` (handled by clap),
//! then `OMNI_STATE_DIR`, then the directory holding the executable, then the
//! platform data directory.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

pub const STATE_FILENAME: &str = "omni.json";

pub fn resolve_state_file(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return path.to_path_buf();
    }
    state_dir().join(STATE_FILENAME)
}

fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("OMNI_STATE_DIR") {
        let trimmed = dir.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    // installed next to the launcher workflow that invokes us
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        return dir;
    }

    if let Some(project_dirs) = ProjectDirs::from("dev", "omni", "omni") {
        return project_dirs.data_dir().to_path_buf();
    }
    PathBuf::from(".")
}
