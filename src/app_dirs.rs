use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "steadykeys";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::project().map(|pd| pd.config_dir().join("config.json"))
    }

    /// State lives under $HOME/.local/state when HOME is set, like other
    /// XDG-aware tools, and falls back to the platform data dir otherwise.
    pub fn state_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(
                PathBuf::from(home)
                    .join(".local")
                    .join("state")
                    .join(APP_NAME),
            )
        } else {
            Self::project().map(|pd| pd.data_local_dir().to_path_buf())
        }
    }

    pub fn best_score_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join("best_score.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::state_dir().map(|dir| dir.join(format!("{APP_NAME}.log")))
    }
}
