use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        if let Some(pd) = ProjectDirs::from("", "", "stride") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("stride_config.json")
        }
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("stride");
            Some(state_dir.join("stride.log"))
        } else {
            ProjectDirs::from("", "", "stride")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("stride.log"))
        }
    }
}
