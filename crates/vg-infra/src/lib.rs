pub mod app_dirs;
pub mod setup_status;

pub use app_dirs::{AppDirs, AppDirsError, DirsAppDirsAdapter};
pub use setup_status::FileSetupStatusStore;
