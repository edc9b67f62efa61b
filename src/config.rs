use std::{
    path::{Path, PathBuf},
    sync::RwLock,
};

lazy_static::lazy_static! {
    static ref FIXTURES_ROOT_DIR: RwLock<PathBuf> = RwLock::new(
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    );
}

/// Sets the directory under which [`crate::project`] and [`crate::tempdir_project`] create
/// their fixtures (inside its `tmp` subdirectory).
///
/// The setting is process-wide. Tests that run in parallel and need isolation should pass
/// `root_dir` through [`crate::ProjectOptions`] instead.
pub fn set_fixtures_root_dir<P: AsRef<Path>>(path: P) {
    let mut root = FIXTURES_ROOT_DIR
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    log::debug!("fixtures root set to: {}", path.as_ref().display());

    *root = path.as_ref().to_path_buf();
}

/// Current fixtures root, defaults to the working directory of the process at first use.
pub fn fixtures_root_dir() -> PathBuf {
    FIXTURES_ROOT_DIR
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}
