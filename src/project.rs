use crate::{
    api::DirectoryApi,
    config,
    errors::{FileOperation, FixtureError, IoError},
    vfs::File,
};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

const FIXTURES_TMP_DIR: &str = "tmp";

/// Where a project lives on disk.
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    /// Directory name of the project, or the prefix of a temporary directory.
    pub name: String,
    /// Parent directory, `<fixtures root>/tmp` when `None`.
    pub root_dir: Option<String>,
}
impl From<&str> for ProjectOptions {
    fn from(name: &str) -> Self {
        Self {
            name: name.to_string(),
            root_dir: None,
        }
    }
}
impl ProjectOptions {
    fn root_dir(&self) -> String {
        self.root_dir.clone().unwrap_or_else(|| {
            michi::join(
                &config::fixtures_root_dir().to_string_lossy(),
                FIXTURES_TMP_DIR,
            )
        })
    }
}

/// The root of a fixture: every entry added through it or any nested [`crate::Dir`], plus
/// the real directory those entries are written to.
///
/// Nothing is removed from disk implicitly; call [`Project::rm`] once done.
#[derive(Debug, Clone)]
pub struct Project {
    cwd: String,
    files: Vec<File>,
}
impl Project {
    /// Project rooted exactly at `cwd`.
    pub fn at(cwd: impl Into<String>) -> Self {
        Self {
            cwd: cwd.into(),
            files: Vec::new(),
        }
    }
    /// Project named `options.name` under its root directory. Nothing is created on disk.
    pub fn new(options: impl Into<ProjectOptions>) -> Self {
        let options = options.into();

        Self::at(michi::join(&options.root_dir(), &options.name))
    }
    /// Project in a freshly created, uniquely named directory under the root directory.
    ///
    /// `options.name` is used as the prefix of the directory name.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the root directory or the temporary directory cannot be
    /// created.
    pub fn tempdir(options: impl Into<ProjectOptions>) -> Result<Self, FixtureError> {
        let options = options.into();
        let root_dir = PathBuf::from(options.root_dir());

        create_directory(&root_dir)?;

        let directory = tempfile::Builder::new()
            .prefix(&options.name)
            .tempdir_in(&root_dir)
            .map_err(|error| IoError::new(FileOperation::Tempdir, root_dir.clone(), error))?
            .into_path();

        log::debug!("created temporary fixture at: {}", directory.display());

        Ok(Self::at(directory.to_string_lossy()))
    }
    pub fn cwd(&self) -> &str {
        &self.cwd
    }
    /// Writes every entry to disk in the order it was added.
    ///
    /// Parent directories are created as needed and existing files are overwritten, so when a
    /// path was added twice the last addition wins. This is not transactional: a failure
    /// leaves the entries written so far in place.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] on the first directory, file or symlink that cannot be
    /// created.
    pub fn write(&self) -> Result<(), FixtureError> {
        for entry in &self.files {
            let path = Path::new(entry.path());

            if let Some(parent) = path.parent() {
                create_directory(parent)?;
            }

            match entry {
                File::String(file) => write_file(path, &file.content)?,
                File::Json(file) => write_file(path, &file.content())?,
                File::Custom(file) => write_file(path, &file.content())?,
                File::Symlink(link) => create_symlink(Path::new(&link.target), path)?,
            }
        }

        log::debug!("wrote {} entries to: {}", self.files.len(), self.cwd);

        Ok(())
    }
    /// Recursively removes the project directory.
    ///
    /// Removing a directory that is already gone is not an error, and a failed removal is
    /// only reported when the directory still exists afterwards.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] when the directory could not be removed.
    pub fn rm(&self) -> Result<(), FixtureError> {
        let cwd = Path::new(&self.cwd);

        let removed = match fs::symlink_metadata(cwd) {
            Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(cwd),
            Ok(_) => fs::remove_file(cwd),
            Err(error) => Err(error),
        };

        match removed {
            Ok(()) => {
                log::debug!("removed fixture: {}", self.cwd);
                Ok(())
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) if fs::symlink_metadata(cwd).is_err() => {
                log::debug!("fixture vanished while removing: {} ({})", self.cwd, error);
                Ok(())
            }
            Err(error) => {
                Err(IoError::new(FileOperation::Remove, cwd.to_path_buf(), error).into())
            }
        }
    }
    /// Appends a deep clone of every entry of `other`.
    ///
    /// Cloned entries are moved from `other`'s directory into this one: a file at
    /// `<other cwd>/src/a.txt` is added at `<cwd>/src/a.txt`, symlink targets likewise.
    pub fn copy_files_from(&mut self, other: &Project) -> &mut Self {
        for entry in &other.files {
            let mut copy = entry.clone();

            let path = rebase(&other.cwd, copy.path());
            copy.set_path(path);

            if let File::Symlink(link) = &mut copy {
                link.target = rebase(&other.cwd, &link.target);
            }

            self.add(copy);
        }

        self
    }
}
impl DirectoryApi for Project {
    fn prefix(&self) -> &str {
        &self.cwd
    }
    fn files(&self) -> &[File] {
        &self.files
    }
    fn files_mut(&mut self) -> &mut Vec<File> {
        &mut self.files
    }
}

/// Named project below `<fixtures root>/tmp`, see [`Project::new`].
pub fn project(name: &str) -> Project {
    Project::new(name)
}

/// Project in a new unique directory below `<fixtures root>/tmp`, see [`Project::tempdir`].
pub fn tempdir_project(name: &str) -> Result<Project, FixtureError> {
    Project::tempdir(name)
}

/// `path` relative to `from`, falling back to `path` itself when the two cannot be related.
fn rebase(from: &str, path: &str) -> String {
    michi::relative(from, path).unwrap_or_else(|_| path.to_string())
}

/// Creates all directories in the specified path if they do not exist.
fn create_directory(path: &Path) -> Result<(), FixtureError> {
    fs::create_dir_all(path)
        .map_err(|error| IoError::new(FileOperation::Mkdir, path.into(), error))?;

    Ok(())
}

/// Writes a file with the provided contents, replacing whatever was there.
fn write_file(path: &Path, contents: &str) -> Result<(), FixtureError> {
    fs::write(path, contents)
        .map_err(|error| IoError::new(FileOperation::Write, path.into(), error))?;

    log::trace!("create {}", path.display());

    Ok(())
}

/// Creates a symlink at `path` pointing at `target`.
fn create_symlink(target: &Path, path: &Path) -> Result<(), FixtureError> {
    #[cfg(unix)]
    let created = std::os::unix::fs::symlink(target, path);
    #[cfg(windows)]
    let created = std::os::windows::fs::symlink_file(target, path);

    created.map_err(|error| IoError::new(FileOperation::Symlink, path.into(), error))?;

    log::trace!("link {} -> {}", path.display(), target.display());

    Ok(())
}
