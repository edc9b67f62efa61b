use crate::{
    errors::FixtureError,
    source::{self, ImportOptions},
    vfs::{file, json_file, symlink, File, JsonFile, StringFile, SymlinkFile},
};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

/// Builder operations shared by a [`crate::Project`] and every [`Dir`] nested inside it.
///
/// Implementors only provide their path prefix and the backing sequence of entries; every
/// operation below writes into that sequence with paths already joined onto the prefix.
pub trait DirectoryApi {
    /// Path every entry added through this scope is joined onto.
    fn prefix(&self) -> &str;
    /// All entries of the fixture, in insertion order.
    fn files(&self) -> &[File];
    fn files_mut(&mut self) -> &mut Vec<File>;

    /// Adds `entry` below this scope and returns it.
    ///
    /// The entry path (and the target of a symlink) is rewritten once, here, to be joined
    /// onto [`DirectoryApi::prefix`].
    fn add(&mut self, entry: impl Into<File>) -> &mut File {
        let mut entry = entry.into();

        let path = michi::join(self.prefix(), entry.path());
        entry.set_path(path);

        if let File::Symlink(link) = &mut entry {
            link.target = michi::join(self.prefix(), &link.target);
        }

        log::trace!("adding {} file: {}", entry.kind(), entry.path());

        let files = self.files_mut();
        let index = files.len();
        files.push(entry);

        &mut files[index]
    }

    fn add_file(&mut self, path: &str, content: impl Into<String>) -> &mut StringFile {
        let File::String(entry) = self.add(file(path, content)) else {
            unreachable!("a string file was just added")
        };
        entry
    }

    fn add_json_file(&mut self, path: &str, obj: impl Into<Value>) -> &mut JsonFile {
        let File::Json(entry) = self.add(json_file(path, obj)) else {
            unreachable!("a json file was just added")
        };
        entry
    }

    fn add_symlink(&mut self, path: &str, target: &str) -> &mut SymlinkFile {
        let File::Symlink(entry) = self.add(symlink(path, target)) else {
            unreachable!("a symlink was just added")
        };
        entry
    }

    /// Adds one entry per mapping value: strings become plain files, any other JSON value
    /// becomes a JSON file and `None` is skipped.
    ///
    /// Returns the created entries in mapping order.
    fn add_files<K: AsRef<str>>(&mut self, files: IndexMap<K, Option<Value>>) -> &mut [File] {
        let start = self.files().len();

        for (path, value) in files {
            match value {
                Some(Value::String(content)) => {
                    self.add_file(path.as_ref(), content);
                }
                Some(obj) => {
                    self.add_json_file(path.as_ref(), obj);
                }
                None => {}
            }
        }

        &mut self.files_mut()[start..]
    }

    /// Opens a nested scope at `path` below this one.
    fn dir(&mut self, path: &str) -> Dir<'_> {
        let prefix = michi::join(self.prefix(), path);

        Dir {
            prefix,
            files: self.files_mut(),
        }
    }

    /// Same as [`DirectoryApi::dir`], running `configure` on the new scope before returning it.
    ///
    /// ```
    /// use fs_fixture::{DirectoryApi, Project};
    ///
    /// let mut fixture = Project::at("/fixture");
    /// fixture.dir_with("src", |src| {
    ///     src.add_file("lib.rs", "");
    ///     src.dir_with("bin", |bin| {
    ///         bin.add_file("main.rs", "fn main() {}");
    ///     });
    /// });
    ///
    /// assert!(fixture.get_file("src/bin/main.rs").is_some());
    /// ```
    fn dir_with<F>(&mut self, path: &str, configure: F) -> Dir<'_>
    where
        F: FnOnce(&mut Dir<'_>),
    {
        let mut dir = self.dir(path);
        configure(&mut dir);
        dir
    }

    /// Imports the real directory tree at `real_path`, see [`crate::source`].
    fn read_from(&mut self, real_path: impl AsRef<Path>, options: ImportOptions) {
        let ImportOptions { target, ignored } = options;

        let ignored = ignored.unwrap_or_else(|| {
            source::DEFAULT_IGNORED_PATHS
                .iter()
                .map(|pattern| pattern.to_string())
                .collect()
        });

        match target {
            Some(target) => {
                source::read_into(real_path.as_ref(), &mut self.dir(&target), &ignored)
            }
            None => source::read_into(real_path.as_ref(), self, &ignored),
        }
    }

    /// Most recently added entry at `path`.
    fn get_file(&self, path: &str) -> Option<&File> {
        let path = michi::join(self.prefix(), path);

        self.files().iter().rev().find(|entry| entry.path() == path)
    }

    fn get_file_mut(&mut self, path: &str) -> Option<&mut File> {
        let path = michi::join(self.prefix(), path);

        self.files_mut()
            .iter_mut()
            .rev()
            .find(|entry| entry.path() == path)
    }

    /// Like [`DirectoryApi::get_file`], failing when the entry found is not a JSON file.
    fn get_json_file(&self, path: &str) -> Result<Option<&JsonFile>, FixtureError> {
        match self.get_file(path) {
            None => Ok(None),
            Some(File::Json(entry)) => Ok(Some(entry)),
            Some(other) => Err(FixtureError::NotJson {
                path: other.path().to_string(),
                kind: other.kind(),
            }),
        }
    }

    fn get_json_file_mut(&mut self, path: &str) -> Result<Option<&mut JsonFile>, FixtureError> {
        match self.get_file_mut(path) {
            None => Ok(None),
            Some(File::Json(entry)) => Ok(Some(entry)),
            Some(other) => Err(FixtureError::NotJson {
                path: other.path().to_string(),
                kind: other.kind(),
            }),
        }
    }
}

/// A scope nested below a project, sharing the project's entries.
#[derive(Debug)]
pub struct Dir<'a> {
    prefix: String,
    files: &'a mut Vec<File>,
}
impl DirectoryApi for Dir<'_> {
    fn prefix(&self) -> &str {
        &self.prefix
    }
    fn files(&self) -> &[File] {
        self.files.as_slice()
    }
    fn files_mut(&mut self) -> &mut Vec<File> {
        &mut *self.files
    }
}
