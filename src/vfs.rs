use crate::errors::FixtureError;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt;

/// A plain text file whose content is stored as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringFile {
    pub path: String,
    pub content: String,
}

/// A file backed by a JSON value.
///
/// The on-disk content is not stored: [`JsonFile::content`] serializes `obj` every time it is
/// read, so edits made to `obj` after the file was added show up when the fixture is written.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonFile {
    pub path: String,
    pub obj: Value,
}
impl JsonFile {
    /// Builds a JSON file out of any serializable value.
    pub fn from_serialize<T: Serialize>(
        path: impl Into<String>,
        value: &T,
    ) -> Result<Self, FixtureError> {
        let path = path.into();

        let obj = serde_json::to_value(value).map_err(|source| FixtureError::Serialize {
            path: path.clone(),
            source,
        })?;

        Ok(Self { path, obj })
    }
    /// Pretty printed (two space indentation) serialization of `obj`.
    pub fn content(&self) -> String {
        format!("{:#}", self.obj)
    }
    /// Reads `obj` back as a typed value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.obj)
    }
}

/// A symbolic link pointing at `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymlinkFile {
    pub path: String,
    pub target: String,
}

/// Extension point for file-like entries with computed content.
///
/// Implementors must be [`Clone`]; the clone is what ends up in another project when
/// [`crate::Project::copy_files_from`] is used, so it should not share mutable state
/// with the original unless that is intended.
pub trait CustomFile: CloneCustomFile + fmt::Debug {
    fn path(&self) -> &str;
    fn set_path(&mut self, path: String);
    fn content(&self) -> String;
}
#[doc(hidden)]
pub trait CloneCustomFile {
    fn clone_box(&self) -> Box<dyn CustomFile>;
}
impl<T: CustomFile + Clone + 'static> CloneCustomFile for T {
    fn clone_box(&self) -> Box<dyn CustomFile> {
        Box::new(self.clone())
    }
}

/// An entry of a fixture.
#[derive(Debug)]
pub enum File {
    String(StringFile),
    Json(JsonFile),
    Symlink(SymlinkFile),
    Custom(Box<dyn CustomFile>),
}
impl File {
    pub fn path(&self) -> &str {
        match self {
            Self::String(file) => &file.path,
            Self::Json(file) => &file.path,
            Self::Symlink(file) => &file.path,
            Self::Custom(file) => file.path(),
        }
    }
    pub(crate) fn set_path(&mut self, path: String) {
        match self {
            Self::String(file) => file.path = path,
            Self::Json(file) => file.path = path,
            Self::Symlink(file) => file.path = path,
            Self::Custom(file) => file.set_path(path),
        }
    }
    /// Content that will be written to disk, `None` for symlinks.
    pub fn content(&self) -> Option<String> {
        match self {
            Self::String(file) => Some(file.content.clone()),
            Self::Json(file) => Some(file.content()),
            Self::Symlink(_) => None,
            Self::Custom(file) => Some(file.content()),
        }
    }
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Json(_) => "json",
            Self::Symlink(_) => "symlink",
            Self::Custom(_) => "custom",
        }
    }
    pub fn as_json(&self) -> Option<&JsonFile> {
        match self {
            Self::Json(file) => Some(file),
            _ => None,
        }
    }
}
impl Clone for File {
    fn clone(&self) -> Self {
        match self {
            Self::String(file) => Self::String(file.clone()),
            // `Value::clone` copies the whole tree
            Self::Json(file) => Self::Json(file.clone()),
            Self::Symlink(file) => Self::Symlink(file.clone()),
            Self::Custom(file) => Self::Custom((**file).clone_box()),
        }
    }
}
impl From<StringFile> for File {
    fn from(value: StringFile) -> Self {
        Self::String(value)
    }
}
impl From<JsonFile> for File {
    fn from(value: JsonFile) -> Self {
        Self::Json(value)
    }
}
impl From<SymlinkFile> for File {
    fn from(value: SymlinkFile) -> Self {
        Self::Symlink(value)
    }
}
impl From<Box<dyn CustomFile>> for File {
    fn from(value: Box<dyn CustomFile>) -> Self {
        Self::Custom(value)
    }
}

pub fn file(path: impl Into<String>, content: impl Into<String>) -> StringFile {
    StringFile {
        path: path.into(),
        content: content.into(),
    }
}
pub fn json_file(path: impl Into<String>, obj: impl Into<Value>) -> JsonFile {
    JsonFile {
        path: path.into(),
        obj: obj.into(),
    }
}
pub fn symlink(path: impl Into<String>, target: impl Into<String>) -> SymlinkFile {
    SymlinkFile {
        path: path.into(),
        target: target.into(),
    }
}
pub fn custom(file: impl CustomFile + 'static) -> File {
    File::Custom(Box::new(file))
}
