use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FileOperation {
    #[error("reading a file")]
    Read,
    #[error("writing a file")]
    Write,
    #[error("creating a directory")]
    Mkdir,
    #[error("creating a symlink")]
    Symlink,
    #[error("removing a directory")]
    Remove,
    #[error("creating a temporary directory")]
    Tempdir,
}
#[derive(Debug, Error, Diagnostic)]
#[error("I/O error: {operation} on path '{path}'")]
#[diagnostic(
    code(fs_fixture::io),
    help("Check file permissions, disk space, or that the path is correct.")
)]
pub struct IoError {
    pub operation: FileOperation,
    pub path: std::path::PathBuf,
    #[source]
    pub source: std::io::Error,
}
impl IoError {
    pub fn new(operation: FileOperation, path: std::path::PathBuf, error: std::io::Error) -> Self {
        Self {
            operation,
            path,
            source: error,
        }
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum FixtureError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Io(#[from] IoError),

    #[error("Found file in fixture at '{path}', but it is type {kind} instead of json.")]
    #[diagnostic(
        code(fs_fixture::not_json),
        help("Use `get_file` when the entry at this path may not be a JSON file")
    )]
    NotJson { path: String, kind: &'static str },

    #[error("Unable to serialize json for '{path}'")]
    #[diagnostic(code(fs_fixture::serialize))]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
