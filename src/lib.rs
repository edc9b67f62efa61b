//! Declarative file trees for test fixtures.
//!
//! A [`Project`] collects files, JSON files and symlinks in memory, writes them below a
//! scratch directory with [`Project::write`] and removes that directory again with
//! [`Project::rm`]. Nested directories are described through [`DirectoryApi::dir`], and
//! existing trees on disk can be pulled in with [`DirectoryApi::read_from`].
//!
//! ```no_run
//! use fs_fixture::{tempdir_project, DirectoryApi};
//! use serde_json::json;
//!
//! let mut fixture = tempdir_project("").unwrap();
//! fixture.add_json_file("package.json", json!({ "name": "demo" }));
//! fixture.dir_with("src", |src| {
//!     src.add_file("index.ts", "export {}");
//! });
//!
//! fixture.write().unwrap();
//! // ... run the code under test against fixture.cwd() ...
//! fixture.rm().unwrap();
//! ```
pub mod api;
pub mod capture;
pub mod config;
pub mod errors;
pub mod project;
pub mod source;
pub mod vfs;

pub use api::{Dir, DirectoryApi};
pub use config::{fixtures_root_dir, set_fixtures_root_dir};
pub use errors::FixtureError;
pub use project::{project, tempdir_project, Project, ProjectOptions};
pub use source::{ImportOptions, DEFAULT_IGNORED_PATHS};
pub use vfs::{
    custom, file, json_file, symlink, CustomFile, File, JsonFile, StringFile, SymlinkFile,
};
