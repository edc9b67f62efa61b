//! Importing real directory trees into a fixture.
//!
//! The walk is best-effort: any path that cannot be stat'ed, listed or read is logged and
//! skipped so one unreadable file never aborts the capture of the rest of the tree.
use crate::{
    api::DirectoryApi,
    errors::{FileOperation, IoError},
};
use serde_json::Value;
use std::{
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Paths skipped by default: dependency caches, version control metadata and lockfiles.
pub const DEFAULT_IGNORED_PATHS: [&str; 4] =
    ["node_modules", ".git", "package-lock.json", "yarn.lock"];

const JSON_FILE_EXTENSION: &str = ".json";

/// Where and how [`DirectoryApi::read_from`] imports a real tree.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Sub-directory of the receiving scope to import into.
    pub target: Option<String>,
    /// Path suffixes to skip, [`DEFAULT_IGNORED_PATHS`] when `None`.
    pub ignored: Option<Vec<String>>,
}

/// Returns `true` when `path` ends with one of `patterns`.
///
/// Matching is a plain string suffix test, so `node_modules` also skips `my_node_modules`.
pub fn is_ignored<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    patterns
        .iter()
        .any(|pattern| path.ends_with(pattern.as_ref()))
}

#[derive(Debug, Clone, PartialEq)]
pub enum Imported {
    Json(Value),
    Text(String),
}

/// A regular file found during a [`Walk`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedFile {
    /// Path relative to the root of the walk.
    pub relative_path: String,
    pub content: Imported,
}

/// Lazy breadth-first walk over a real directory tree.
///
/// Children of a directory are visited in file name order. Metadata is read through
/// symlinks, so linked files are imported as regular files and linked directories are
/// expanded.
pub struct Walk {
    root: PathBuf,
    queue: VecDeque<PathBuf>,
    ignored: Vec<String>,
}
impl Walk {
    pub fn new(root: impl Into<PathBuf>, ignored: Vec<String>) -> Self {
        let root = root.into();

        Self {
            queue: VecDeque::from([root.clone()]),
            root,
            ignored,
        }
    }
    /// Reads a single queued path. Directories push their children and yield nothing.
    fn visit(&mut self, current: &Path) -> Result<Option<ImportedFile>, IoError> {
        let metadata = fs::metadata(current)
            .map_err(|error| IoError::new(FileOperation::Read, current.to_path_buf(), error))?;

        if metadata.is_dir() {
            let children = WalkDir::new(current)
                .min_depth(1)
                .max_depth(1)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry.into_path()),
                    Err(error) => {
                        let path = error.path().unwrap_or(current).display().to_string();
                        log::debug!("skipping unlistable path: {} ({})", path, error);
                        None
                    }
                });

            self.queue.extend(children);

            return Ok(None);
        }

        if !metadata.is_file() {
            return Ok(None);
        }

        let bytes = fs::read(current)
            .map_err(|error| IoError::new(FileOperation::Read, current.to_path_buf(), error))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();

        let relative_path = current
            .strip_prefix(&self.root)
            .unwrap_or(current)
            .to_string_lossy()
            .into_owned();

        Ok(Some(ImportedFile {
            relative_path,
            content: classify(current, text),
        }))
    }
}
impl Iterator for Walk {
    type Item = ImportedFile;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.queue.pop_front() {
            if is_ignored(&current.to_string_lossy(), &self.ignored) {
                log::trace!("ignoring: {}", current.display());
                continue;
            }

            match self.visit(&current) {
                Ok(Some(file)) => return Some(file),
                Ok(None) => {}
                Err(error) => {
                    log::debug!("skipping unreadable path: {} ({})", error, error.source);
                }
            }
        }

        None
    }
}

/// `.json` files that parse become JSON entries, everything else stays raw text.
fn classify(path: &Path, text: String) -> Imported {
    if path.to_string_lossy().ends_with(JSON_FILE_EXTENSION) {
        if let Ok(value) = serde_json::from_str::<Value>(&text) {
            return Imported::Json(value);
        }
    }

    Imported::Text(text)
}

/// Replays the tree at `root` as additions into `dir`, at paths relative to `root`.
pub fn read_into<D: DirectoryApi + ?Sized>(root: &Path, dir: &mut D, ignored: &[String]) {
    let mut count = 0;

    for imported in Walk::new(root, ignored.to_vec()) {
        match imported.content {
            Imported::Json(obj) => {
                dir.add_json_file(&imported.relative_path, obj);
            }
            Imported::Text(content) => {
                dir.add_file(&imported.relative_path, content);
            }
        }
        count += 1;
    }

    log::debug!(
        "imported {} files from {} into {}",
        count,
        root.display(),
        dir.prefix()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Project;
    use serde_json::json;

    fn defaults() -> Vec<String> {
        DEFAULT_IGNORED_PATHS.iter().map(|p| p.to_string()).collect()
    }

    fn sample_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("a.json"), r#"{"x":1}"#).unwrap();
        fs::write(root.join("b.txt"), "hello").unwrap();
        fs::write(root.join("broken.json"), "{ nope").unwrap();
        fs::write(root.join("yarn.lock"), "# lock").unwrap();
        fs::create_dir_all(root.join("node_modules/dep")).unwrap();
        fs::write(root.join("node_modules/dep/index.js"), "").unwrap();
        fs::create_dir_all(root.join("sub/deeper")).unwrap();
        fs::write(root.join("sub/c.txt"), "c").unwrap();
        fs::write(root.join("sub/deeper/d.txt"), "d").unwrap();

        dir
    }

    #[test]
    fn is_ignored_matches_suffixes() {
        let patterns = defaults();

        assert!(is_ignored("/repo/node_modules", &patterns));
        assert!(is_ignored("/repo/.git", &patterns));
        assert!(is_ignored("/repo/sub/package-lock.json", &patterns));
        assert!(!is_ignored("/repo/node_modules/dep/index.js", &patterns));
        assert!(!is_ignored("/repo/package.json", &patterns));
        assert!(!is_ignored("/repo/yarn.lock", &[] as &[&str]));
    }

    #[test]
    fn walk_is_breadth_first_and_classifies_files() {
        let tree = sample_tree();

        let imported: Vec<_> = Walk::new(tree.path(), defaults()).collect();

        let paths: Vec<_> = imported.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["a.json", "b.txt", "broken.json", "sub/c.txt", "sub/deeper/d.txt"]
        );
        assert_eq!(imported[0].content, Imported::Json(json!({ "x": 1 })));
        assert_eq!(imported[1].content, Imported::Text("hello".into()));
        assert_eq!(imported[2].content, Imported::Text("{ nope".into()));
    }

    #[test]
    fn walk_without_ignores_includes_everything() {
        let tree = sample_tree();

        let count = Walk::new(tree.path(), Vec::new()).count();

        assert_eq!(count, 7);
    }

    #[cfg(unix)]
    #[test]
    fn walk_skips_broken_paths() {
        let tree = sample_tree();
        std::os::unix::fs::symlink(tree.path().join("missing"), tree.path().join("dangling"))
            .unwrap();

        let paths: Vec<_> = Walk::new(tree.path(), defaults())
            .map(|f| f.relative_path)
            .collect();

        assert_eq!(paths.len(), 5);
        assert!(!paths.contains(&"dangling".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn walk_keeps_siblings_of_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let tree = sample_tree();
        let locked = tree.path().join("sub/locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("secret.txt"), "secret").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let paths: Vec<_> = Walk::new(tree.path(), defaults())
            .map(|f| f.relative_path)
            .collect();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(paths.contains(&"sub/c.txt".to_string()));
        assert!(paths.contains(&"sub/deeper/d.txt".to_string()));
    }

    #[test]
    fn read_into_targets_sub_scope() {
        let tree = sample_tree();
        let mut fixture = Project::at("/fixture");

        fixture.read_from(
            tree.path(),
            ImportOptions {
                target: Some("vendor".into()),
                ignored: None,
            },
        );

        let json = fixture.get_json_file("vendor/a.json").unwrap().unwrap();
        assert_eq!(json.obj, json!({ "x": 1 }));
        assert_eq!(
            fixture.get_file("vendor/sub/deeper/d.txt").unwrap().content(),
            Some("d".to_string())
        );
        assert!(fixture.get_file("vendor/yarn.lock").is_none());
    }

    #[test]
    fn read_into_honours_custom_ignores() {
        let tree = sample_tree();
        let mut fixture = Project::at("/fixture");

        fixture.read_from(
            tree.path(),
            ImportOptions {
                target: None,
                ignored: Some(vec![".txt".into(), "node_modules".into()]),
            },
        );

        let paths: Vec<_> = fixture.files().iter().map(|f| f.path()).collect();
        assert_eq!(
            paths,
            vec!["/fixture/a.json", "/fixture/broken.json", "/fixture/yarn.lock"]
        );
    }
}
