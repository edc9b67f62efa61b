// lexical path algebra modelled on the POSIX flavour of node's `path` module.
// Nothing here touches the filesystem: symlinks are not resolved and `..` is
// collapsed purely on the string.
use errors::PathError;
pub mod errors;

const SEPARATOR: char = '/';

/// Splits `path` into its meaningful segments, resolving `.` and `..` along the way.
///
/// Leading `..` segments survive for relative paths; for absolute paths they are
/// dropped because nothing sits above the root.
fn segments(path: &str, is_absolute: bool) -> Vec<&str> {
    let mut stack: Vec<&str> = Vec::new();

    for segment in path.split(SEPARATOR) {
        match segment {
            "" | "." => {}
            ".." => match stack.last() {
                Some(last) if *last != ".." => {
                    stack.pop();
                }
                _ if !is_absolute => stack.push(".."),
                _ => {}
            },
            other => stack.push(other),
        }
    }

    stack
}

/// Returns `true` when `path` starts at the root.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with(SEPARATOR)
}

/// Normalizes `path` lexically.
///
/// # Example
/// ```
/// assert_eq!(michi::normalize("/a//b/./c/../d/"), "/a/b/d/");
/// assert_eq!(michi::normalize("../a/.."), "..");
/// assert_eq!(michi::normalize(""), ".");
/// ```
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = is_absolute(path);
    let trailing = path.ends_with(SEPARATOR);

    let mut normalized = segments(path, absolute).join("/");

    if normalized.is_empty() && !absolute {
        normalized.push('.');
    }
    if !normalized.is_empty() && trailing {
        normalized.push(SEPARATOR);
    }

    if absolute {
        format!("/{}", normalized)
    } else {
        normalized
    }
}

/// Joins `rest` onto `base` and normalizes the result.
///
/// Unlike [`std::path::Path::join`], an absolute `rest` is appended to `base`
/// instead of replacing it, so nested scopes always stay below their parent.
///
/// # Example
/// ```
/// assert_eq!(michi::join("/tmp/fixture", "src/lib.rs"), "/tmp/fixture/src/lib.rs");
/// assert_eq!(michi::join("/tmp/fixture", "/abs"), "/tmp/fixture/abs");
/// assert_eq!(michi::join("", ""), ".");
/// ```
pub fn join(base: &str, rest: &str) -> String {
    let joined = [base, rest]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        return ".".to_string();
    }

    normalize(&joined)
}

/// Computes the path leading from `from` to `to`.
///
/// Returns an empty string when both point at the same location. Both paths must
/// share the same kind of root; relating an absolute path to a relative one is a
/// [`PathError::MixedRoots`] error since no working directory is consulted.
///
/// # Example
/// ```
/// assert_eq!(michi::relative("/root", "/root/a/b.json").unwrap(), "a/b.json");
/// assert_eq!(michi::relative("/root/a", "/root/b").unwrap(), "../b");
/// assert!(michi::relative("/root", "root").is_err());
/// ```
pub fn relative(from: &str, to: &str) -> Result<String, PathError> {
    let absolute = is_absolute(from);

    if absolute != is_absolute(to) {
        return Err(PathError::MixedRoots {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let from_segments = segments(from, absolute);
    let to_segments = segments(to, absolute);

    let common = from_segments
        .iter()
        .zip(to_segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_segments.len() - common];
    parts.extend_from_slice(&to_segments[common..]);

    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_separators_and_dots() {
        assert_eq!(normalize("a//b/./c"), "a/b/c");
        assert_eq!(normalize("/a/b/../c"), "/a/c");
        assert_eq!(normalize("/../a"), "/a");
        assert_eq!(normalize("../../a"), "../../a");
        assert_eq!(normalize("a/../.."), "..");
    }

    #[test]
    fn test_normalize_keeps_trailing_separator() {
        assert_eq!(normalize("a/b/"), "a/b/");
        assert_eq!(normalize("./"), "./");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("//"), "/");
    }

    #[test]
    fn test_normalize_empty_is_current_dir() {
        assert_eq!(normalize(""), ".");
        assert_eq!(normalize("a/.."), ".");
    }

    #[test]
    fn test_join_composes_nested_prefixes() {
        let root = join("/tmp/project", "src");
        let nested = join(&root, "deep/er");

        assert_eq!(nested, "/tmp/project/src/deep/er");
        assert_eq!(join(&nested, "../file.txt"), "/tmp/project/src/deep/file.txt");
    }

    #[test]
    fn test_join_ignores_empty_parts() {
        assert_eq!(join("/tmp/project", ""), "/tmp/project");
        assert_eq!(join("", "file.txt"), "file.txt");
        assert_eq!(join("", ""), ".");
    }

    #[test]
    fn test_join_appends_absolute_rest() {
        assert_eq!(join("/a", "/b/c"), "/a/b/c");
    }

    #[test]
    fn test_relative_descends_and_climbs() {
        assert_eq!(relative("/root", "/root/x/y.txt").unwrap(), "x/y.txt");
        assert_eq!(relative("/root/x", "/root").unwrap(), "..");
        assert_eq!(relative("/a/b/c", "/a/d").unwrap(), "../../d");
        assert_eq!(relative("a", "a/b").unwrap(), "b");
    }

    #[test]
    fn test_relative_same_path_is_empty() {
        assert_eq!(relative("/root/", "/root").unwrap(), "");
    }

    #[test]
    fn test_relative_rejects_mixed_roots() {
        let error = relative("/root", "root").unwrap_err();

        assert_eq!(
            error,
            PathError::MixedRoots {
                from: "/root".to_string(),
                to: "root".to_string()
            }
        );
    }
}
