//! Turns a real directory into Rust statements that rebuild it as a fixture.
use crate::{
    api::DirectoryApi,
    errors::FixtureError,
    project::Project,
    source::ImportOptions,
    vfs::File,
};
use serde::Serialize;
use serde_json::{
    ser::{CharEscape, Formatter, PrettyFormatter},
    Serializer, Value,
};
use std::{io, path::Path};

// entries are collected under a fixed virtual root and printed relative to it
const CAPTURE_ROOT: &str = "/root";

/// Escapes `content` so it can sit between the double quotes of a Rust string literal.
pub fn escape_content(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());

    for character in content.chars() {
        match character {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }

    escaped
}

/// Pretty JSON whose string escapes are also valid inside a Rust string literal.
///
/// JSON spells control characters as `\u00XX`, `\b` and `\f`; Rust only accepts `\u{XX}`.
struct RustLiteralFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for RustLiteralFormatter<'_> {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }
    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }
    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }
    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }
    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }
    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }
    fn end_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_key(writer)
    }
    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }
    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
    fn write_char_escape<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        char_escape: CharEscape,
    ) -> io::Result<()> {
        match char_escape {
            CharEscape::Backspace => writer.write_all(b"\\u{08}"),
            CharEscape::FormFeed => writer.write_all(b"\\u{0c}"),
            CharEscape::AsciiControl(byte) => write!(writer, "\\u{{{:02x}}}", byte),
            other => self.0.write_char_escape(writer, other),
        }
    }
}

/// Tab indented JSON, usable as the body of a `serde_json::json!` invocation.
fn json_literal(path: &str, obj: &Value) -> Result<String, FixtureError> {
    let mut buffer = Vec::new();
    let formatter = RustLiteralFormatter(PrettyFormatter::with_indent(b"\t"));
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);

    obj.serialize(&mut serializer)
        .map_err(|source| FixtureError::Serialize {
            path: path.to_string(),
            source,
        })?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Renders the statements that rebuild `fixture`.
///
/// `name` is used for the named project; with `use_temp` a temporary project is created
/// instead.
pub fn render(fixture: &Project, name: &str, use_temp: bool) -> Result<String, FixtureError> {
    let mut out = if use_temp {
        vec![
            "use fs_fixture::{tempdir_project, DirectoryApi};".to_string(),
            String::new(),
            "let mut fixture = tempdir_project(\"\").unwrap();".to_string(),
        ]
    } else {
        vec![
            "use fs_fixture::{project, DirectoryApi};".to_string(),
            String::new(),
            format!("let mut fixture = project(\"{}\");", escape_content(name)),
        ]
    };

    for entry in fixture.files() {
        let relative = relative_to(fixture.cwd(), entry.path());

        let statement = match entry {
            File::Json(file) => format!(
                "fixture.add_json_file(\"{}\", serde_json::json!({}));",
                relative,
                json_literal(&file.path, &file.obj)?
            ),
            File::String(file) => format!(
                "fixture.add_file(\"{}\", \"{}\");",
                relative,
                escape_content(&file.content)
            ),
            File::Custom(file) => format!(
                "fixture.add_file(\"{}\", \"{}\");",
                relative,
                escape_content(&file.content())
            ),
            File::Symlink(link) => format!(
                "fixture.add_symlink(\"{}\", \"{}\");",
                relative,
                relative_to(fixture.cwd(), &link.target)
            ),
        };

        out.push(statement);
    }

    Ok(out.join("\n"))
}

/// Imports the tree at `root` (skipping the default ignore list) and renders it.
pub fn capture(root: &Path, use_temp: bool) -> Result<String, FixtureError> {
    let mut fixture = Project::at(CAPTURE_ROOT);

    fixture.read_from(root, ImportOptions::default());

    let name = root
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    render(&fixture, &name, use_temp)
}

fn relative_to(cwd: &str, path: &str) -> String {
    let relative = michi::relative(cwd, path).unwrap_or_else(|_| path.to_string());

    escape_content(&relative)
}
