//! Output sink
//!
//! The serializer builds one complete text blob; the sink hands it to a
//! file or stream in a single write.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::{to_xml_string_with, WriteOptions};
use crate::dom::Node;
use crate::error::Result;

/// Write `node` to the file at `path`, replacing its contents
pub fn write_file(node: &Node, path: impl AsRef<Path>) -> Result<()> {
    write_file_with(node, path, &WriteOptions::default())
}

/// Write `node` to the file at `path` with explicit options
pub fn write_file_with(node: &Node, path: impl AsRef<Path>, options: &WriteOptions) -> Result<()> {
    let path = path.as_ref();
    let text = to_xml_string_with(node, options);
    debug!(path = %path.display(), bytes = text.len(), "Writing XML file");
    fs::write(path, text)?;
    Ok(())
}

/// Write `node` to `writer`
pub fn write_to<W: Write>(node: &Node, writer: W) -> Result<()> {
    write_to_with(node, writer, &WriteOptions::default())
}

/// Write `node` to `writer` with explicit options
pub fn write_to_with<W: Write>(node: &Node, mut writer: W, options: &WriteOptions) -> Result<()> {
    let text = to_xml_string_with(node, options);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn sample() -> Node {
        Node::new("a")
            .unwrap()
            .with_attr("k", "v")
            .with_child(Node::new("b").unwrap().with_child("text"))
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xml");
        write_file(&sample(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, sample().to_xml_string());
        assert!(written.starts_with("<?xml"));
    }

    #[test]
    fn test_write_file_replaces_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"stale contents that are longer than the output").unwrap();
        let options = WriteOptions {
            declaration: false,
            ..WriteOptions::default()
        };
        write_file_with(&Node::new("x").unwrap(), file.path(), &options).unwrap();
        assert_eq!(fs::read_to_string(file.path()).unwrap(), "<x/>\n");
    }

    #[test]
    fn test_write_to_stream() {
        let mut buffer = Vec::new();
        write_to(&sample(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), sample().to_xml_string());
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xml");
        assert!(matches!(write_file(&sample(), &path), Err(Error::Io(_))));
    }
}
