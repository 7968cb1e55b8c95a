//! Attribute parsing
//!
//! Parses the attribute list between an element name and its closing
//! `>` or `/>`. Lenient: junk bytes are skipped, a bare name gets an empty
//! value and an unquoted value runs to the next whitespace.

use super::scanner::{is_name_char, is_name_start_char, is_whitespace};
use crate::dom::Attributes;
use crate::entities::decode_text;

/// Parse raw tag text after the element name
pub fn parse_attributes(input: &str) -> Attributes {
    let bytes = input.as_bytes();
    let mut attrs = Attributes::new();
    let mut pos = 0;

    while pos < bytes.len() {
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] == b'/' || bytes[pos] == b'>' {
            break;
        }

        if !is_name_start_char(bytes[pos]) {
            pos += 1;
            continue;
        }
        let name_start = pos;
        while pos < bytes.len() && is_name_char(bytes[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= bytes.len() || bytes[pos] != b'=' {
            attrs.insert(name, "");
            continue;
        }
        pos += 1;
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= bytes.len() {
            attrs.insert(name, "");
            break;
        }

        let quote = bytes[pos];
        let (value_start, value_end) = if quote == b'"' || quote == b'\'' {
            pos += 1;
            let start = pos;
            while pos < bytes.len() && bytes[pos] != quote {
                pos += 1;
            }
            let end = pos;
            if pos < bytes.len() {
                pos += 1;
            }
            (start, end)
        } else {
            let start = pos;
            while pos < bytes.len() && !is_whitespace(bytes[pos]) && bytes[pos] != b'/' {
                pos += 1;
            }
            (start, pos)
        };
        attrs.insert(name, decode_text(&input[value_start..value_end]));
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(attrs: &Attributes) -> Vec<(&str, &str)> {
        attrs.iter().collect()
    }

    #[test]
    fn test_quoted_values() {
        let attrs = parse_attributes(r#" id="1" class='a b' "#);
        assert_eq!(pairs(&attrs), vec![("id", "1"), ("class", "a b")]);
    }

    #[test]
    fn test_entities_in_values() {
        let attrs = parse_attributes(r#" q="&lt;&amp;&#65;""#);
        assert_eq!(attrs.get("q"), Some("<&A"));
    }

    #[test]
    fn test_lenient_forms() {
        let attrs = parse_attributes(r#" checked x = 5 y="z"/"#);
        assert_eq!(pairs(&attrs), vec![("checked", ""), ("x", "5"), ("y", "z")]);
    }

    #[test]
    fn test_prefixed_names_are_plain_strings() {
        let attrs = parse_attributes(r#" xmlns:x="urn:a" x:k="v""#);
        assert_eq!(attrs.get("x:k"), Some("v"));
        assert_eq!(attrs.len(), 2);
    }
}
