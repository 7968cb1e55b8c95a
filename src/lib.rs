//! xmlcursor - Persistent cursors over XML trees
//!
//! Layers:
//! - `dom`: elements with mixed content, shared immutable subtrees
//! - `cursor`: the `Location` zipper and `Path` addressing
//! - `query`: step-sequence queries (`select`, `select_first`, ...)
//! - `edit`: tag, text and attribute edits, insertion, move and copy
//! - `writer`: canonical text output and file/stream sinks
//! - `loader`: lenient XML text input
//!
//! ```
//! use xmlcursor::{parse, Query};
//!
//! let doc = parse("<a><b>1</b><b>2</b></a>").unwrap();
//! let root = doc.cursor();
//! let second = root.select_first(Query::new().tag("b").index(1)).unwrap();
//! let edited = second.edit_text("two", false).unwrap();
//! assert_eq!(edited.tree().text_content(), "1two");
//! ```

pub mod cursor;
pub mod dom;
pub mod edit;
mod entities;
pub mod error;
pub mod loader;
pub mod query;
pub mod writer;

pub use cursor::{path, path_with, Location, Path, PathOptions, PathStep};
pub use dom::{make_node, Attributes, Body, Content, Node};
pub use edit::{copy_node, move_node, Position};
pub use error::{Error, Result};
pub use loader::{parse, parse_with, LoadOptions};
pub use query::{predicates, Matches, Predicate, Query, Step};
pub use writer::{to_xml_string, to_xml_string_with, write_file, write_to, WriteOptions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_query_edit_write() {
        let doc = parse(r#"<list><item id="1">a</item><item id="2">b</item></list>"#).unwrap();
        let root = doc.clone().cursor();
        let item = root
            .select_first(Query::new().tag("item").filter(predicates::attr_eq("id", "2")))
            .unwrap();
        let edited = item
            .edit_attrs([("state", "done")], ["id"])
            .unwrap()
            .insert_right(make_node("item", [("id", "3")], "c").unwrap())
            .unwrap();

        let expected = "\
<?xml version=\"1.0\" encoding=\"utf-8\"?>
<list>
    <item id=\"1\">a</item>
    <item state=\"done\">b</item>
    <item id=\"3\">c</item>
</list>
";
        assert_eq!(to_xml_string(&edited.tree()), expected);
        assert_eq!(root.tree(), doc);
    }

    #[test]
    fn test_paths_survive_rebuilds() {
        let doc = parse("<a><b>1</b><b>2</b><b>3</b></a>").unwrap();
        let third = doc.cursor().child(2).unwrap();
        let p = third.path();

        let renamed = third.left().unwrap().edit_tag("c").unwrap();
        // Renaming a same-tag sibling changes the ordinal, so the path no longer matches
        assert!(renamed.locate(&p).is_none());

        let widened = third.edit_attrs([("k", "v")], Vec::<&str>::new()).unwrap();
        let found = widened.locate(&p).unwrap();
        assert_eq!(found.node().unwrap().attr("k"), Some("v"));
    }
}
