//! XML document reading and writing

use std::fs;
use std::path::Path;

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::{self, Result};

/// Parse an XML document from a string; `origin` names the source in errors
pub fn parse_str(xml: &str, origin: &str) -> Result<Element> {
    Element::parse(xml.as_bytes()).map_err(|e| error::model::parse_failed(origin, e.to_string()))
}

/// Read and parse an XML document from disk
pub fn read_file(path: &Path) -> Result<Element> {
    if !path.is_file() {
        return Err(error::fs::not_found(path));
    }
    let content = fs::read_to_string(path).map_err(|e| error::fs::read_failed(path, e))?;
    parse_str(&content, &path.display().to_string())
}

/// Serialize an element as an indented XML document
pub fn to_string(element: &Element) -> Result<String> {
    let mut buffer = Vec::new();
    element
        .write_with_config(&mut buffer, EmitterConfig::new().perform_indent(true))
        .map_err(|e| error::fs::io_error(format!("Failed to serialize <{}>: {e}", element.name)))?;
    String::from_utf8(buffer).map_err(|e| error::fs::io_error(e.to_string()))
}

/// Serialize an element to a file, creating parent directories
pub fn write_file(element: &Element, path: &Path) -> Result<()> {
    let content = to_string(element)?;
    crate::common::fs::ensure_parent_dir(path)?;
    fs::write(path, content).map_err(|e| error::fs::write_failed(path, e))
}

/// Iterate over the direct child elements of an element
pub fn child_elements(element: &Element) -> impl Iterator<Item = &Element> {
    element.children.iter().filter_map(XMLNode::as_element)
}

/// Build `<name>value</name>`
pub fn text_element(name: &str, value: &str) -> Element {
    let mut element = Element::new(name);
    element.children.push(XMLNode::Text(value.to_string()));
    element
}

/// Whether a node carries content (whitespace-only text does not)
pub fn is_significant(node: &XMLNode) -> bool {
    match node {
        XMLNode::Text(text) => !text.trim().is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_iterate_children() {
        let root = parse_str("<root>\n  <a/>\n  <b>text</b>\n</root>", "inline").unwrap();
        let names: Vec<_> = child_elements(&root).map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_parse_invalid_xml() {
        let err = parse_str("<root><unclosed></root>", "broken.xml").unwrap_err();
        assert!(err.to_string().contains("broken.xml"));
    }

    #[test]
    fn test_read_missing_file() {
        let temp = crate::test_fixtures::create_temp_dir();
        let err = read_file(&temp.path().join("missing.xml")).unwrap_err();
        assert!(matches!(err, crate::error::HemeraError::FileNotFound { .. }));
    }

    #[test]
    fn test_write_then_read_file() {
        let temp = crate::test_fixtures::create_temp_dir();
        let path = temp.path().join("nested/doc.xml");

        let mut root = Element::new("root");
        root.children
            .push(XMLNode::Element(text_element("name", "value")));
        write_file(&root, &path).unwrap();

        let read = read_file(&path).unwrap();
        let child = read.get_child("name").unwrap();
        assert_eq!(child.get_text().unwrap(), "value");
    }

    #[test]
    fn test_is_significant() {
        assert!(!is_significant(&XMLNode::Text("  \n ".to_string())));
        assert!(is_significant(&XMLNode::Text("x".to_string())));
        assert!(is_significant(&XMLNode::Element(Element::new("a"))));
    }
}
