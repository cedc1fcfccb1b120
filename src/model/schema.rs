//! Declarative tag validation
//!
//! Each element type of a model document is described by a table of
//! [`FieldSpec`]s. [`validate`] checks the cardinality of every listed tag among
//! the element's direct children in one pass and returns a [`Fields`] view for
//! reading the validated values.

use xmltree::Element;

use super::document::child_elements;
use crate::error::{self, Result};

/// How many times a tag may appear under its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly once
    Required,
    /// Zero or one time
    Optional,
}

/// A tag and its allowed cardinality
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub tag: &'static str,
    pub cardinality: Cardinality,
}

pub const fn required(tag: &'static str) -> FieldSpec {
    FieldSpec {
        tag,
        cardinality: Cardinality::Required,
    }
}

pub const fn optional(tag: &'static str) -> FieldSpec {
    FieldSpec {
        tag,
        cardinality: Cardinality::Optional,
    }
}

/// Check that an element carries the expected tag name (ASCII case-insensitive)
pub fn expect_tag(element: &Element, expected: &str) -> Result<()> {
    if element.name.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(error::model::malformed(
            expected,
            format!("expected <{expected}>, found <{}>", element.name),
        ))
    }
}

/// Validate the direct children of `element` against a field table
pub fn validate<'a>(element: &'a Element, fields: &[FieldSpec]) -> Result<Fields<'a>> {
    for spec in fields {
        let count = child_elements(element)
            .filter(|child| child.name == spec.tag)
            .count();

        match (spec.cardinality, count) {
            (Cardinality::Required, 1) | (Cardinality::Optional, 0 | 1) => {}
            (Cardinality::Required, found) => {
                return Err(error::model::malformed(
                    spec.tag,
                    format!(
                        "<{}> must contain exactly one <{}>, found {found}",
                        element.name, spec.tag
                    ),
                ));
            }
            (Cardinality::Optional, found) => {
                return Err(error::model::malformed(
                    spec.tag,
                    format!(
                        "<{}> may contain at most one <{}>, found {found}",
                        element.name, spec.tag
                    ),
                ));
            }
        }
    }

    Ok(Fields { element })
}

/// Validated view over an element's children
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    element: &'a Element,
}

impl<'a> Fields<'a> {
    /// The child element with the given tag, if present
    pub fn child(&self, tag: &str) -> Option<&'a Element> {
        child_elements(self.element).find(|child| child.name == tag)
    }

    /// Trimmed text of an optional tag; empty text counts as absent
    pub fn text(&self, tag: &str) -> Option<String> {
        self.child(tag)
            .and_then(|child| child.get_text())
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    }

    /// Trimmed text of a required tag; must not be empty
    pub fn required_text(&self, tag: &str) -> Result<String> {
        self.text(tag).ok_or_else(|| {
            error::model::malformed(
                tag,
                format!("<{tag}> in <{}> must not be empty", self.element.name),
            )
        })
    }
}
