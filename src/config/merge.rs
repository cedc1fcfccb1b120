//! Module configuration merging
//!
//! A module's configuration document is combined with the bundle's shared
//! configuration before packaging:
//!
//! | local   | shared  | result                                               |
//! |---------|---------|------------------------------------------------------|
//! | absent  | absent  | nothing                                              |
//! | present | absent  | local document unchanged                             |
//! | absent  | present | new `<classname>` root holding shared's children     |
//! | present | present | local children followed by shared's children         |

use std::path::{Path, PathBuf};

use xmltree::Element;

use crate::error::{self, Result};
use crate::model::document;

/// Result of a merge, ready to be written next to the module's class archive
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// Local file's base name, or `<classname>.xml` when there was no local file
    pub file_name: String,
    pub document: Element,
}

impl MergedConfig {
    /// Write the merged document into `dir`; returns the written path
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        document::write_file(&self.document, &path)?;
        Ok(path)
    }
}

/// Read a configuration document, reporting a missing file as a configuration error
pub fn load_config(path: &Path) -> Result<Element> {
    if !path.is_file() {
        return Err(error::config::not_found(path.display().to_string()));
    }
    document::read_file(path)
}

/// Merge a module's local configuration with the shared configuration
///
/// The shared document is only read; it is reused for every module.
pub fn merge(
    local: Option<&Path>,
    shared: Option<&Element>,
    classname: &str,
) -> Result<Option<MergedConfig>> {
    let merged = match (local, shared) {
        (None, None) => return Ok(None),
        (Some(path), shared) => {
            let mut root = load_config(path)?;
            if let Some(shared) = shared {
                append_children(&mut root, shared);
            }
            MergedConfig {
                file_name: crate::common::fs::file_name_string(path),
                document: root,
            }
        }
        (None, Some(shared)) => {
            let mut root = Element::new(classname);
            append_children(&mut root, shared);
            MergedConfig {
                file_name: format!("{classname}.xml"),
                document: root,
            }
        }
    };

    tracing::debug!("Merged configuration for {classname} into {}", merged.file_name);
    Ok(Some(merged))
}

fn append_children(root: &mut Element, shared: &Element) {
    root.children.retain(document::is_significant);
    root.children.extend(
        shared
            .children
            .iter()
            .filter(|node| document::is_significant(node))
            .cloned(),
    );
}
