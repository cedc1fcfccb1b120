//! Application model (`.ham`) parsing and serialization
//!
//! The application model only carries what a host needs at runtime. Paths are
//! kept as strings because they contain the `{APPDIR}` placeholder until the
//! model is installed.

use std::path::Path;

use xmltree::{Element, XMLNode};

use super::bundle::ModuleKind;
use super::document::{self, child_elements, text_element};
use super::schema::{self, FieldSpec, optional, required};
use super::{substitute_appdir, tags};
use crate::error::{self, Result};

const APPLICATION_FIELDS: &[FieldSpec] = &[
    required(tags::APPLICATION_NAME),
    optional(tags::APPLICATION_PATH),
    optional(tags::SHARED),
    optional(tags::MODULES),
    optional(tags::RESOURCES),
];

const SHARED_FIELDS: &[FieldSpec] = &[required(tags::LIB_DIR), optional(tags::RESOURCES_DIR)];

const MODULE_FIELDS: &[FieldSpec] = &[
    required(tags::CLASSNAME),
    optional(tags::CONFIG_FILE),
    optional(tags::RESOURCES_DIR),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppShared {
    pub lib_dir: String,
    pub resources_dir: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppModule {
    pub kind: ModuleKind,
    pub classname: String,
    pub config_file: Option<String>,
    pub resources_dir: Option<String>,
}

/// Deploy-time description of an application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationModel {
    pub application_name: String,
    pub application_path: Option<String>,
    pub shared: Option<AppShared>,
    pub modules: Vec<AppModule>,
}

impl ApplicationModel {
    pub fn parse(xml: &str) -> Result<Self> {
        Self::from_element(&document::parse_str(xml, "application model")?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_element(&document::read_file(path)?)
    }

    /// Parse the root `<hemera-application-model>` element
    pub fn from_element(root: &Element) -> Result<Self> {
        schema::expect_tag(root, tags::APPLICATION_ROOT)?;
        let fields = schema::validate(root, APPLICATION_FIELDS)?;

        let shared = match fields.child(tags::SHARED) {
            Some(element) => {
                let shared = schema::validate(element, SHARED_FIELDS)?;
                Some(AppShared {
                    lib_dir: shared.required_text(tags::LIB_DIR)?,
                    resources_dir: shared.text(tags::RESOURCES_DIR),
                })
            }
            None => None,
        };

        let mut modules = Vec::new();
        for kind in ModuleKind::ALL {
            let Some(list) = fields.child(kind.list_tag()) else {
                continue;
            };
            for entry in child_elements(list) {
                if entry.name != kind.entry_tag() {
                    return Err(error::model::malformed(
                        entry.name.clone(),
                        format!(
                            "<{}> may only contain <{}> entries",
                            kind.list_tag(),
                            kind.entry_tag()
                        ),
                    ));
                }
                let module = schema::validate(entry, MODULE_FIELDS)?;
                modules.push(AppModule {
                    kind,
                    classname: module.required_text(tags::CLASSNAME)?,
                    config_file: module.text(tags::CONFIG_FILE),
                    resources_dir: module.text(tags::RESOURCES_DIR),
                });
            }
        }

        if modules.is_empty() {
            return Err(error::model::malformed(
                tags::MODULES,
                "the application must declare at least one module or resource",
            ));
        }

        Ok(Self {
            application_name: fields.required_text(tags::APPLICATION_NAME)?,
            application_path: fields.text(tags::APPLICATION_PATH),
            shared,
            modules,
        })
    }

    /// Build the document tree; element order follows the parse tables
    pub fn to_element(&self) -> Element {
        let mut root = Element::new(tags::APPLICATION_ROOT);
        push(
            &mut root,
            text_element(tags::APPLICATION_NAME, &self.application_name),
        );
        if let Some(path) = &self.application_path {
            push(&mut root, text_element(tags::APPLICATION_PATH, path));
        }

        if let Some(shared) = &self.shared {
            let mut element = Element::new(tags::SHARED);
            push(&mut element, text_element(tags::LIB_DIR, &shared.lib_dir));
            if let Some(dir) = &shared.resources_dir {
                push(&mut element, text_element(tags::RESOURCES_DIR, dir));
            }
            push(&mut root, element);
        }

        for kind in ModuleKind::ALL {
            let entries: Vec<_> = self.modules.iter().filter(|m| m.kind == kind).collect();
            if entries.is_empty() {
                continue;
            }
            let mut list = Element::new(kind.list_tag());
            for module in entries {
                let mut entry = Element::new(kind.entry_tag());
                push(&mut entry, text_element(tags::CLASSNAME, &module.classname));
                if let Some(file) = &module.config_file {
                    push(&mut entry, text_element(tags::CONFIG_FILE, file));
                }
                if let Some(dir) = &module.resources_dir {
                    push(&mut entry, text_element(tags::RESOURCES_DIR, dir));
                }
                push(&mut list, entry);
            }
            push(&mut root, list);
        }

        root
    }

    /// Copy with the placeholder in every path replaced by `app_dir`
    pub fn with_appdir(&self, app_dir: &Path) -> Self {
        let resolve = |value: &String| substitute_appdir(value, app_dir);
        Self {
            application_name: self.application_name.clone(),
            application_path: self.application_path.as_ref().map(resolve),
            shared: self.shared.as_ref().map(|shared| AppShared {
                lib_dir: resolve(&shared.lib_dir),
                resources_dir: shared.resources_dir.as_ref().map(resolve),
            }),
            modules: self
                .modules
                .iter()
                .map(|module| AppModule {
                    kind: module.kind,
                    classname: module.classname.clone(),
                    config_file: module.config_file.as_ref().map(resolve),
                    resources_dir: module.resources_dir.as_ref().map(resolve),
                })
                .collect(),
        }
    }

    pub fn to_xml_string(&self) -> Result<String> {
        document::to_string(&self.to_element())
    }

    /// Serialize the model to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        document::write_file(&self.to_element(), path)
    }
}

fn push(parent: &mut Element, child: Element) {
    parent.children.push(XMLNode::Element(child));
}
