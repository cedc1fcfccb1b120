//! Bundle model (`.hbm`) parsing
//!
//! The bundle model is the build-time descriptor of an application:
//!
//! ```xml
//! <hemera-bundle-model>
//!   <application-name>sample</application-name>
//!   <shared>
//!     <config-file>shared.xml</config-file>
//!     <dependencies>
//!       <dependency><type>jar-dir</type><value>lib/</value></dependency>
//!     </dependencies>
//!   </shared>
//!   <modules>
//!     <module>
//!       <src-dir>src/</src-dir>
//!       <classname>com.x.M</classname>
//!     </module>
//!   </modules>
//! </hemera-bundle-model>
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use xmltree::Element;

use super::dependency::Dependency;
use super::document::{self, child_elements};
use super::schema::{self, FieldSpec, Fields, optional, required};
use super::{is_plain_name, tags};
use crate::error::{self, Result};

const RESERVED_CLASSNAMES: &[&str] = &["shared", "lib"];

const BUNDLE_FIELDS: &[FieldSpec] = &[
    required(tags::APPLICATION_NAME),
    optional(tags::APPLICATION_PATH),
    optional(tags::SHARED),
    optional(tags::MODULES),
    optional(tags::RESOURCES),
];

const SHARED_FIELDS: &[FieldSpec] = &[
    optional(tags::CONFIG_FILE),
    optional(tags::RESOURCES_DIR),
    optional(tags::DEPENDENCIES),
];

const MODULE_FIELDS: &[FieldSpec] = &[
    required(tags::SOURCE_DIR),
    required(tags::CLASSNAME),
    optional(tags::CONFIG_FILE),
    optional(tags::RESOURCES_DIR),
    optional(tags::DEPENDENCIES),
];

/// Whether an entry was declared under `<modules>` or `<resources>`
///
/// Both variants are structurally identical; the kind only decides which list
/// the entry is written back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Module,
    Resource,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 2] = [ModuleKind::Module, ModuleKind::Resource];

    /// Tag of the list element holding entries of this kind
    pub fn list_tag(self) -> &'static str {
        match self {
            Self::Module => tags::MODULES,
            Self::Resource => tags::RESOURCES,
        }
    }

    /// Tag of a single entry of this kind
    pub fn entry_tag(self) -> &'static str {
        match self {
            Self::Module => tags::MODULE,
            Self::Resource => tags::RESOURCE,
        }
    }
}

/// Cross-module section of a bundle model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shared {
    pub config_file: Option<PathBuf>,
    pub resources_dir: Option<PathBuf>,
    pub dependencies: Vec<Dependency>,
}

/// One module or resource of a bundle model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    pub kind: ModuleKind,
    /// Fully qualified class name; also names the module's archive and directories
    pub classname: String,
    pub source_dir: PathBuf,
    pub config_file: Option<PathBuf>,
    pub resources_dir: Option<PathBuf>,
    pub dependencies: Vec<Dependency>,
}

/// Parsed bundle descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleModel {
    pub application_name: String,
    pub application_path: Option<String>,
    pub shared: Option<Shared>,
    pub modules: Vec<ModuleDescriptor>,
    /// Directory relative paths are resolved against (the descriptor's directory)
    pub base_dir: Option<PathBuf>,
}

impl BundleModel {
    /// Read and parse a descriptor file
    pub fn from_file(path: &Path) -> Result<Self> {
        let root = document::read_file(path)?;
        let mut model = Self::from_element(&root)?;
        model.base_dir = path.parent().map(Path::to_path_buf);
        Ok(model)
    }

    /// Parse a descriptor from a string
    pub fn parse(xml: &str) -> Result<Self> {
        Self::from_element(&document::parse_str(xml, "bundle model")?)
    }

    /// Parse the root `<hemera-bundle-model>` element
    pub fn from_element(root: &Element) -> Result<Self> {
        schema::expect_tag(root, tags::BUNDLE_ROOT)?;
        let fields = schema::validate(root, BUNDLE_FIELDS)?;

        let application_name = fields.required_text(tags::APPLICATION_NAME)?;
        if !is_plain_name(&application_name) {
            return Err(error::model::malformed(
                tags::APPLICATION_NAME,
                format!("'{application_name}' must be a single path component"),
            ));
        }
        let application_path = fields.text(tags::APPLICATION_PATH);
        let shared = fields.child(tags::SHARED).map(parse_shared).transpose()?;
        let modules = parse_module_lists(&fields)?;

        Ok(Self {
            application_name,
            application_path,
            shared,
            modules,
            base_dir: None,
        })
    }

    /// Resolve a declared path against the descriptor's directory
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Shared dependencies, empty when there is no shared section
    pub fn shared_dependencies(&self) -> &[Dependency] {
        self.shared
            .as_ref()
            .map(|shared| shared.dependencies.as_slice())
            .unwrap_or_default()
    }
}

fn parse_shared(element: &Element) -> Result<Shared> {
    let fields = schema::validate(element, SHARED_FIELDS)?;
    Ok(Shared {
        config_file: fields.text(tags::CONFIG_FILE).map(PathBuf::from),
        resources_dir: fields.text(tags::RESOURCES_DIR).map(PathBuf::from),
        dependencies: parse_dependencies(&fields)?,
    })
}

fn parse_dependencies(fields: &Fields<'_>) -> Result<Vec<Dependency>> {
    let Some(list) = fields.child(tags::DEPENDENCIES) else {
        return Ok(Vec::new());
    };
    child_elements(list).map(Dependency::from_element).collect()
}

fn parse_module_lists(fields: &Fields<'_>) -> Result<Vec<ModuleDescriptor>> {
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
            modules.push(parse_module(entry, kind)?);
        }
    }

    if modules.is_empty() {
        return Err(error::model::malformed(
            tags::MODULES,
            "the bundle must declare at least one module or resource",
        ));
    }

    let mut seen = HashSet::new();
    for module in &modules {
        if !seen.insert(module.classname.as_str()) {
            return Err(error::model::malformed(
                tags::CLASSNAME,
                format!("classname '{}' is declared more than once", module.classname),
            ));
        }
    }

    Ok(modules)
}

fn parse_module(element: &Element, kind: ModuleKind) -> Result<ModuleDescriptor> {
    let fields = schema::validate(element, MODULE_FIELDS)?;

    let classname = fields.required_text(tags::CLASSNAME)?;
    if !is_qualified_identifier(&classname) {
        return Err(error::model::malformed(
            tags::CLASSNAME,
            format!("'{classname}' is not a fully qualified class name"),
        ));
    }
    if is_reserved_classname(&classname) {
        return Err(error::model::malformed(
            tags::CLASSNAME,
            format!("'{classname}' is reserved for the application's shared files"),
        ));
    }

    Ok(ModuleDescriptor {
        kind,
        classname,
        source_dir: PathBuf::from(fields.required_text(tags::SOURCE_DIR)?),
        config_file: fields.text(tags::CONFIG_FILE).map(PathBuf::from),
        resources_dir: fields.text(tags::RESOURCES_DIR).map(PathBuf::from),
        dependencies: parse_dependencies(&fields)?,
    })
}

/// Names whose module directory or archive would collide with the shared
/// library directory or the `lib.jar` bundle member
pub fn is_reserved_classname(name: &str) -> bool {
    RESERVED_CLASSNAMES
        .iter()
        .any(|reserved| name.eq_ignore_ascii_case(reserved))
}

/// Dot-separated identifiers, e.g. `com.example.Module`
pub fn is_qualified_identifier(name: &str) -> bool {
    name.split('.').all(|segment| {
        let mut chars = segment.chars();
        chars
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
            && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
    })
}
