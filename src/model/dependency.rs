//! Dependency declarations
//!
//! A dependency either points at a directory of ready archives or at a source
//! directory that has to be compiled and archived before use.

use std::fmt;
use std::path::{Path, PathBuf};

use xmltree::Element;

use super::schema::{self, FieldSpec, optional, required};
use super::tags;
use crate::error::{self, Result};

const DEPENDENCY_FIELDS: &[FieldSpec] = &[
    required(tags::TYPE),
    required(tags::VALUE),
    optional(tags::LIB_DIR),
];

/// The two kinds of dependency a descriptor may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    /// `jar-dir`: a directory already containing archives
    ArchiveDirectory,
    /// `src-dir`: sources compiled into a single archive
    SourceDirectory,
}

impl DependencyKind {
    /// Map a `type` value onto a kind; unknown strings yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "jar-dir" => Some(Self::ArchiveDirectory),
            "src-dir" => Some(Self::SourceDirectory),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArchiveDirectory => "jar-dir",
            Self::SourceDirectory => "src-dir",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dependency declaration from a bundle descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    ArchiveDirectory {
        path: PathBuf,
    },
    SourceDirectory {
        path: PathBuf,
        lib_dir: Option<PathBuf>,
    },
}

impl Dependency {
    /// Create a dependency on a directory of archives
    pub fn archive_dir(path: impl Into<PathBuf>) -> Self {
        Self::ArchiveDirectory { path: path.into() }
    }

    /// Create a dependency on a source directory
    pub fn source_dir(path: impl Into<PathBuf>, lib_dir: Option<PathBuf>) -> Self {
        Self::SourceDirectory {
            path: path.into(),
            lib_dir,
        }
    }

    /// Parse a `<dependency>` element
    pub fn from_element(element: &Element) -> Result<Self> {
        schema::expect_tag(element, tags::DEPENDENCY)?;
        let fields = schema::validate(element, DEPENDENCY_FIELDS)?;

        let type_value = fields.required_text(tags::TYPE)?;
        let path = PathBuf::from(fields.required_text(tags::VALUE)?);

        let kind = DependencyKind::parse(&type_value).ok_or_else(|| {
            error::model::malformed(
                tags::TYPE,
                format!("unknown dependency type '{type_value}', expected 'jar-dir' or 'src-dir'"),
            )
        })?;

        Ok(match kind {
            DependencyKind::ArchiveDirectory => Self::ArchiveDirectory { path },
            DependencyKind::SourceDirectory => Self::SourceDirectory {
                path,
                lib_dir: fields.text(tags::LIB_DIR).map(PathBuf::from),
            },
        })
    }

    pub fn kind(&self) -> DependencyKind {
        match self {
            Self::ArchiveDirectory { .. } => DependencyKind::ArchiveDirectory,
            Self::SourceDirectory { .. } => DependencyKind::SourceDirectory,
        }
    }

    /// The declared directory of this dependency
    pub fn path(&self) -> &Path {
        match self {
            Self::ArchiveDirectory { path } | Self::SourceDirectory { path, .. } => path,
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.path().display())
    }
}

/// Deterministic archive name for a compiled source directory
///
/// `lib/util/src/` becomes `lib.util.src.jar`; the same declared path always
/// yields the same name.
pub fn source_archive_name(path: &Path) -> String {
    let declared = path.to_string_lossy();
    let stem = declared
        .trim_end_matches(['/', '\\'])
        .replace(['/', '\\'], ".");
    let stem = stem.trim_start_matches('.');
    format!("{stem}.jar")
}
