//! Inspect command implementation

use std::fmt::Write;
use std::path::Path;

use console::Style;

use crate::cli::InspectArgs;
use crate::error::{self, Result};
use crate::model::{BUNDLE_EXTENSION, BundleModel, generate};
use crate::package::BundleManifest;
use crate::toolchain::{Archiver, ZipArchiver};

/// Print a descriptor's generated application model or a bundle's manifest
pub fn run(args: InspectArgs) -> Result<()> {
    let is_bundle = args
        .path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(BUNDLE_EXTENSION));

    if is_bundle {
        print!("{}", describe_bundle(&ZipArchiver, &args.path)?);
    } else {
        println!("{}", describe_descriptor(&args.path)?);
    }
    Ok(())
}

/// The application model a descriptor generates, as XML
pub fn describe_descriptor(path: &Path) -> Result<String> {
    let bundle = BundleModel::from_file(path)?;
    generate(&bundle).to_xml_string()
}

/// Manifest attributes and members of a bundle archive
pub fn describe_bundle(archiver: &dyn Archiver, path: &Path) -> Result<String> {
    let manifest = archiver.read_manifest(path)?.ok_or_else(|| {
        error::deploy::validation_failed(format!("'{}' has no manifest", path.display()))
    })?;
    let bundle = BundleManifest::from_manifest(&manifest)?;

    let bold = Style::new().bold();
    let mut out = String::new();
    let _ = writeln!(out, "{}", bold.apply_to("Manifest:"));
    for (key, value) in manifest.iter() {
        let _ = writeln!(out, "  {key}: {value}");
    }
    let _ = writeln!(out, "{}", bold.apply_to("Modules:"));
    for module in &bundle.modules {
        let _ = writeln!(out, "  {}", Style::new().cyan().apply_to(module));
    }
    let _ = writeln!(out, "{}", bold.apply_to("Members:"));
    for member in archiver.list_members(path)? {
        let _ = writeln!(out, "  {}", Style::new().dim().apply_to(member));
    }
    Ok(out)
}
