//! Test fixtures and utilities for reducing test setup duplication.
//!
//! ```ignore
//! use crate::test_fixtures::{FakeCompiler, create_temp_dir, write_file};
//!
//! let temp = create_temp_dir();
//! write_file(&temp.path().join("src/com/x/M.java"), "class M {}");
//! let compiler = FakeCompiler::default();
//! ```

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{self, Result};
use crate::toolchain::compiler::collect_files;
use crate::toolchain::{Compiler, ServiceController};

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Write a file, creating its parent directories.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().expect("path has a parent")).expect("create parent dir");
    fs::write(path, content).expect("write file");
}

/// Compiler that "compiles" `X.java` into `X.class` by copying it
#[derive(Default)]
pub struct FakeCompiler {
    /// When set, every compilation fails with this diagnostic
    pub failure: Option<String>,
    /// Source directories compiled so far, with their classpath
    pub calls: RefCell<Vec<(PathBuf, Vec<PathBuf>)>>,
}

impl FakeCompiler {
    pub fn failing(diagnostic: &str) -> Self {
        Self {
            failure: Some(diagnostic.to_string()),
            ..Self::default()
        }
    }

    pub fn compiled_dirs(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|(dir, _)| dir.clone()).collect()
    }
}

impl Compiler for FakeCompiler {
    fn compile(
        &self,
        source_dir: &Path,
        classpath: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        self.calls
            .borrow_mut()
            .push((source_dir.to_path_buf(), classpath.to_vec()));

        if let Some(diagnostic) = &self.failure {
            return Err(error::build::compile_failed(
                source_dir.display().to_string(),
                diagnostic.clone(),
            ));
        }
        if !source_dir.is_dir() {
            return Err(error::fs::not_found(source_dir));
        }

        fs::create_dir_all(output_dir)?;
        let mut classes = Vec::new();
        for source in collect_files(source_dir, "java") {
            let Ok(relative) = source.strip_prefix(source_dir) else {
                continue;
            };
            let class = output_dir.join(relative).with_extension("class");
            if let Some(parent) = class.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&source, &class)?;
            classes.push(class);
        }
        Ok(classes)
    }
}

/// Controller recording the actions it was asked to perform
#[derive(Default)]
pub struct FakeController {
    pub actions: RefCell<Vec<&'static str>>,
    pub fail_start: Cell<bool>,
}

impl FakeController {
    pub fn actions(&self) -> Vec<&'static str> {
        self.actions.borrow().clone()
    }
}

impl ServiceController for FakeController {
    fn stop(&self) -> Result<()> {
        self.actions.borrow_mut().push("stop");
        Ok(())
    }

    fn start(&self) -> Result<()> {
        self.actions.borrow_mut().push("start");
        if self.fail_start.get() {
            return Err(error::deploy::service_failed("start", "forced failure"));
        }
        Ok(())
    }
}
