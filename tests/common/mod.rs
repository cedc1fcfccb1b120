//! Common test utilities for Hemera integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use hemera::error::{self, Result};
use hemera::toolchain::Compiler;
use hemera::toolchain::compiler::collect_files;
use tempfile::TempDir;

/// A scratch area holding a project tree and a host home
pub struct TestWorkspace {
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new_in(hemera::temp::temp_dir_base())
            .expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Host home directory used for bundling and deploying
    pub fn home(&self) -> PathBuf {
        self.path.join("home")
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Lay out the sample project under `project/` and return its descriptor
    pub fn sample_project(&self) -> PathBuf {
        self.write_file("project/app.hbm", SAMPLE_DESCRIPTOR);
        self.write_file(
            "project/shared.xml",
            "<shared><datasource>jdbc:h2:mem</datasource></shared>",
        );
        self.write_file("project/shared-res/banner.txt", "Welcome");
        self.write_file("project/lib/common.jar", "common library");
        self.write_file("project/util/src/com/example/util/Strings.java", "class Strings {}");
        self.write_file("project/orders/src/com/example/Orders.java", "class Orders {}");
        self.write_file(
            "project/orders/orders.xml",
            "<orders><queue>orders-in</queue></orders>",
        );
        self.write_file("project/orders/res/templates/receipt.txt", "Receipt");
        self.write_file("project/billing/src/com/example/Billing.java", "class Billing {}");
        self.write_file("project/audit/src/README", "audit sources live elsewhere");
        self.path.join("project/app.hbm")
    }

    /// Hemera command running against this workspace's home
    pub fn hemera_cmd(&self) -> Command {
        let mut cmd = hemera_cmd();
        cmd.env("HEMERA_HOME", self.home())
            .env_remove("RUST_LOG")
            .current_dir(&self.path);
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Two modules, one resource, shared config, resources and dependencies
pub const SAMPLE_DESCRIPTOR: &str = r"<?xml version='1.0' encoding='UTF-8'?>
<hemera-bundle-model>
  <application-name>Shop</application-name>
  <shared>
    <config-file>shared.xml</config-file>
    <resources-dir>shared-res</resources-dir>
    <dependencies>
      <dependency><type>jar-dir</type><value>lib</value></dependency>
      <dependency><type>src-dir</type><value>util/src</value></dependency>
    </dependencies>
  </shared>
  <modules>
    <module>
      <src-dir>orders/src</src-dir>
      <classname>com.example.Orders</classname>
      <config-file>orders/orders.xml</config-file>
      <resources-dir>orders/res</resources-dir>
    </module>
    <module>
      <src-dir>billing/src</src-dir>
      <classname>com.example.Billing</classname>
    </module>
  </modules>
  <resources>
    <resource>
      <src-dir>audit/src</src-dir>
      <classname>com.example.Audit</classname>
    </resource>
  </resources>
</hemera-bundle-model>
";

/// Descriptor whose sources need no compiler: every source directory holds
/// no `.java` files
pub const SOURCELESS_DESCRIPTOR: &str = r"
<hemera-bundle-model>
  <application-name>notes</application-name>
  <modules>
    <module>
      <src-dir>src</src-dir>
      <classname>org.notes.Board</classname>
      <resources-dir>res</resources-dir>
    </module>
  </modules>
</hemera-bundle-model>
";

/// Get hemera command
#[allow(deprecated)]
pub fn hemera_cmd() -> Command {
    Command::cargo_bin("hemera").expect("hemera binary is built")
}

/// Compiler that copies `X.java` to `X.class`
#[derive(Default)]
pub struct CopyCompiler;

impl Compiler for CopyCompiler {
    fn compile(
        &self,
        source_dir: &Path,
        _classpath: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        if !source_dir.is_dir() {
            return Err(error::fs::not_found(source_dir));
        }
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

/// Compiler that always fails with a fixed diagnostic
pub struct BrokenCompiler(pub &'static str);

impl Compiler for BrokenCompiler {
    fn compile(&self, source_dir: &Path, _: &[PathBuf], _: &Path) -> Result<Vec<PathBuf>> {
        Err(error::build::compile_failed(
            source_dir.display().to_string(),
            self.0,
        ))
    }
}
