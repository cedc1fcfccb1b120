//! Module builder tests

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::fs;

use super::*;
use crate::error::HemeraError;
use crate::model::{Dependency, document};
use crate::test_fixtures::{FakeCompiler, create_temp_dir, write_file};
use crate::toolchain::ZipArchiver;

const DESCRIPTOR: &str = r"
<hemera-bundle-model>
  <application-name>sample</application-name>
  <shared>
    <config-file>shared.xml</config-file>
    <dependencies>
      <dependency><type>jar-dir</type><value>lib</value></dependency>
      <dependency><type>src-dir</type><value>util/src</value></dependency>
    </dependencies>
  </shared>
  <modules>
    <module>
      <src-dir>a/src</src-dir>
      <classname>com.x.A</classname>
      <config-file>a/a.xml</config-file>
      <resources-dir>a/res</resources-dir>
    </module>
    <module>
      <src-dir>b/src</src-dir>
      <classname>com.x.B</classname>
    </module>
  </modules>
</hemera-bundle-model>";

fn project(root: &Path) -> BundleModel {
    write_file(&root.join("app.hbm"), DESCRIPTOR);
    write_file(&root.join("shared.xml"), "<shared><datasource>db</datasource></shared>");
    write_file(&root.join("lib/common.jar"), "common");
    write_file(&root.join("util/src/com/x/U.java"), "class U {}");
    write_file(&root.join("a/src/com/x/A.java"), "class A {}");
    write_file(&root.join("a/a.xml"), "<a><port>80</port></a>");
    write_file(&root.join("a/res/logo.txt"), "logo");
    write_file(&root.join("b/src/com/x/B.java"), "class B {}");
    BundleModel::from_file(&root.join("app.hbm")).unwrap()
}

#[test]
fn test_build_module_with_config_and_resources() {
    let temp = create_temp_dir();
    let bundle = project(temp.path());
    let layout = BuildLayout::new(temp.path().join("temp"));
    let compiler = FakeCompiler::default();

    let builder = ModuleBuilder::new(&compiler, &ZipArchiver, &bundle, &layout).unwrap();
    let artifact = builder.build(&bundle.modules[0]).unwrap();

    assert_eq!(artifact.classname, "com.x.A");
    assert_eq!(artifact.archive, layout.module_archive("com.x.A"));
    assert_eq!(
        artifact.libraries,
        [
            temp.path().join("lib/common.jar"),
            layout.dependencies_dir().join("util.src.jar"),
        ]
    );

    let members = ZipArchiver.list_members(&artifact.archive).unwrap();
    assert_eq!(members, ["com.x.A.jar", "a.xml", "resources/logo.txt"]);

    let config = temp.path().join("check/a.xml");
    ZipArchiver
        .extract_member(&artifact.archive, "a.xml", &config)
        .unwrap();
    let merged = document::read_file(&config).unwrap();
    let names: Vec<_> = document::child_elements(&merged)
        .map(|e| e.name.clone())
        .collect();
    assert_eq!(names, ["port", "datasource"]);

    assert!(!layout.scratch_dir("com.x.A").exists());
}

#[test]
fn test_module_without_config_gets_shared_config() {
    let temp = create_temp_dir();
    let bundle = project(temp.path());
    let layout = BuildLayout::new(temp.path().join("temp"));
    let compiler = FakeCompiler::default();

    let builder = ModuleBuilder::new(&compiler, &ZipArchiver, &bundle, &layout).unwrap();
    let artifact = builder.build(&bundle.modules[1]).unwrap();

    let members = ZipArchiver.list_members(&artifact.archive).unwrap();
    assert_eq!(members, ["com.x.B.jar", "com.x.B.xml"]);
}

#[test]
fn test_class_archive_contains_compiled_classes() {
    let temp = create_temp_dir();
    let bundle = project(temp.path());
    let layout = BuildLayout::new(temp.path().join("temp"));
    let compiler = FakeCompiler::default();

    let builder = ModuleBuilder::new(&compiler, &ZipArchiver, &bundle, &layout).unwrap();
    let artifact = builder.build(&bundle.modules[1]).unwrap();

    let class_archive = temp.path().join("check/com.x.B.jar");
    ZipArchiver
        .extract_member(&artifact.archive, "com.x.B.jar", &class_archive)
        .unwrap();
    assert_eq!(
        ZipArchiver.list_members(&class_archive).unwrap(),
        ["com/x/B.class"]
    );
}

#[test]
fn test_shared_source_dependency_compiled_once() {
    let temp = create_temp_dir();
    let bundle = project(temp.path());
    let layout = BuildLayout::new(temp.path().join("temp"));
    let compiler = FakeCompiler::default();

    let builder = ModuleBuilder::new(&compiler, &ZipArchiver, &bundle, &layout).unwrap();
    for module in &bundle.modules {
        builder.build(module).unwrap();
    }

    let util_builds = compiler
        .compiled_dirs()
        .iter()
        .filter(|dir| dir.ends_with("util/src"))
        .count();
    assert_eq!(util_builds, 1);
    assert_eq!(compiler.compiled_dirs().len(), 3);
}

#[test]
fn test_distinct_sources_with_same_archive_name_fail() {
    let temp = create_temp_dir();
    let project_dir = temp.path().join("proj");
    let mut bundle = project(&project_dir);
    write_file(&temp.path().join("util/src/Other.java"), "class Other {}");
    bundle.modules[1].dependencies = vec![Dependency::source_dir("../util/src", None)];
    let layout = BuildLayout::new(temp.path().join("temp"));
    let compiler = FakeCompiler::default();

    let builder = ModuleBuilder::new(&compiler, &ZipArchiver, &bundle, &layout).unwrap();
    builder.build(&bundle.modules[0]).unwrap();
    let err = builder.build(&bundle.modules[1]).unwrap_err();

    assert!(matches!(err, HemeraError::DependencyBuildFailed { ref dependency, .. } if dependency.contains("../util/src")));
}

#[test]
fn test_missing_shared_config_fails_early() {
    let temp = create_temp_dir();
    let bundle = project(temp.path());
    fs::remove_file(temp.path().join("shared.xml")).unwrap();
    let layout = BuildLayout::new(temp.path().join("temp"));
    let compiler = FakeCompiler::default();

    let err = ModuleBuilder::new(&compiler, &ZipArchiver, &bundle, &layout)
        .err()
        .unwrap();
    assert!(matches!(err, HemeraError::ConfigNotFound { .. }));
}

#[test]
fn test_compile_failure_surfaces() {
    let temp = create_temp_dir();
    let mut bundle = project(temp.path());
    bundle.shared = None;
    let layout = BuildLayout::new(temp.path().join("temp"));
    let compiler = FakeCompiler::failing("A.java:1: error: cannot find symbol");

    let builder = ModuleBuilder::new(&compiler, &ZipArchiver, &bundle, &layout).unwrap();
    let err = builder.build(&bundle.modules[0]).unwrap_err();
    assert!(matches!(err, HemeraError::CompileFailed { ref diagnostic, .. } if diagnostic.contains("cannot find symbol")));
}

#[test]
fn test_build_layout_paths() {
    let layout = BuildLayout::new("/h/temp");
    assert_eq!(layout.dependencies_dir(), Path::new("/h/temp/dependencies"));
    assert_eq!(layout.scratch_dir("com.x.A"), Path::new("/h/temp/scratch/com.x.A"));
    assert_eq!(
        layout.module_archive("com.x.A"),
        Path::new("/h/temp/modules/com.x.A.jar")
    );
    assert_eq!(layout.library_archive(), Path::new("/h/temp/lib.jar"));
    assert_eq!(
        layout.shared_resources_archive(),
        Path::new("/h/temp/shared-resources.jar")
    );
    assert_eq!(layout.model_file("Sample"), Path::new("/h/temp/sample.ham"));
}
