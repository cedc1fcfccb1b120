//! Source compilation through an external compiler process

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;

use super::Compiler;
use crate::common::fs::ensure_dir;
use crate::error::{self, Result};

const SOURCE_EXTENSION: &str = "java";
const CLASS_EXTENSION: &str = "class";

/// Runs `<program> [args] -d <out> -cp <classpath> <sources...>`
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    program: String,
    args: Vec<String>,
}

impl CommandCompiler {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

/// Files below `dir` with the given extension, in walk order
pub fn collect_files(dir: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect()
}

/// Platform classpath string
pub fn join_classpath(classpath: &[PathBuf]) -> Result<OsString> {
    std::env::join_paths(classpath)
        .map_err(|e| error::build::compile_failed("classpath", e.to_string()))
}

impl Compiler for CommandCompiler {
    fn compile(
        &self,
        source_dir: &Path,
        classpath: &[PathBuf],
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        if !source_dir.is_dir() {
            return Err(error::fs::not_found(source_dir));
        }
        ensure_dir(output_dir)?;

        let sources = collect_files(source_dir, SOURCE_EXTENSION);
        if sources.is_empty() {
            tracing::debug!("No sources under {}, nothing to compile", source_dir.display());
            return Ok(Vec::new());
        }

        let mut command = Command::new(&self.program);
        command.args(&self.args).arg("-d").arg(output_dir);
        if !classpath.is_empty() {
            command.arg("-cp").arg(join_classpath(classpath)?);
        }
        command.args(&sources);

        tracing::debug!(
            "Compiling {} sources from {} with {}",
            sources.len(),
            source_dir.display(),
            self.program
        );

        let output = command.output().map_err(|e| {
            error::build::compile_failed(
                source_dir.display().to_string(),
                format!("failed to run '{}': {e}", self.program),
            )
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let diagnostic = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(error::build::compile_failed(
                source_dir.display().to_string(),
                diagnostic,
            ));
        }

        Ok(collect_files(output_dir, CLASS_EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HemeraError;
    use crate::test_fixtures::create_temp_dir;
    use std::fs;

    #[test]
    fn test_collect_files_recurses_and_filters() {
        let temp = create_temp_dir();
        let pkg = temp.path().join("com").join("x");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("M.java"), "class M {}").unwrap();
        fs::write(pkg.join("notes.txt"), "").unwrap();
        fs::write(temp.path().join("A.java"), "class A {}").unwrap();

        let files = collect_files(temp.path(), "java");
        assert_eq!(files, [temp.path().join("A.java"), pkg.join("M.java")]);
    }

    #[test]
    fn test_compile_without_sources_is_noop() {
        let temp = create_temp_dir();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();

        let compiler = CommandCompiler::new("hemera-no-such-compiler", Vec::new());
        let classes = compiler
            .compile(&src, &[], &temp.path().join("out"))
            .unwrap();
        assert!(classes.is_empty());
    }

    #[test]
    fn test_compile_missing_program_fails() {
        let temp = create_temp_dir();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("A.java"), "class A {}").unwrap();

        let compiler = CommandCompiler::new("hemera-no-such-compiler", Vec::new());
        let err = compiler
            .compile(&src, &[], &temp.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, HemeraError::CompileFailed { .. }));
    }

    #[test]
    fn test_compile_missing_source_dir() {
        let temp = create_temp_dir();
        let compiler = CommandCompiler::new("javac", Vec::new());
        let err = compiler
            .compile(&temp.path().join("missing"), &[], &temp.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, HemeraError::FileNotFound { .. }));
    }
}
