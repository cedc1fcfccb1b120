//! Jar-compatible archives backed by the `zip` crate

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::manifest::{MANIFEST_PATH, Manifest};
use super::{ArchiveEntry, Archiver};
use crate::common::fs::ensure_parent_dir;
use crate::error::{self, HemeraError, Result};

/// [`Archiver`] writing deflated zip archives
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

fn failed(path: &Path, reason: impl Display) -> HemeraError {
    error::build::archive_failed(path.display().to_string(), reason.to_string())
}

fn open(archive: &Path) -> Result<ZipArchive<File>> {
    if !archive.is_file() {
        return Err(error::fs::not_found(archive));
    }
    let file = File::open(archive).map_err(|e| error::fs::read_failed(archive, e))?;
    ZipArchive::new(file).map_err(|e| failed(archive, e))
}

/// Archive name of `file` below `root`, with `/` separators
fn member_name(prefix: &str, root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let mut name = String::from(prefix.trim_end_matches('/'));
    for component in relative.components() {
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    Some(name)
}

impl ZipArchiver {
    fn write_file(
        writer: &mut ZipWriter<File>,
        target: &Path,
        source: &Path,
        name: &str,
        options: SimpleFileOptions,
    ) -> Result<()> {
        let mut input = File::open(source).map_err(|e| error::fs::read_failed(source, e))?;
        writer
            .start_file(name, options)
            .map_err(|e| failed(target, e))?;
        io::copy(&mut input, writer).map_err(|e| failed(target, e))?;
        Ok(())
    }
}

impl Archiver for ZipArchiver {
    fn archive(
        &self,
        entries: &[ArchiveEntry],
        target: &Path,
        manifest: Option<&Manifest>,
    ) -> Result<()> {
        ensure_parent_dir(target)?;
        let output = File::create(target).map_err(|e| error::fs::write_failed(target, e))?;
        let mut writer = ZipWriter::new(output);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        if let Some(manifest) = manifest {
            writer
                .start_file(MANIFEST_PATH, options)
                .map_err(|e| failed(target, e))?;
            io::Write::write_all(&mut writer, manifest.render().as_bytes())
                .map_err(|e| failed(target, e))?;
        }

        for entry in entries {
            match entry {
                ArchiveEntry::File { path, name } => {
                    if !path.is_file() {
                        return Err(failed(target, format!("missing input {}", path.display())));
                    }
                    Self::write_file(&mut writer, target, path, name, options)?;
                }
                ArchiveEntry::Directory { path, prefix } => {
                    if !path.is_dir() {
                        return Err(failed(
                            target,
                            format!("missing input directory {}", path.display()),
                        ));
                    }
                    for item in WalkDir::new(path).sort_by_file_name() {
                        let item = item.map_err(|e| failed(target, e))?;
                        if !item.file_type().is_file() {
                            continue;
                        }
                        let Some(name) = member_name(prefix, path, item.path()) else {
                            continue;
                        };
                        Self::write_file(&mut writer, target, item.path(), &name, options)?;
                    }
                }
            }
        }

        writer.finish().map_err(|e| failed(target, e))?;
        tracing::debug!("Wrote archive {}", target.display());
        Ok(())
    }

    fn read_manifest(&self, archive: &Path) -> Result<Option<Manifest>> {
        let mut zip = open(archive)?;
        let mut member = match zip.by_name(MANIFEST_PATH) {
            Ok(member) => member,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(failed(archive, e)),
        };
        let mut text = String::new();
        member
            .read_to_string(&mut text)
            .map_err(|e| failed(archive, e))?;
        Ok(Some(Manifest::parse(&text)))
    }

    fn list_members(&self, archive: &Path) -> Result<Vec<String>> {
        let mut zip = open(archive)?;
        let mut names = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let member = zip.by_index(index).map_err(|e| failed(archive, e))?;
            if !member.is_dir() {
                names.push(member.name().to_string());
            }
        }
        Ok(names)
    }

    fn extract_member(&self, archive: &Path, member: &str, target: &Path) -> Result<()> {
        let mut zip = open(archive)?;
        let mut entry = match zip.by_name(member) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(failed(archive, format!("member '{member}' not found")));
            }
            Err(e) => return Err(failed(archive, e)),
        };

        ensure_parent_dir(target)?;
        let mut output = File::create(target).map_err(|e| error::fs::write_failed(target, e))?;
        io::copy(&mut entry, &mut output).map_err(|e| error::fs::write_failed(target, e))?;
        Ok(())
    }

    fn extract_all(&self, archive: &Path, destination: &Path) -> Result<Vec<PathBuf>> {
        let mut zip = open(archive)?;
        let mut written = Vec::new();

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|e| failed(archive, e))?;
            let Some(relative) = entry.enclosed_name() else {
                return Err(failed(
                    archive,
                    format!("member '{}' escapes the extraction directory", entry.name()),
                ));
            };
            let target = destination.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&target).map_err(|e| error::fs::write_failed(&target, e))?;
                continue;
            }

            ensure_parent_dir(&target)?;
            let mut output =
                File::create(&target).map_err(|e| error::fs::write_failed(&target, e))?;
            io::copy(&mut entry, &mut output).map_err(|e| error::fs::write_failed(&target, e))?;
            written.push(target);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::create_temp_dir;
    use std::io::Write;

    fn sample_tree(root: &Path) {
        fs::create_dir_all(root.join("com").join("x")).unwrap();
        fs::write(root.join("com").join("x").join("M.class"), "class").unwrap();
        fs::write(root.join("top.txt"), "top").unwrap();
    }

    #[test]
    fn test_archive_and_list_members() {
        let temp = create_temp_dir();
        let classes = temp.path().join("classes");
        sample_tree(&classes);
        let config = temp.path().join("m.xml");
        fs::write(&config, "<m/>").unwrap();

        let target = temp.path().join("out").join("m.jar");
        ZipArchiver
            .archive(
                &[
                    ArchiveEntry::directory(&classes, ""),
                    ArchiveEntry::file(&config),
                    ArchiveEntry::directory(&classes, "resources"),
                ],
                &target,
                None,
            )
            .unwrap();

        let members = ZipArchiver.list_members(&target).unwrap();
        assert_eq!(
            members,
            [
                "com/x/M.class",
                "top.txt",
                "m.xml",
                "resources/com/x/M.class",
                "resources/top.txt"
            ]
        );
        assert!(ZipArchiver.read_manifest(&target).unwrap().is_none());
    }

    #[test]
    fn test_manifest_round_trip() {
        let temp = create_temp_dir();
        let file = temp.path().join("a.txt");
        fs::write(&file, "a").unwrap();

        let mut manifest = Manifest::new();
        manifest.insert("Manifest-Version", "1.0");
        manifest.insert("modules", "com.x.A.jar;com.x.B.jar");

        let target = temp.path().join("bundle.hab");
        ZipArchiver
            .archive(&[ArchiveEntry::file(&file)], &target, Some(&manifest))
            .unwrap();

        assert_eq!(ZipArchiver.read_manifest(&target).unwrap(), Some(manifest));
        assert_eq!(
            ZipArchiver.list_members(&target).unwrap(),
            [MANIFEST_PATH, "a.txt"]
        );
    }

    #[test]
    fn test_extract_member_and_all() {
        let temp = create_temp_dir();
        let classes = temp.path().join("classes");
        sample_tree(&classes);
        let target = temp.path().join("c.jar");
        ZipArchiver
            .archive(&[ArchiveEntry::directory(&classes, "")], &target, None)
            .unwrap();

        let single = temp.path().join("single").join("top.txt");
        ZipArchiver.extract_member(&target, "top.txt", &single).unwrap();
        assert_eq!(fs::read_to_string(&single).unwrap(), "top");

        let dest = temp.path().join("all");
        let written = ZipArchiver.extract_all(&target, &dest).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dest.join("com").join("x").join("M.class").is_file());
    }

    #[test]
    fn test_extract_missing_member() {
        let temp = create_temp_dir();
        let file = temp.path().join("a.txt");
        fs::write(&file, "a").unwrap();
        let target = temp.path().join("a.jar");
        ZipArchiver
            .archive(&[ArchiveEntry::file(&file)], &target, None)
            .unwrap();

        let err = ZipArchiver
            .extract_member(&target, "b.txt", &temp.path().join("b.txt"))
            .unwrap_err();
        assert!(err.to_string().contains("b.txt"));
    }

    #[test]
    fn test_archive_missing_input() {
        let temp = create_temp_dir();
        let err = ZipArchiver
            .archive(
                &[ArchiveEntry::file(temp.path().join("missing.jar"))],
                &temp.path().join("out.jar"),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, HemeraError::ArchiveFailed { .. }));
    }

    #[test]
    fn test_extract_all_rejects_escaping_members() {
        let temp = create_temp_dir();
        let target = temp.path().join("evil.jar");
        let mut writer = ZipWriter::new(File::create(&target).unwrap());
        writer
            .start_file("../escape.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"x").unwrap();
        writer.finish().unwrap();

        let err = ZipArchiver
            .extract_all(&target, &temp.path().join("dest"))
            .unwrap_err();
        assert!(err.to_string().contains("escapes"));
        assert!(!temp.path().join("escape.txt").exists());
    }

    #[test]
    fn test_open_missing_archive() {
        let temp = create_temp_dir();
        let err = ZipArchiver
            .list_members(&temp.path().join("missing.hab"))
            .unwrap_err();
        assert!(matches!(err, HemeraError::FileNotFound { .. }));
    }
}
