//! Live archive adapter using the `zip` crate.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::ports::archive::ArchiveInspector;

const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// Reads jars straight from disk.
pub struct LiveArchiveInspector;

fn open(path: &Path) -> Result<zip::ZipArchive<File>, Box<dyn std::error::Error + Send + Sync>> {
    let file = File::open(path)?;
    Ok(zip::ZipArchive::new(file)?)
}

impl ArchiveInspector for LiveArchiveInspector {
    fn manifest(
        &self,
        path: &Path,
    ) -> Result<Option<Vec<u8>>, Box<dyn std::error::Error + Send + Sync>> {
        let mut archive = open(path)?;
        let mut entry = match archive.by_name(MANIFEST_ENTRY) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }

    fn entry_names(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut archive = open(path)?;
        let mut names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;
            if !entry.is_dir() {
                names.push(entry.name().to_string());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_jar(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, contents) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(contents).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn reads_manifest_and_entries() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("lib.jar");
        write_jar(
            &jar,
            &[
                (MANIFEST_ENTRY, b"Manifest-Version: 1.0\nTarget-Label: //lib:lib\n"),
                ("com/example/Lib.class", b"\xca\xfe\xba\xbe"),
            ],
        );

        let manifest = LiveArchiveInspector.manifest(&jar).unwrap().unwrap();
        assert!(String::from_utf8(manifest).unwrap().contains("//lib:lib"));
        let names = LiveArchiveInspector.entry_names(&jar).unwrap();
        assert_eq!(names, vec![MANIFEST_ENTRY, "com/example/Lib.class"]);
    }

    #[test]
    fn missing_manifest_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("bare.jar");
        write_jar(&jar, &[("a.txt", b"hi")]);
        assert!(LiveArchiveInspector.manifest(&jar).unwrap().is_none());
    }

    #[test]
    fn non_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a.jar");
        std::fs::write(&path, b"plain text").unwrap();
        assert!(LiveArchiveInspector.manifest(&path).is_err());
        assert!(LiveArchiveInspector.entry_names(Path::new("/no/such/file.jar")).is_err());
    }
}
