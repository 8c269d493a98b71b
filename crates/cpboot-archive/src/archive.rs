//! Archive listing and reading.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{ArchiveError, ArchiveResult};
use crate::manifest::{Manifest, MANIFEST_PATH};

/// Backing storage of an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// A directory tree on disk.
    Directory,
    /// A zip-format file (jar, zip).
    Zip,
}

/// A classpath entry opened as a sorted listing of entry names.
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
    kind: ArchiveKind,
    entries: Vec<String>,
}

impl Archive {
    /// Opens `path` as a directory tree or a zip archive.
    pub fn open(path: &Path) -> ArchiveResult<Self> {
        let meta = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ArchiveError::NotFound(path.to_path_buf()),
            _ => ArchiveError::io(path, e),
        })?;

        let (kind, mut entries) = if meta.is_dir() {
            let mut entries = Vec::new();
            walk_dir(path, "", &mut entries)?;
            (ArchiveKind::Directory, entries)
        } else {
            let zip = open_zip(path)?;
            let entries = zip
                .file_names()
                .map(|name| name.trim_start_matches('/').to_string())
                .filter(|name| !name.is_empty())
                .collect();
            (ArchiveKind::Zip, entries)
        };

        entries.sort();
        entries.dedup();
        tracing::trace!(path = %path.display(), entries = entries.len(), "opened archive");

        Ok(Self {
            root: path.to_path_buf(),
            kind,
            entries,
        })
    }

    /// The path this archive was opened from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn kind(&self) -> ArchiveKind {
        self.kind
    }

    /// All entry names, sorted. Directories end with `/`.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.binary_search_by(|e| e.as_str().cmp(entry)).is_ok()
    }

    /// Reads the raw bytes of a file entry.
    pub fn read(&self, entry: &str) -> ArchiveResult<Vec<u8>> {
        if !self.contains(entry) || entry.ends_with('/') {
            return Err(ArchiveError::MissingEntry {
                path: self.root.clone(),
                entry: entry.to_string(),
            });
        }

        match self.kind {
            ArchiveKind::Directory => {
                let file = self.root.join(entry);
                fs::read(&file).map_err(|e| ArchiveError::io(file, e))
            }
            ArchiveKind::Zip => {
                let mut zip = open_zip(&self.root)?;
                let mut file = zip
                    .by_name(entry)
                    .map_err(|e| ArchiveError::zip(&self.root, e))?;
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)
                    .map_err(|e| ArchiveError::io(&self.root, e))?;
                Ok(bytes)
            }
        }
    }

    /// Reads a file entry as UTF-8 text.
    pub fn read_to_string(&self, entry: &str) -> ArchiveResult<String> {
        String::from_utf8(self.read(entry)?).map_err(|_| ArchiveError::NotUtf8 {
            path: self.root.clone(),
            entry: entry.to_string(),
        })
    }

    /// Parsed `META-INF/MANIFEST.MF`, if the archive has one.
    pub fn manifest(&self) -> ArchiveResult<Option<Manifest>> {
        if !self.contains(MANIFEST_PATH) {
            return Ok(None);
        }
        let content = self.read_to_string(MANIFEST_PATH)?;
        Ok(Some(Manifest::parse(&content)))
    }
}

fn open_zip(path: &Path) -> ArchiveResult<ZipArchive<File>> {
    let file = File::open(path).map_err(|e| ArchiveError::io(path, e))?;
    ZipArchive::new(file).map_err(|e| ArchiveError::zip(path, e))
}

/// Collects `prefix`-relative entry names below `dir`.
fn walk_dir(dir: &Path, prefix: &str, out: &mut Vec<String>) -> ArchiveResult<()> {
    let read_dir = fs::read_dir(dir).map_err(|e| ArchiveError::io(dir, e))?;
    for entry in read_dir {
        let entry = entry.map_err(|e| ArchiveError::io(dir, e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        // Follows symlinks, like the JDK's exploded module reader
        let meta = fs::metadata(&path).map_err(|e| ArchiveError::io(&path, e))?;

        if meta.is_dir() {
            let dir_name = format!("{}{}/", prefix, name);
            out.push(dir_name.clone());
            walk_dir(&path, &dir_name, out)?;
        } else {
            out.push(format!("{}{}", prefix, name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn write_jar(path: &Path, entries: &[(&str, &str)]) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for (name, content) in entries {
            if name.ends_with('/') {
                zip.add_directory(*name, options).unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_open_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/C.class"), "c").unwrap();
        fs::write(dir.path().join("Root.class"), "r").unwrap();

        let archive = Archive::open(dir.path()).unwrap();
        assert_eq!(archive.kind(), ArchiveKind::Directory);
        assert_eq!(
            archive.entries().collect::<Vec<_>>(),
            vec!["Root.class", "a/", "a/b/", "a/b/C.class"]
        );
        assert_eq!(archive.read("a/b/C.class").unwrap(), b"c");
    }

    #[test]
    fn test_open_zip() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("lib.jar");
        write_jar(
            &jar,
            &[
                ("META-INF/MANIFEST.MF", "Automatic-Module-Name: lib.core\n"),
                ("x/", ""),
                ("x/X.class", "x"),
            ],
        );

        let archive = Archive::open(&jar).unwrap();
        assert_eq!(archive.kind(), ArchiveKind::Zip);
        assert!(archive.contains("x/"));
        assert!(archive.contains("x/X.class"));
        assert_eq!(archive.read_to_string("x/X.class").unwrap(), "x");

        let manifest = archive.manifest().unwrap().unwrap();
        assert_eq!(manifest.automatic_module_name(), Some("lib.core"));
    }

    #[test]
    fn test_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Archive::open(&dir.path().join("nope.jar")).unwrap_err();
        assert!(matches!(err, ArchiveError::NotFound(_)));
    }

    #[test]
    fn test_not_a_zip() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.jar");
        fs::write(&bogus, "definitely not a zip").unwrap();
        assert!(matches!(Archive::open(&bogus), Err(ArchiveError::Zip { .. })));
    }

    #[test]
    fn test_declared_size_is_not_trusted() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("huge.jar");
        write_jar(&jar, &[("x/X.class", "x")]);

        // Claim a ~4 GiB uncompressed size in both headers
        let mut raw = fs::read(&jar).unwrap();
        let huge = 0xFFFF_FFF0u32.to_le_bytes();
        let local = raw.windows(4).position(|w| w == b"PK\x03\x04").unwrap();
        raw[local + 22..local + 26].copy_from_slice(&huge);
        let central = raw.windows(4).position(|w| w == b"PK\x01\x02").unwrap();
        raw[central + 24..central + 28].copy_from_slice(&huge);
        fs::write(&jar, &raw).unwrap();

        let archive = Archive::open(&jar).unwrap();
        match archive.read("x/X.class") {
            Ok(bytes) => assert_eq!(bytes, b"x"),
            Err(err) => assert!(matches!(err, ArchiveError::Zip { .. } | ArchiveError::Io { .. })),
        }
    }

    #[test]
    fn test_read_directory_entry_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        let archive = Archive::open(dir.path()).unwrap();
        assert!(matches!(archive.read("a/"), Err(ArchiveError::MissingEntry { .. })));
    }
}
