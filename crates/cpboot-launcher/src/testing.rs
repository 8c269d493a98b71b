//! Fixtures shared by unit and integration tests.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes a zip archive named `name` under `dir`.
pub(crate) fn write_jar(dir: &Path, name: &str, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join(name);
    let mut zip = ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (entry, content) in entries {
        zip.start_file(*entry, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
    path
}

/// A jar with one class in `package` that declares `provider` as its launch service.
pub(crate) fn launcher_jar(dir: &Path, name: &str, package: &str, provider: &str) -> PathBuf {
    let class = format!("{}/Main.class", package.replace('.', "/"));
    let service = format!("{}\n", provider);
    write_jar(
        dir,
        name,
        &[(class.as_str(), ""), ("META-INF/services/launch", service.as_str())],
    )
}
