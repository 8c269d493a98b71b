//! Archive access for cpboot.
//!
//! A classpath entry is opened as an [`Archive`]: a flat, sorted listing of
//! `/`-separated entry names backed either by a zip-format file or by a
//! directory on disk. Directory entries end with `/`.
//!
//! On top of the listing this crate knows the few pieces of metadata the
//! module layer cares about:
//!
//! - **Packages**: the dot-separated directory of a file entry ([`package_of`])
//! - **Manifest**: `META-INF/MANIFEST.MF` main attributes ([`Manifest`])
//! - **Service providers**: `META-INF/services/<capability>` listings
//!   ([`parse_providers`])

mod archive;
mod error;
mod manifest;
mod package;
mod services;

pub use archive::{Archive, ArchiveKind};
pub use error::{ArchiveError, ArchiveResult};
pub use manifest::{Manifest, AUTOMATIC_MODULE_NAME, MANIFEST_PATH};
pub use package::{is_directory, is_metadata, package_of, META_INF};
pub use services::{parse_providers, service_capability, SERVICES_DIR};
