//! JAR-style archive packing, listing and unpacking.

pub mod builder;
pub mod entry;
pub mod error;
pub mod options;
pub mod reader;

pub use builder::{ArchiveBuilder, BuildReport, MANIFEST_NAME};
pub use entry::{ArchiveEntry, EntryKind};
pub use error::ArchiveError;
pub use options::{ArchiveOptions, Compression};
pub use reader::{extract, read_entries};
