use serde::{Deserialize, Serialize};
use zip::CompressionMethod;

/// Default manifest version written into `META-INF/MANIFEST.MF`.
pub const DEFAULT_MANIFEST_VERSION: &str = "1.0";
/// Default extension of produced archives.
pub const DEFAULT_EXTENSION: &str = "jar";

/// How file payloads are stored in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Raw bytes, no compression.
    Stored,
    /// DEFLATE, as used by `jar` tooling.
    #[default]
    Deflated,
}

impl From<Compression> for CompressionMethod {
    fn from(c: Compression) -> Self {
        match c {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// Settings for [`ArchiveBuilder`](crate::archive::ArchiveBuilder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub compression: Compression,
    pub manifest_version: String,
    /// Extension (without the dot) appended to output names.
    pub extension: String,
    /// Chunk size used when streaming file payloads.
    pub buffer_size: usize,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        ArchiveOptions {
            compression: Compression::default(),
            manifest_version: DEFAULT_MANIFEST_VERSION.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            buffer_size: crate::fs_op::helpers::DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ArchiveOptions {
    /// Output file name for `requested`, or for the archived root's name when
    /// nothing was requested. The configured extension is appended when
    /// missing; an empty extension leaves the name as is.
    pub fn output_name(&self, root_name: &str, requested: Option<&str>) -> String {
        let ext = self.extension.trim_start_matches('.');
        if ext.is_empty() {
            return requested.unwrap_or(root_name).to_string();
        }
        let suffix = format!(".{}", ext);
        match requested {
            Some(name) if name.ends_with(&suffix) => name.to_string(),
            Some(name) => format!("{}{}", name, suffix),
            None => format!("{}{}", root_name, suffix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_rules() {
        let o = ArchiveOptions::default();
        assert_eq!(o.output_name("lib", None), "lib.jar");
        assert_eq!(o.output_name("lib", Some("bundle")), "bundle.jar");
        assert_eq!(o.output_name("lib", Some("bundle.jar")), "bundle.jar");
        assert_eq!(o.output_name("lib", Some("bundle.zip")), "bundle.zip.jar");
    }

    #[test]
    fn empty_extension_adds_no_suffix() {
        let o = ArchiveOptions {
            extension: String::new(),
            ..ArchiveOptions::default()
        };
        assert_eq!(o.output_name("site", None), "site");
        assert_eq!(o.output_name("site", Some("bundle")), "bundle");

        let dotted = ArchiveOptions {
            extension: ".war".to_string(),
            ..ArchiveOptions::default()
        };
        assert_eq!(dotted.output_name("site", None), "site.war");
    }

    #[test]
    fn compression_parses_lowercase() {
        #[derive(Deserialize)]
        struct W {
            c: Compression,
        }
        let w: W = toml::from_str("c = \"stored\"").unwrap();
        assert_eq!(w.c, Compression::Stored);
        assert_eq!(CompressionMethod::from(w.c), CompressionMethod::Stored);
    }
}
