//! Magic-number checks for font files.
//!
//! Each of the first five bytes must be one of the bytes that make up the
//! format's magic sequence, in any order. No further structure is validated.

use std::path::Path;

use crate::fs_op::read::read_prefix;

/// Number of leading bytes inspected.
pub const MAGIC_LEN: usize = 5;

/// TrueType magic: `00 01 00 00 00`.
pub const TTF_MAGIC: [u8; MAGIC_LEN] = [0x00, 0x01, 0x00, 0x00, 0x00];
/// OpenType (CFF) magic: `OTTO` followed by a zero byte.
pub const OTF_MAGIC: [u8; MAGIC_LEN] = [0x4F, 0x54, 0x54, 0x4F, 0x00];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    TrueType,
    OpenType,
}

impl FontKind {
    pub const ALL: [FontKind; 2] = [FontKind::TrueType, FontKind::OpenType];

    pub fn magic(self) -> &'static [u8; MAGIC_LEN] {
        match self {
            FontKind::TrueType => &TTF_MAGIC,
            FontKind::OpenType => &OTF_MAGIC,
        }
    }

    /// File-name suffix, lowercase and without a dot.
    pub fn extension(self) -> &'static str {
        match self {
            FontKind::TrueType => "ttf",
            FontKind::OpenType => "otf",
        }
    }

    /// `true` when each of the first five bytes occurs in this kind's magic.
    /// Fewer than five bytes never match.
    pub fn matches_magic(self, bytes: &[u8]) -> bool {
        let magic = self.magic();
        bytes.len() >= MAGIC_LEN && bytes[..MAGIC_LEN].iter().all(|b| magic.contains(b))
    }

    /// `true` when the file name ends with the extension, ignoring case.
    pub fn matches_name(self, path: &Path) -> bool {
        path.file_name()
            .map(|n| n.to_string_lossy().to_lowercase().ends_with(self.extension()))
            .unwrap_or(false)
    }

    /// Name and content check together. Unreadable files are not fonts.
    pub fn verify(self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if !self.matches_name(path) {
            return false;
        }
        match read_prefix(path, MAGIC_LEN) {
            Ok(head) => self.matches_magic(&head),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "font check could not read file");
                false
            }
        }
    }

    /// The kind a file verifies as, if any.
    pub fn detect(path: impl AsRef<Path>) -> Option<FontKind> {
        let path = path.as_ref();
        FontKind::ALL.into_iter().find(|k| k.verify(path))
    }
}

/// Whether `path` is named `*ttf` and starts with TrueType magic bytes.
pub fn is_real_ttf(path: impl AsRef<Path>) -> bool {
    FontKind::TrueType.verify(path)
}

/// Whether `path` is named `*otf` and starts with OpenType magic bytes.
pub fn is_real_otf(path: impl AsRef<Path>) -> bool {
    FontKind::OpenType.verify(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn ttf_magic_and_name() {
        let td = tempdir().unwrap();
        let good = td.path().join("Font.TTF");
        fs::write(&good, [0x00, 0x01, 0x00, 0x00, 0x00, 0x12, 0x34]).unwrap();
        assert!(is_real_ttf(&good));
        assert!(!is_real_otf(&good));
        assert_eq!(FontKind::detect(&good), Some(FontKind::TrueType));
    }

    #[test]
    fn renamed_text_is_not_a_font() {
        let td = tempdir().unwrap();
        let fake = td.path().join("font.ttf");
        fs::write(&fake, b"hello world").unwrap();
        assert!(!is_real_ttf(&fake));
        assert_eq!(FontKind::detect(&fake), None);
    }

    #[test]
    fn right_bytes_wrong_name() {
        let td = tempdir().unwrap();
        let f = td.path().join("font.bin");
        fs::write(&f, TTF_MAGIC).unwrap();
        assert!(!is_real_ttf(&f));
    }

    #[test]
    fn otf_magic() {
        let td = tempdir().unwrap();
        let f = td.path().join("Sans.otf");
        fs::write(&f, b"OTTO\x00\x0a\x00\x80").unwrap();
        assert!(is_real_otf(&f));
        assert!(!is_real_ttf(&f));
    }

    #[test]
    fn permuted_bytes_pass_the_loose_check() {
        assert!(FontKind::TrueType.matches_magic(&[1, 1, 0, 1, 0]));
        assert!(FontKind::OpenType.matches_magic(b"TOOT\x00"));
        assert!(!FontKind::TrueType.matches_magic(&[0, 1, 0, 0, 2]));
    }

    #[test]
    fn short_and_missing_files() {
        let td = tempdir().unwrap();
        let short = td.path().join("tiny.ttf");
        fs::write(&short, [0x00, 0x01]).unwrap();
        assert!(!is_real_ttf(&short));
        assert!(!is_real_ttf(td.path().join("missing.ttf")));
    }
}
