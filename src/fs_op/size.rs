use std::path::Path;

use crate::fs_op::error::FsOpError;
use crate::fs_op::stat::FileNode;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with 1024-based units and up to two decimals.
///
/// ```
/// use toolbelt::fs_op::size::readable_size;
///
/// assert_eq!(readable_size(0), "0B");
/// assert_eq!(readable_size(1024), "1KB");
/// assert_eq!(readable_size(1536), "1.5KB");
/// ```
pub fn readable_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let text = format!("{:.2}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}", text, UNITS[unit])
}

/// Readable size of the file at `path` (the directory entry's own length for
/// directories).
pub fn readable_size_of(path: impl AsRef<Path>) -> Result<String, FsOpError> {
    Ok(readable_size(FileNode::stat(path)?.size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_boundaries() {
        assert_eq!(readable_size(1), "1B");
        assert_eq!(readable_size(1023), "1023B");
        assert_eq!(readable_size(1024 * 1024), "1MB");
        assert_eq!(readable_size(5 * 1024 * 1024 * 1024), "5GB");
        assert_eq!(readable_size(3 * 1024u64.pow(4)), "3TB");
        // Past TB the unit stays put.
        assert_eq!(readable_size(2048 * 1024u64.pow(4)), "2048TB");
    }

    #[test]
    fn two_decimals_at_most() {
        assert_eq!(readable_size(1100), "1.07KB");
        assert_eq!(readable_size(1280), "1.25KB");
    }

    #[test]
    fn size_of_file() {
        let td = tempfile::tempdir().unwrap();
        let f = td.path().join("s.bin");
        std::fs::write(&f, vec![0u8; 2048]).unwrap();
        assert_eq!(readable_size_of(&f).unwrap(), "2KB");
    }
}
