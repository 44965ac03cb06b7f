//! Fixture manifest: expected size and content fingerprint per fixture.
//!
//! Text format, one fixture per line after a version header:
//!
//! ```text
//! # snappy-fixtures manifest v1
//! name<TAB>input_len<TAB>compressed_len<TAB>xxh64 (16 lowercase hex digits)
//! ```
//!
//! Blank lines and lines starting with `#` after the header are ignored.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{CHECKSUM_SEED, MANIFEST_FILE, MANIFEST_HEADER};
use crate::error::HarnessError;

/// XXH64 of `data` with the manifest seed.
#[inline]
pub fn content_checksum(data: &[u8]) -> u64 {
    xxhash_rust::xxh64::xxh64(data, CHECKSUM_SEED)
}

/// Parse a 1–16 digit hex checksum, with or without a `0x` prefix.
pub fn parse_checksum(text: &str) -> Option<u64> {
    let digits = text.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    if digits.is_empty() || digits.len() > 16 {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub input_len: u64,
    pub compressed_len: u64,
    pub input_xxh64: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Manifest::default()
    }

    /// Append an entry. An entry with the same name is replaced where it
    /// stands, so regenerating one case keeps the manifest's order.
    pub fn push(&mut self, entry: ManifestEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(64 * (self.entries.len() + 1));
        out.push_str(MANIFEST_HEADER);
        out.push('\n');
        for e in &self.entries {
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{:016x}",
                e.name, e.input_len, e.compressed_len, e.input_xxh64
            );
        }
        out
    }

    /// Parse manifest text; `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, HarnessError> {
        let bad = |line: usize, reason: String| HarnessError::Manifest {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let mut lines = text.lines().enumerate();
        match lines.next() {
            Some((_, first)) if first.trim_end() == MANIFEST_HEADER => {}
            Some((_, first)) => {
                return Err(bad(1, format!("unexpected header {:?}", first)));
            }
            None => return Err(bad(1, "empty manifest".to_owned())),
        }

        let mut manifest = Manifest::new();
        for (idx, raw) in lines {
            let line_no = idx + 1;
            let line = raw.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != 4 {
                return Err(bad(line_no, format!("expected 4 fields, found {}", fields.len())));
            }
            let input_len = fields[1]
                .parse::<u64>()
                .map_err(|_| bad(line_no, format!("bad input length {:?}", fields[1])))?;
            let compressed_len = fields[2]
                .parse::<u64>()
                .map_err(|_| bad(line_no, format!("bad compressed length {:?}", fields[2])))?;
            let input_xxh64 = parse_checksum(fields[3])
                .ok_or_else(|| bad(line_no, format!("bad checksum {:?}", fields[3])))?;
            if manifest.get(fields[0]).is_some() {
                return Err(bad(line_no, format!("duplicate entry {:?}", fields[0])));
            }
            manifest.push(ManifestEntry {
                name: fields[0].to_owned(),
                input_len,
                compressed_len,
                input_xxh64,
            });
        }
        Ok(manifest)
    }

    /// Path of the manifest inside a fixture root.
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(MANIFEST_FILE)
    }

    pub fn write_to(&self, root: &Path) -> Result<PathBuf, HarnessError> {
        let path = Self::path_in(root);
        fs::write(&path, self.to_text()).map_err(|e| HarnessError::io(&path, e))?;
        Ok(path)
    }

    pub fn load(root: &Path) -> Result<Self, HarnessError> {
        let path = Self::path_in(root);
        let text = fs::read_to_string(&path).map_err(|e| HarnessError::io(&path, e))?;
        Self::parse(&text, &path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, len: u64) -> ManifestEntry {
        ManifestEntry {
            name: name.to_owned(),
            input_len: len,
            compressed_len: len / 2 + 1,
            input_xxh64: 0xdead_beef,
        }
    }

    #[test]
    fn text_roundtrip() {
        let mut m = Manifest::new();
        m.push(entry("hello", 13));
        m.push(entry("empty", 0));
        let text = m.to_text();
        assert!(text.starts_with(MANIFEST_HEADER));
        assert!(text.contains("hello\t13\t7\t00000000deadbeef\n"));
        assert_eq!(Manifest::parse(&text, Path::new("m")).unwrap(), m);
    }

    #[test]
    fn push_replaces_same_name() {
        let mut m = Manifest::new();
        m.push(entry("a", 1));
        m.push(entry("b", 5));
        m.push(entry("a", 2));
        assert_eq!(m.len(), 2);
        assert_eq!(m.get("a").unwrap().input_len, 2);
        let names: Vec<&str> = m.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn rejects_wrong_header() {
        let err = Manifest::parse("name\tlen\n", Path::new("m")).unwrap_err();
        assert!(matches!(err, HarnessError::Manifest { line: 1, .. }));
    }

    #[test]
    fn rejects_bad_field_count_with_line_number() {
        let text = format!("{}\nhello\t13\t7\n", MANIFEST_HEADER);
        let err = Manifest::parse(&text, Path::new("m")).unwrap_err();
        assert!(matches!(err, HarnessError::Manifest { line: 2, .. }));
    }

    #[test]
    fn rejects_duplicate_names() {
        let text = format!(
            "{h}\na\t1\t1\t00\na\t1\t1\t00\n",
            h = MANIFEST_HEADER
        );
        assert!(Manifest::parse(&text, Path::new("m")).is_err());
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = format!("{}\n\n# note\nx\t0\t1\t1\n", MANIFEST_HEADER);
        let m = Manifest::parse(&text, Path::new("m")).unwrap();
        assert_eq!(m.get("x").unwrap().input_xxh64, 1);
    }

    #[test]
    fn checksum_parsing() {
        assert_eq!(parse_checksum("ff"), Some(255));
        assert_eq!(parse_checksum("0xFF"), Some(255));
        assert_eq!(parse_checksum(""), None);
        assert_eq!(parse_checksum("zz"), None);
        assert_eq!(parse_checksum("1234567890abcdef0"), None);
    }

    #[test]
    fn checksum_is_deterministic_and_content_sensitive() {
        assert_eq!(content_checksum(b"abc"), content_checksum(b"abc"));
        assert_ne!(content_checksum(b"abc"), content_checksum(b"abd"));
    }
}
