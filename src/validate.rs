//! Fixture validation pipeline.
//!
//! A compressed artifact is judged in four stages, each gating the next:
//!
//! 1. **Load** — read the file into memory.
//! 2. **Structure** — the codec must accept the stream's framing. A stream
//!    rejected here is never decoded.
//! 3. **Declared length** — the header's uncompressed length must parse and
//!    equal the expected size. A mismatch is reported before any decoding.
//! 4. **Decompress** — the stream must decode, the decoded length must equal
//!    the expected size, and, when a checksum is known, the decoded bytes
//!    must hash to it.
//!
//! The first failing stage ends the run. Nothing is retried.

use std::path::{Path, PathBuf};

use crate::cli::constants::{ALL_PASSED_MARKER, CHECK_MARK};
use crate::codec::ReferenceCodec;
use crate::error::{HarnessError, Stage};
use crate::fixture::{content_checksum, read_fixture, FixtureStore, Manifest, StoredFixture};
use crate::{displaylevel, format_ratio, ratio};

// ─────────────────────────────────────────────────────────────────────────────
// Request / report
// ─────────────────────────────────────────────────────────────────────────────

/// What to validate and what it should decode to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRequest {
    pub path: PathBuf,
    pub expected_size: u64,
    pub expected_xxh64: Option<u64>,
}

impl ValidationRequest {
    pub fn new(path: impl Into<PathBuf>, expected_size: u64) -> Self {
        ValidationRequest { path: path.into(), expected_size, expected_xxh64: None }
    }

    pub fn with_checksum(mut self, xxh64: u64) -> Self {
        self.expected_xxh64 = Some(xxh64);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

/// Everything learned about one artifact. Fields stay `None` for stages
/// that were never reached.
#[derive(Debug)]
pub struct ValidationReport {
    pub source_file: PathBuf,
    pub compressed_size: Option<usize>,
    pub structurally_valid: bool,
    pub declared_uncompressed_size: Option<usize>,
    pub decompressed_size: Option<usize>,
    pub expected_size: u64,
    pub expected_xxh64: Option<u64>,
    pub decompressed_xxh64: Option<u64>,
    pub verdict: Verdict,
    pub failure: Option<HarnessError>,
}

impl ValidationReport {
    fn pending(source_file: &Path, expected_size: u64, expected_xxh64: Option<u64>) -> Self {
        ValidationReport {
            source_file: source_file.to_path_buf(),
            compressed_size: None,
            structurally_valid: false,
            declared_uncompressed_size: None,
            decompressed_size: None,
            expected_size,
            expected_xxh64,
            decompressed_xxh64: None,
            verdict: Verdict::Fail,
            failure: None,
        }
    }

    fn conclude(mut self, outcome: Result<(), HarnessError>) -> Self {
        match outcome {
            Ok(()) => self.verdict = Verdict::Pass,
            Err(err) => {
                self.verdict = Verdict::Fail;
                self.failure = Some(err);
            }
        }
        self
    }

    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }

    pub fn failure_stage(&self) -> Option<Stage> {
        self.failure.as_ref().and_then(HarnessError::stage)
    }

    /// `decompressed / compressed`, once decoding succeeded.
    pub fn ratio(&self) -> Option<f64> {
        match (self.decompressed_size, self.compressed_size) {
            (Some(d), Some(c)) => ratio(d as u64, c as u64),
            _ => None,
        }
    }

    /// Confirmation lines for every stage that passed, ending with the
    /// overall-success marker when the verdict is [`Verdict::Pass`].
    pub fn checklist(&self) -> Vec<String> {
        let mut lines = vec![format!("File: {}", self.source_file.display())];
        let Some(compressed) = self.compressed_size else {
            return lines;
        };
        lines.push(format!("Compressed size: {} bytes", compressed));
        if self.structurally_valid {
            lines.push(format!("{} Format validation passed", CHECK_MARK));
        }
        if let Some(declared) = self.declared_uncompressed_size {
            lines.push(format!("{} Uncompressed length: {} bytes", CHECK_MARK, declared));
            if declared as u64 == self.expected_size {
                lines.push(format!(
                    "{} Size matches expected: {} bytes",
                    CHECK_MARK, self.expected_size
                ));
            }
        }
        if self.decompressed_size.is_some() {
            lines.push(format!("{} Decompression successful", CHECK_MARK));
        }
        if let (Some(expected), Some(actual)) = (self.expected_xxh64, self.decompressed_xxh64) {
            if expected == actual {
                lines.push(format!(
                    "{} Content checksum matches: xxh64={:016x}",
                    CHECK_MARK, actual
                ));
            }
        }
        if self.passed() {
            lines.push(format!("{} Compression ratio: {}", CHECK_MARK, format_ratio(self.ratio())));
            lines.push(String::new());
            lines.push(format!("{} - compressed data is valid!", ALL_PASSED_MARKER));
        }
        lines
    }

    /// `Ok(self)` on pass, the stage error otherwise.
    pub fn into_result(mut self) -> Result<Self, HarnessError> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validator
// ─────────────────────────────────────────────────────────────────────────────

/// Runs the validation pipeline against a [`ReferenceCodec`].
pub struct Validator<C> {
    codec: C,
}

impl<C: ReferenceCodec> Validator<C> {
    pub fn new(codec: C) -> Self {
        Validator { codec }
    }

    /// Stage 1 plus the rest of the pipeline for a file on disk.
    pub fn validate_file(&self, request: &ValidationRequest) -> ValidationReport {
        let report =
            ValidationReport::pending(&request.path, request.expected_size, request.expected_xxh64);
        displaylevel!(4, "{}: {}\n", Stage::Load, request.path.display());
        match read_fixture(&request.path) {
            Ok(bytes) => self.check(bytes.as_slice(), report),
            Err(err) => report.conclude(Err(err)),
        }
    }

    /// Stages 2–4 for bytes already in memory; `source` labels the report.
    pub fn validate_bytes(
        &self,
        source: &Path,
        compressed: &[u8],
        expected_size: u64,
        expected_xxh64: Option<u64>,
    ) -> ValidationReport {
        let report = ValidationReport::pending(source, expected_size, expected_xxh64);
        self.check(compressed, report)
    }

    fn check(&self, compressed: &[u8], mut report: ValidationReport) -> ValidationReport {
        report.compressed_size = Some(compressed.len());
        let outcome = self.run_stages(compressed, &mut report);
        report.conclude(outcome)
    }

    fn run_stages(
        &self,
        compressed: &[u8],
        report: &mut ValidationReport,
    ) -> Result<(), HarnessError> {
        let expected = report.expected_size;

        // ── Stage 2: structure ────────────────────────────────────────────────
        displaylevel!(4, "{}\n", Stage::Structure);
        if !self.codec.is_valid_compressed_buffer(compressed) {
            return Err(HarnessError::Format {
                stage: Stage::Structure,
                detail: format!(
                    "invalid compressed data format ({} bytes, codec {})",
                    compressed.len(),
                    self.codec.name()
                ),
            });
        }
        report.structurally_valid = true;

        // ── Stage 3: declared length ─────────────────────────────────────────
        displaylevel!(4, "{}\n", Stage::DeclaredLength);
        let declared = self.codec.uncompressed_length(compressed).map_err(|e| {
            HarnessError::Format {
                stage: Stage::DeclaredLength,
                detail: format!("cannot get uncompressed length: {}", e.detail),
            }
        })?;
        report.declared_uncompressed_size = Some(declared);
        if declared as u64 != expected {
            return Err(HarnessError::SizeMismatch {
                stage: Stage::DeclaredLength,
                expected,
                actual: declared as u64,
            });
        }

        // ── Stage 4: decompress and cross-check ──────────────────────────────
        displaylevel!(4, "{}\n", Stage::Decompress);
        let decoded = self
            .codec
            .decompress(compressed)
            .map_err(|e| HarnessError::Decompression { detail: e.detail })?;
        report.decompressed_size = Some(decoded.len());
        if decoded.len() as u64 != expected {
            return Err(HarnessError::SizeMismatch {
                stage: Stage::Decompress,
                expected,
                actual: decoded.len() as u64,
            });
        }
        if let Some(expected_xxh64) = report.expected_xxh64 {
            let actual = content_checksum(&decoded);
            report.decompressed_xxh64 = Some(actual);
            if actual != expected_xxh64 {
                return Err(HarnessError::ContentMismatch { expected: expected_xxh64, actual });
            }
        }
        Ok(())
    }

    /// Validate every fixture listed in `manifest` from `store`, and flag
    /// fixture files the manifest does not list.
    pub fn validate_store(
        &self,
        store: &FixtureStore,
        manifest: &Manifest,
    ) -> Result<BatchOutcome, HarnessError> {
        let reports = manifest
            .entries()
            .iter()
            .map(|entry| {
                let request = ValidationRequest::new(store.path_for(&entry.name), entry.input_len)
                    .with_checksum(entry.input_xxh64);
                (entry.name.clone(), self.validate_file(&request))
            })
            .collect();
        let unlisted = store
            .list()?
            .into_iter()
            .filter(|f| manifest.get(&f.name).is_none())
            .collect();
        Ok(BatchOutcome { reports, unlisted })
    }
}

/// Result of [`Validator::validate_store`].
#[derive(Debug)]
pub struct BatchOutcome {
    pub reports: Vec<(String, ValidationReport)>,
    /// Fixture files present on disk with no manifest entry.
    pub unlisted: Vec<StoredFixture>,
}

impl BatchOutcome {
    pub fn passed(&self) -> bool {
        self.unlisted.is_empty() && self.reports.iter().all(|(_, r)| r.passed())
    }

    pub fn failed_count(&self) -> usize {
        self.unlisted.len() + self.reports.iter().filter(|(_, r)| !r.passed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::SnappyCodec;

    #[test]
    fn checklist_for_passing_report_ends_with_marker() {
        let codec = SnappyCodec::new();
        let compressed = codec.compress(b"Hello, World!").unwrap();
        let report =
            Validator::new(codec).validate_bytes(Path::new("hello.snappy"), &compressed, 13, None);
        assert!(report.passed());
        let lines = report.checklist();
        assert_eq!(lines[0], "File: hello.snappy");
        assert!(lines.iter().any(|l| l.contains("Size matches expected: 13 bytes")));
        assert!(lines.last().unwrap().starts_with(ALL_PASSED_MARKER));
    }

    #[test]
    fn checklist_for_failing_report_has_no_marker() {
        let codec = SnappyCodec::new();
        let compressed = codec.compress(&[b'a'; 100]).unwrap();
        let report = Validator::new(codec).validate_bytes(Path::new("r"), &compressed, 99, None);
        assert!(!report.passed());
        let lines = report.checklist();
        assert!(lines.iter().any(|l| l.contains("Uncompressed length: 100 bytes")));
        assert!(!lines.iter().any(|l| l.contains("Size matches")));
        assert!(!lines.iter().any(|l| l.contains(ALL_PASSED_MARKER)));
    }

    #[test]
    fn into_result_returns_stage_error() {
        let report = Validator::new(SnappyCodec::new())
            .validate_bytes(Path::new("junk"), &[0xFF, 0xFF], 1, None);
        let err = report.into_result().unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Structure));
    }
}
