// cli/args.rs — Command-line arguments for both binaries.
//
// clap handles flag syntax; the values that carry harness meaning (expected
// size, checksum, case names) are taken as raw strings and converted here so
// that a bad value is an ArgumentError with exit status 1, never clap's
// default status 2.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::cli::constants::{adjust_display_level, GENERATOR_NAME, VALIDATOR_NAME};
use crate::config::fixture_root;
use crate::corpus::{self, CaseSpec, CATALOG};
use crate::error::HarnessError;
use crate::fixture::parse_checksum;
use crate::validate::ValidationRequest;

// ── generate-fixtures ────────────────────────────────────────────────────────

/// Regenerate the Snappy fixture corpus.
#[derive(Debug, Parser)]
#[command(name = GENERATOR_NAME, version)]
pub struct GenerateArgs {
    /// Output directory [default: $SNAPPY_FIXTURE_DIR, else tests/data]
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Generate only the named case (repeatable)
    #[arg(long = "only", value_name = "NAME")]
    pub only: Vec<String>,

    /// Increase verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl GenerateArgs {
    pub fn fixture_root(&self) -> PathBuf {
        self.out.clone().unwrap_or_else(fixture_root)
    }

    /// Catalog entries to generate, in catalog order.
    pub fn selected_cases(&self) -> Result<Vec<CaseSpec>, HarnessError> {
        if self.only.is_empty() {
            return Ok(CATALOG.to_vec());
        }
        if let Some(unknown) = self.only.iter().find(|n| corpus::find(n).is_none()) {
            return Err(HarnessError::Argument(format!("unknown case name {:?}", unknown)));
        }
        Ok(CATALOG
            .iter()
            .filter(|c| self.only.iter().any(|n| n == c.name))
            .copied()
            .collect())
    }

    pub fn apply_display_level(&self) -> u32 {
        adjust_display_level(self.verbose, self.quiet)
    }
}

// ── validate-fixture ─────────────────────────────────────────────────────────

/// Check a Snappy artifact against its expected uncompressed size.
#[derive(Debug, Parser)]
#[command(name = VALIDATOR_NAME, version)]
pub struct ValidateArgs {
    /// Compressed file to check
    #[arg(value_name = "COMPRESSED_FILE", required_unless_present = "manifest")]
    pub compressed_file: Option<PathBuf>,

    /// Expected uncompressed size in bytes
    #[arg(value_name = "EXPECTED_SIZE", required_unless_present = "manifest")]
    pub expected_size: Option<String>,

    /// Expected XXH64 of the decompressed content, in hex
    #[arg(long, value_name = "HEX", conflicts_with = "manifest")]
    pub xxh64: Option<String>,

    /// Validate every fixture listed in DIR/MANIFEST.tsv instead
    #[arg(long, value_name = "DIR", conflicts_with_all = ["compressed_file", "expected_size"])]
    pub manifest: Option<PathBuf>,

    /// Increase verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

/// What `validate-fixture` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidateMode {
    Single(ValidationRequest),
    Batch(PathBuf),
}

impl ValidateArgs {
    pub fn mode(&self) -> Result<ValidateMode, HarnessError> {
        if let Some(dir) = &self.manifest {
            return Ok(ValidateMode::Batch(dir.clone()));
        }
        let (Some(path), Some(size)) = (&self.compressed_file, &self.expected_size) else {
            return Err(HarnessError::Argument(
                "expected <compressed_file> <expected_size>".to_owned(),
            ));
        };
        let mut request = ValidationRequest::new(path.clone(), parse_expected_size(size)?);
        if let Some(hex) = &self.xxh64 {
            let sum = parse_checksum(hex).ok_or_else(|| {
                HarnessError::Argument(format!("invalid xxh64 checksum {:?}", hex))
            })?;
            request = request.with_checksum(sum);
        }
        Ok(ValidateMode::Single(request))
    }

    pub fn apply_display_level(&self) -> u32 {
        adjust_display_level(self.verbose, self.quiet)
    }
}

/// Parse the expected uncompressed size: a non-negative decimal integer.
pub fn parse_expected_size(text: &str) -> Result<u64, HarnessError> {
    text.parse::<u64>().map_err(|_| {
        HarnessError::Argument(format!(
            "expected size must be a non-negative integer, got {:?}",
            text
        ))
    })
}

// ── Parse helpers ────────────────────────────────────────────────────────────

/// Outcome of parsing argv when it did not yield arguments.
#[derive(Debug)]
pub enum ParseExit {
    /// `--help` / `--version`: already rendered text for stdout, exit 0.
    Info(String),
    /// Usage error: message for stderr, exit 1.
    Usage(String),
}

fn classify(err: clap::Error) -> ParseExit {
    if err.use_stderr() {
        ParseExit::Usage(err.to_string())
    } else {
        ParseExit::Info(err.to_string())
    }
}

pub fn parse_generate_args<I, T>(argv: I) -> Result<GenerateArgs, ParseExit>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    GenerateArgs::try_parse_from(argv).map_err(classify)
}

pub fn parse_validate_args<I, T>(argv: I) -> Result<ValidateArgs, ParseExit>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    ValidateArgs::try_parse_from(argv).map_err(classify)
}
