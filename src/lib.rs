// snappy-fixtures — shared test vectors for independent Snappy implementations

pub mod cli;
pub mod codec;
pub mod config;
pub mod corpus;
pub mod error;
pub mod fixture;
pub mod generate;
pub mod validate;

pub use codec::{CodecError, ReferenceCodec, SnappyCodec};
pub use corpus::{CaseSpec, TestCase, CATALOG};
pub use error::{HarnessError, Stage};
pub use fixture::{FixtureStore, Manifest};
pub use generate::{FixtureSummary, Generator};
pub use validate::{ValidationReport, ValidationRequest, Validator, Verdict};

/// `numerator / denominator` as a compression ratio.
///
/// Returns `None` when `denominator` is 0, so an empty artifact never
/// produces an infinite or NaN ratio.
pub fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

/// Render a ratio as `"<r>x"` with two decimals, or `"n/a"`.
pub fn format_ratio(ratio: Option<f64>) -> String {
    match ratio {
        Some(r) => format!("{:.2}x", r),
        None => "n/a".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio(0, 0), None);
        assert_eq!(ratio(10, 0), None);
        assert_eq!(ratio(0, 1), Some(0.0));
        assert_eq!(ratio(100, 4), Some(25.0));
    }

    #[test]
    fn format_ratio_two_decimals() {
        assert_eq!(format_ratio(Some(25.0)), "25.00x");
        assert_eq!(format_ratio(Some(1.0 / 3.0)), "0.33x");
        assert_eq!(format_ratio(None), "n/a");
    }
}
