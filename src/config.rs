// config.rs — Compile-time configuration constants and environment overrides.
//
// The fixture layout is fixed: one file per case at
// `<root>/<name>.<FIXTURE_EXTENSION>`, plus a manifest at `<root>/MANIFEST_FILE`.
// Only the root may be changed at runtime, by `--out`/`--manifest` on the
// command line or by the SNAPPY_FIXTURE_DIR environment variable.

use std::path::PathBuf;

use crate::cli::constants::display_level;

// Default fixture root, relative to the working directory.
// Can be overridden by the SNAPPY_FIXTURE_DIR environment variable,
// or by the --out command-line flag of `generate-fixtures`.
pub const DEFAULT_FIXTURE_DIR: &str = "tests/data";

// Environment variable consulted by [`fixture_root`].
pub const ENV_FIXTURE_DIR: &str = "SNAPPY_FIXTURE_DIR";

// Extension of every fixture file (without the leading dot).
pub const FIXTURE_EXTENSION: &str = "snappy";

// Name of the manifest written next to the fixtures.
pub const MANIFEST_FILE: &str = "MANIFEST.tsv";

// First line of every manifest. Bump the version when the column layout changes.
pub const MANIFEST_HEADER: &str = "# snappy-fixtures manifest v1";

// Seed used for every XXH64 content fingerprint.
pub const CHECKSUM_SEED: u64 = 0;

/// Resolve the fixture root from the `SNAPPY_FIXTURE_DIR` environment variable.
///
/// Falls back to [`DEFAULT_FIXTURE_DIR`] when the variable is unset or empty.
pub fn fixture_root() -> PathBuf {
    fixture_root_from(std::env::var(ENV_FIXTURE_DIR).ok().as_deref())
}

/// Testable core of [`fixture_root`]: resolve an optional `SNAPPY_FIXTURE_DIR` value.
///
/// Pass `Some(s)` with the raw string, or `None` to simulate the variable being unset.
pub fn fixture_root_from(env_val: Option<&str>) -> PathBuf {
    match env_val {
        Some(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        Some(_) => {
            if display_level() >= 2 {
                eprintln!(
                    "Ignore environment variable setting {}: empty path ",
                    ENV_FIXTURE_DIR
                );
            }
            PathBuf::from(DEFAULT_FIXTURE_DIR)
        }
        None => PathBuf::from(DEFAULT_FIXTURE_DIR),
    }
}
