// cli/help.rs — Usage text printed on bad invocations.

use crate::cli::constants::{display_level, GENERATOR_NAME, VALIDATOR_NAME};
use crate::config::{ENV_FIXTURE_DIR, FIXTURE_EXTENSION};

/// Brief usage for `validate-fixture`.
pub fn validator_usage(program: &str) -> String {
    format!(
        "Usage: {p} <compressed_file> <expected_size> [--xxh64 <hex>]\n\
         \x20      {p} --manifest <dir>\n\
         Example: {p} test.{ext} 100\n",
        p = program,
        ext = FIXTURE_EXTENSION
    )
}

/// Brief usage for `generate-fixtures`.
pub fn generator_usage(program: &str) -> String {
    format!(
        "Usage: {p} [--out <dir>] [--only <name>]... [-v|-q]\n\
         Writes one <name>.{ext} per case plus MANIFEST.tsv; <dir> defaults to ${env} or tests/data.\n",
        p = program,
        ext = FIXTURE_EXTENSION,
        env = ENV_FIXTURE_DIR
    )
}

/// Print `detail` and the program's usage to stderr (at display level 1).
pub fn print_bad_usage(program: &str, detail: &str) {
    if display_level() < 1 {
        return;
    }
    let usage = if program == GENERATOR_NAME {
        generator_usage(program)
    } else {
        validator_usage(program)
    };
    let detail = detail.trim_end();
    if !detail.is_empty() {
        eprintln!("{}", detail);
    }
    eprint!("{}", usage);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validator_usage_names_both_positionals() {
        let text = validator_usage(VALIDATOR_NAME);
        assert!(text.contains("<compressed_file> <expected_size>"));
        assert!(text.contains("Example: validate-fixture test.snappy 100"));
    }

    #[test]
    fn generator_usage_mentions_env_override() {
        assert!(generator_usage(GENERATOR_NAME).contains(ENV_FIXTURE_DIR));
    }
}
