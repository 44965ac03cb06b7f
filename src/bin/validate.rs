//! Binary entry point for `validate-fixture`.
//!
//! Single mode: `validate-fixture <compressed_file> <expected_size>` runs the
//! four-stage pipeline and prints a checklist; any stage failure is reported
//! on stderr with exit status 1.
//!
//! Batch mode: `validate-fixture --manifest <dir>` checks every fixture in
//! `<dir>` against `<dir>/MANIFEST.tsv`.

use std::path::Path;

use snappy_fixtures::cli::args::{parse_validate_args, ParseExit, ValidateMode};
use snappy_fixtures::cli::constants::VALIDATOR_NAME;
use snappy_fixtures::cli::help::print_bad_usage;
use snappy_fixtures::validate::BatchOutcome;
use snappy_fixtures::{
    display, displaylevel, displayout, FixtureStore, HarnessError, Manifest, SnappyCodec,
    Stage, ValidationRequest, Validator,
};

fn validate_single(validator: &Validator<SnappyCodec>, request: &ValidationRequest) -> i32 {
    let report = validator.validate_file(request);
    for line in report.checklist() {
        displayout!("{}\n", line);
    }
    match report.into_result() {
        Ok(_) => 0,
        Err(err) => {
            // Only load errors lack the stage in their own message.
            match err.stage() {
                Some(Stage::Load) => display!("ERROR: {}: {}\n", Stage::Load, err),
                _ => display!("ERROR: {}\n", err),
            }
            err.exit_code()
        }
    }
}

fn print_batch(outcome: &BatchOutcome) {
    for (name, report) in &outcome.reports {
        match &report.failure {
            None => displayout!("PASS {}\n", name),
            Some(err) => {
                displayout!("FAIL {}\n", name);
                display!("ERROR: {}: {}\n", name, err);
            }
        }
    }
    for fixture in &outcome.unlisted {
        displayout!("FAIL {}\n", fixture.name);
        display!(
            "ERROR: {}: no manifest entry for {}\n",
            fixture.name,
            fixture.path.display()
        );
    }
}

fn validate_batch(validator: &Validator<SnappyCodec>, root: &Path) -> Result<i32, HarnessError> {
    let manifest = Manifest::load(root)?;
    let store = FixtureStore::new(root);
    displaylevel!(3, "{} manifest entries in {}\n", manifest.len(), root.display());
    let outcome = validator.validate_store(&store, &manifest)?;
    print_batch(&outcome);
    if outcome.passed() {
        displayout!("\nAll {} fixtures passed\n", outcome.reports.len());
        Ok(0)
    } else {
        display!("{} fixture(s) failed\n", outcome.failed_count());
        Ok(1)
    }
}

fn main() {
    let args = match parse_validate_args(std::env::args_os()) {
        Ok(a) => a,
        Err(ParseExit::Info(text)) => {
            print!("{}", text);
            std::process::exit(0);
        }
        Err(ParseExit::Usage(text)) => {
            print_bad_usage(VALIDATOR_NAME, &text);
            std::process::exit(1);
        }
    };
    args.apply_display_level();

    let validator = Validator::new(SnappyCodec::new());
    let exit_code = match args.mode() {
        Ok(ValidateMode::Single(request)) => validate_single(&validator, &request),
        Ok(ValidateMode::Batch(root)) => match validate_batch(&validator, &root) {
            Ok(code) => code,
            Err(err) => {
                display!("ERROR: {}\n", err);
                err.exit_code()
            }
        },
        Err(err) => {
            print_bad_usage(VALIDATOR_NAME, &err.to_string());
            err.exit_code()
        }
    };
    std::process::exit(exit_code);
}
