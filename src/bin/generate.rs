//! Binary entry point for `generate-fixtures`.
//!
//! Writes every catalog case (or the `--only` subset) to the fixture root as
//! `<name>.snappy`, prints one summary block per case, and writes the
//! manifest. The first failure halts the run with exit status 1.

use snappy_fixtures::cli::args::{parse_generate_args, GenerateArgs, ParseExit};
use snappy_fixtures::cli::constants::GENERATOR_NAME;
use snappy_fixtures::cli::help::print_bad_usage;
use snappy_fixtures::{display, displaylevel, FixtureStore, Generator, SnappyCodec};

fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let cases = args.selected_cases()?;
    let root = args.fixture_root();
    displaylevel!(3, "fixture root: {}\n", root.display());

    let generator = Generator::new(SnappyCodec::new(), FixtureStore::new(root));
    let summaries = generator.run(&cases)?;
    displaylevel!(3, "{} fixtures written\n", summaries.len());
    Ok(())
}

fn main() {
    let args = match parse_generate_args(std::env::args_os()) {
        Ok(a) => a,
        Err(ParseExit::Info(text)) => {
            print!("{}", text);
            std::process::exit(0);
        }
        Err(ParseExit::Usage(text)) => {
            print_bad_usage(GENERATOR_NAME, &text);
            std::process::exit(1);
        }
    };
    args.apply_display_level();

    if let Err(err) = run(args) {
        display!("{}: {:#}\n", GENERATOR_NAME, err);
        std::process::exit(1);
    }
}
