//! Command-line plumbing shared by `generate-fixtures` and `validate-fixture`.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program names, output markers, the `DISPLAY_LEVEL` atomic and display macros. |
//! | [`help`]      | Usage text for bad invocations. |
//! | [`args`]      | clap argument structs and conversion of raw values into harness requests. |

pub mod constants;
pub mod help;
pub mod args;
