//! # CLI Behavior
//!
//! This is **one possible UI client** for hashpad, not the application itself.
//! It is the only place that knows about stdin/stdout, exit codes and output
//! formatting.
//!
//! ## Input Sources
//!
//! `write` and `encode` read the content from a file argument, or from stdin
//! when none is given:
//!
//! ```bash
//! echo "# Groceries" | hashpad write
//! hashpad encode notes.md --style "font-family:serif"
//! ```
//!
//! ## Logging
//!
//! Library events go through `tracing`. The subscriber writes to stderr and
//! reads its filter from `HASHPAD_LOG` (default `warn`). `--verbose` forces
//! `debug`.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: logging init, context init, dispatch
//! - `handlers`: one function per subcommand
//! - `render`: terminal output

mod commands;
mod handlers;
mod render;
pub mod setup;

pub use commands::run;
