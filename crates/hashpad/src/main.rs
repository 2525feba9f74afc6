//! # Hashpad CLI
//!
//! A thin terminal client for `hashpadapp`. The binary only invokes
//! `cli::run()` and handles process termination; everything user-facing lives
//! in `src/cli/`.
//!
//! ## The Terminal as a Browser Tab
//!
//! A hashpad document lives in a URL fragment. The CLI keeps the "tab" state
//! (current address with history, the durable last fragment, caret memory) in
//! a data directory, so:
//!
//! - `hashpad new` is clicking "new document"
//! - `hashpad write` is typing and letting the save fire
//! - `hashpad show` is reloading the page
//! - `hashpad open <url>` is pasting a link into the address bar
//!
//! `encode` and `decode` are stateless: they never touch the data directory.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/hashpad/src/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - dispatch + logging setup (commands.rs)                   │
//! │  - per-command handlers (handlers.rs)                       │
//! │  - terminal output (render.rs)                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/hashpadapp/src/api.rs)                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
