use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// "v0.3.0" for tagged releases, with the commit appended for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "hashpad",
    bin_name = "hashpad",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "A notepad whose documents live in the URL fragment", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new, empty document and print its address
    #[command(display_order = 1)]
    New,

    /// Replace the current document's content (stdin when no file is given)
    #[command(display_order = 2)]
    Write {
        /// File to read the content from
        file: Option<PathBuf>,

        /// Style string stored alongside the content
        #[arg(long, short)]
        style: Option<String>,
    },

    /// Print the current document (the default command)
    #[command(display_order = 3)]
    Show {
        /// Also print the style string
        #[arg(long)]
        style: bool,
    },

    /// Make an address current, as if pasted into the address bar
    #[command(display_order = 4)]
    Open {
        /// URL, #fragment or bare fragment
        address: String,
    },

    /// Print the derived title of the current document
    #[command(display_order = 5)]
    Title,

    /// Write the current document to a .txt or .md file
    #[command(display_order = 6)]
    Export {
        /// Directory to write into (defaults to the current directory)
        #[arg(long, short)]
        dir: Option<PathBuf>,
    },

    /// Encode content into an address without touching saved state
    #[command(display_order = 10)]
    Encode {
        /// File to read the content from
        file: Option<PathBuf>,

        /// Style string stored alongside the content
        #[arg(long, short)]
        style: Option<String>,

        /// Document identity to attach (16 lowercase letters/digits)
        #[arg(long, conflicts_with = "new_id")]
        id: Option<String>,

        /// Attach a freshly generated identity
        #[arg(long)]
        new_id: bool,
    },

    /// Decode an address without touching saved state
    #[command(display_order = 11)]
    Decode {
        /// URL, #fragment or bare fragment
        address: String,

        /// Print content, style, identity and title as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
