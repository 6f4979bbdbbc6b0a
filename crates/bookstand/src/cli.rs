//! Clap derive structures for the `bookstand` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// bookstand -- your reading shelves from the command line
#[derive(Debug, Parser)]
#[command(
    name = "bookstand",
    version,
    about = "Track books, shelves, and reading progress from the command line",
    long_about = "Browse and update a personal bookshelf served by a Calibre-Web style\n\
        library. Every change is sent to the server and followed by a full reload,\n\
        so what you see is always what the server stored.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "BOOKSTAND_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Library API root URL (overrides profile)
    #[arg(long, short = 's', env = "BOOKSTAND_SERVER", global = true)]
    pub server: Option<String>,

    /// Session cookie, e.g. "session=abc123" (overrides profile)
    #[arg(long, env = "BOOKSTAND_SESSION", global = true, hide_env_values = true)]
    pub session: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BOOKSTAND_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "BOOKSTAND_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "BOOKSTAND_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Reading state, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    #[value(alias = "quero-ler")]
    Wanted,
    #[value(alias = "lendo")]
    Reading,
    #[value(alias = "lido")]
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, inspect, and update books
    #[command(alias = "b")]
    Books(BooksArgs),

    /// Manage shelves
    #[command(alias = "sh")]
    Shelves(ShelvesArgs),

    /// View and update your profile
    Profile(ProfileArgs),

    /// Reading statistics
    Stats,

    /// Render a page or modal as HTML for a fragment route
    Render(RenderArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BOOKS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BooksArgs {
    #[command(subcommand)]
    pub command: BooksCommand,
}

#[derive(Debug, Subcommand)]
pub enum BooksCommand {
    /// List books, optionally filtered
    #[command(alias = "ls")]
    List {
        /// Case-insensitive title substring
        #[arg(long, short = 'f')]
        search: Option<String>,

        /// Only books in this reading state
        #[arg(long)]
        status: Option<StatusArg>,

        /// Only books on this shelf (ID or name)
        #[arg(long)]
        shelf: Option<String>,
    },

    /// Show one book
    Show {
        /// Book ID
        book: String,
    },

    /// Create or update a book's reading data
    Save(SaveBookArgs),

    /// Remove a book from your library
    #[command(alias = "rm")]
    Delete {
        /// Book ID
        book: String,
    },
}

#[derive(Debug, Args)]
pub struct SaveBookArgs {
    /// Book ID
    pub book: String,

    #[arg(long)]
    pub status: Option<StatusArg>,

    #[arg(long)]
    pub rating: Option<f64>,

    /// Comma-separated feelings
    #[arg(long, value_delimiter = ',')]
    pub feelings: Option<Vec<String>>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Physical, ebook, audiobook, ...
    #[arg(long)]
    pub media_type: Option<String>,

    #[arg(long)]
    pub pages: Option<u32>,

    /// Listening time for audiobooks
    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub review: Option<String>,

    #[arg(long)]
    pub synopsis: Option<String>,

    #[arg(long)]
    pub favorite: Option<bool>,

    #[arg(long)]
    pub cover_url: Option<String>,

    /// Shelf (ID or name); repeat to set the full shelf list
    #[arg(long = "shelf")]
    pub shelves: Vec<String>,

    /// Remove the book from every shelf
    #[arg(long, conflicts_with = "shelves")]
    pub no_shelves: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SHELVES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ShelvesArgs {
    #[command(subcommand)]
    pub command: ShelvesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShelvesCommand {
    /// List shelves with their book counts
    #[command(alias = "ls")]
    List,

    /// Create a shelf
    Create {
        /// Shelf name
        name: String,
    },

    /// Delete a shelf (its books are kept)
    #[command(alias = "rm")]
    Delete {
        /// Shelf ID or name
        shelf: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PROFILE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the signed-in profile
    Show,

    /// Change display name or theme
    Set {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        theme: Option<ThemeArg>,
    },

    /// Upload a new avatar image
    Avatar {
        /// Image file
        path: PathBuf,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RENDER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Fragment route, e.g. "#/meus-livros" or "#/book/42"
    #[arg(default_value = "#/estantes")]
    pub fragment: String,

    /// Emit the whole document instead of the page or modal
    #[arg(long)]
    pub document: bool,

    /// Search term for the books grid
    #[arg(long)]
    pub search: Option<String>,

    /// Status filter for the books grid
    #[arg(long)]
    pub status: Option<StatusArg>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Show the current configuration (secrets masked)
    Show,

    /// Set a profile key
    Set {
        /// server, session, session_env, ca_cert, insecure, timeout
        key: String,
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },

    /// Store a session cookie for the active profile in the system keyring
    SetSession,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
