//! CLI - Command Line Interface for Fluxify
//!
//! Every catalog operation the TUI offers is scriptable. All output is
//! JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Browse
//! fluxify trending -t tv --pages 2
//! fluxify discover --genre 878 --year 2016 --sort rating
//!
//! # Details and search
//! fluxify info 329865
//! fluxify search "blade runner"
//!
//! # Favorites and the synthesis lab
//! fluxify favorites toggle 329865
//! fluxify synth 329865 157336 78 --no-delay
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::{MediaType, SortKey};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments or missing configuration
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Title not found or empty result
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Fluxify - movie and TV discovery in the terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "fluxify",
    version,
    about = "Movie and TV discovery in the terminal",
    long_about = "Browse trending titles, filter the catalog, keep favorites \
                  and run the synthesis lab, backed by TMDB.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  fluxify                              Launch interactive TUI\n\
                  fluxify trending -t tv               Trending TV shows\n\
                  fluxify discover --actor 287         Titles with a cast member\n\
                  fluxify synth 603 27205 157336       Run the synthesis lab"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Trending titles of the day
    #[command(visible_alias = "tr")]
    Trending(TrendingCmd),

    /// Filtered and sorted catalog
    #[command(visible_alias = "d")]
    Discover(DiscoverCmd),

    /// List genres for a media type
    Genres(GenresCmd),

    /// Details for a movie or show
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Search movies or shows by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Manage the favorites list
    #[command(visible_alias = "fav")]
    Favorites(FavoritesCmd),

    /// Shuffle the similar titles of three seed movies
    Synth(SynthCmd),
}

/// Media type argument
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaTypeArg {
    /// Movies
    #[default]
    Movie,
    /// TV shows
    Tv,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> Self {
        match arg {
            MediaTypeArg::Movie => MediaType::Movie,
            MediaTypeArg::Tv => MediaType::Tv,
        }
    }
}

/// Sort argument for discovery
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortArg {
    /// Most popular first (default)
    #[default]
    Popular,
    /// Highest rated first
    Rating,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Popular => SortKey::PopularityDesc,
            SortArg::Rating => SortKey::RatingDesc,
        }
    }
}

// =============================================================================
// Catalog Commands
// =============================================================================

/// Get trending movies or TV shows
#[derive(Args, Debug)]
pub struct TrendingCmd {
    /// Media type
    #[arg(long, short = 't', value_enum, default_value = "movie")]
    pub media_type: MediaTypeArg,

    /// Number of pages to load
    #[arg(long, short = 'p', default_value = "1")]
    pub pages: u32,

    /// Maximum number of results
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

/// Filter and sort the catalog
#[derive(Args, Debug)]
pub struct DiscoverCmd {
    /// Media type
    #[arg(long, short = 't', value_enum, default_value = "movie")]
    pub media_type: MediaTypeArg,

    /// Genre id (see `fluxify genres`)
    #[arg(long, short = 'g')]
    pub genre: Option<u32>,

    /// Release (or first air) year
    #[arg(long, short = 'y')]
    pub year: Option<u16>,

    /// Minimum average rating (0-10)
    #[arg(long, short = 'r', default_value = "0")]
    pub min_rating: f32,

    /// Sort order
    #[arg(long, short = 's', value_enum, default_value = "popular")]
    pub sort: SortArg,

    /// Cast member id
    #[arg(long, short = 'a')]
    pub actor: Option<u64>,

    /// Number of pages to load
    #[arg(long, short = 'p', default_value = "1")]
    pub pages: u32,

    /// Maximum number of results
    #[arg(long, short = 'l')]
    pub limit: Option<usize>,
}

/// List genres
#[derive(Args, Debug)]
pub struct GenresCmd {
    /// Media type
    #[arg(long, short = 't', value_enum, default_value = "movie")]
    pub media_type: MediaTypeArg,
}

/// Get detailed information about a movie or TV show
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// TMDB id
    #[arg(required = true)]
    pub id: u64,

    /// Media type of the id
    #[arg(long, short = 't', value_enum, default_value = "movie")]
    pub media_type: MediaTypeArg,
}

/// Search by title
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (more than two characters)
    #[arg(required = true)]
    pub query: String,

    /// Media type
    #[arg(long, short = 't', value_enum, default_value = "movie")]
    pub media_type: MediaTypeArg,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

// =============================================================================
// Favorites Command
// =============================================================================

#[derive(Args, Debug)]
pub struct FavoritesCmd {
    #[command(subcommand)]
    pub action: FavoritesAction,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesAction {
    /// Print the favorites list
    #[command(visible_alias = "ls")]
    List,

    /// Add a title, or remove it if already a favorite
    Toggle {
        /// TMDB id
        id: u64,

        /// Media type of the id
        #[arg(long, short = 't', value_enum, default_value = "movie")]
        media_type: MediaTypeArg,
    },
}

// =============================================================================
// Synthesis Command
// =============================================================================

/// Run the synthesis lab over three seed movies
#[derive(Args, Debug)]
pub struct SynthCmd {
    /// Three TMDB movie ids
    #[arg(required = true, num_args = 3)]
    pub ids: Vec<u64>,

    /// Skip the scanning delay
    #[arg(long)]
    pub no_delay: bool,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Result of `favorites toggle`
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub id: u64,
    pub title: String,
    pub favorite: bool,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print human-readable lines, or the JSON form of `data`
    pub fn print_lines<T: Serialize>(&self, data: T, lines: &[String]) -> anyhow::Result<()> {
        if self.json {
            return self.print(data);
        }
        for line in lines {
            println!("{}", line);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
