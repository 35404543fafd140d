//! CLI definitions for quell.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// quell CLI.
#[derive(Parser)]
#[command(name = "quell")]
#[command(about = "Neutralize biased article text with AI capability sessions")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "quell.toml", global = true)]
    pub config: PathBuf,

    /// Use the offline word-table provider instead of the configured one
    #[arg(long, global = true)]
    pub offline: bool,

    /// Word table for the offline provider (TOML with a `[words]` table)
    #[arg(long, global = true)]
    pub lexicon: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Quell every qualifying block of an HTML page once
    Page {
        /// HTML file to quell
        file: PathBuf,

        /// Write the quelled page here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the pipeline response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle page quelling through the coordinator and persist the flag
    Toggle {
        #[arg(value_enum)]
        state: ToggleState,

        /// HTML page the toggle applies to
        #[arg(long)]
        page: PathBuf,

        /// Write the resulting page here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the persisted toggle flag
    Status,

    /// Forget the persisted toggle flag
    Reset,

    /// Write the default (inactive) toggle flag
    Install,

    /// Score, rewrite and summarize a text selection
    Selection {
        /// Selected text (read from stdin when omitted)
        text: Option<String>,

        /// Read the selection from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract the article of an HTML page, then score, rewrite and summarize it
    Article {
        /// HTML file holding the article
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Send a test prompt to the prompt capability
    Prompt {
        text: String,

        /// Print the answer as it streams in
        #[arg(long)]
        stream: bool,

        /// System prompt for the session
        #[arg(long)]
        system: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ToggleState {
    On,
    Off,
}

impl ToggleState {
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}
