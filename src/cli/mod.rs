//! Command-line interface definition.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::archive::Compression;

pub use commands::run;

/// File, archive, font and time helpers
#[derive(Parser, Debug)]
#[command(name = "toolbelt", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy a file or directory into a directory without overwriting
    #[command(alias = "cp")]
    Copy { src: PathBuf, dest: PathBuf },

    /// Move a file or directory into a directory
    #[command(alias = "mv")]
    Move { src: PathBuf, dest: PathBuf },

    /// Delete a file or directory tree
    #[command(alias = "rm")]
    Delete { path: PathBuf },

    /// Rename within the same directory
    Rename { path: PathBuf, new_name: String },

    /// Write text to a file
    Write {
        path: PathBuf,
        text: String,
        /// Append instead of replacing the content
        #[arg(short, long)]
        append: bool,
    },

    /// Print a file as text
    Cat { path: PathBuf },

    /// Print a file's size in human-readable units
    Size { path: PathBuf },

    /// Pack a file or directory into a JAR-style archive
    Pack {
        root: PathBuf,
        /// Directory receiving the archive
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
        /// Archive name (extension appended when missing)
        #[arg(short, long)]
        name: Option<String>,
        /// Override the configured compression
        #[arg(short, long, value_enum)]
        compression: Option<Compression>,
    },

    /// List archive entries
    #[command(alias = "ls")]
    List { archive: PathBuf },

    /// Extract an archive
    Unpack {
        archive: PathBuf,
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Check whether a file is a real TTF/OTF font
    Font { path: PathBuf },

    /// Describe an epoch-millisecond timestamp relative to now
    Ago {
        #[arg(allow_hyphen_values = true)]
        epoch_ms: i64,
        /// Reference time instead of the current clock
        #[arg(long, allow_hyphen_values = true)]
        now: Option<i64>,
    },
}
