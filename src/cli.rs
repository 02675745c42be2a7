//! CLI argument parsing for fastfile

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fastfile - Zero-copy file region access and fast checksums
#[derive(Parser, Debug)]
#[command(name = "fastfile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a byte range of a file and write it to stdout or a file
    Read(ReadArgs),

    /// Compute the fast checksum of a file
    Checksum(ChecksumArgs),

    /// Show size and modification time of a file
    Stat(StatArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Arguments for the read command
#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// File to read
    pub file: PathBuf,

    /// Byte offset to start reading at
    #[arg(short = 'o', long, default_value = "0")]
    pub offset: u64,

    /// Number of bytes to read [default: rest of file]
    #[arg(short = 'l', long)]
    pub length: Option<u64>,

    /// Write output to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Use buffered reads instead of memory mapping
    #[arg(long)]
    pub no_mmap: bool,
}

/// Arguments for the checksum command
#[derive(Parser, Debug)]
pub struct ChecksumArgs {
    /// File to checksum
    pub file: PathBuf,

    /// Force the portable scalar engine
    #[arg(long)]
    pub scalar: bool,
}

/// Arguments for the stat command
#[derive(Parser, Debug)]
pub struct StatArgs {
    /// File to stat
    pub file: PathBuf,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Print the default config file path
    #[arg(long)]
    pub path: bool,

    /// Write a default config file
    #[arg(long)]
    pub init: bool,
}
