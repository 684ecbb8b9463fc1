//! CLI argument definitions for the dotson binary.

use clap::{Parser, Subcommand};

/// Read, write, and delete values in JSON files by dotted path
#[derive(Parser, Debug)]
#[command(name = "dotson")]
#[command(about = "Dotted-path addressing for JSON files")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value at a path
    Get(GetArgs),
    /// Set the value at a path and rewrite the file
    Set(SetArgs),
    /// Delete the value at a path and rewrite the file
    Del(DelArgs),
    /// Pretty-print a whole file
    Fmt(FmtArgs),
}

/// Arguments for the get command
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// JSON file to read (a leading ~ expands to the home directory)
    pub file: String,

    /// Dotted path, e.g. servers[0].host (use "." for the whole document)
    pub path: String,

    /// Pretty-print the result
    #[arg(short, long)]
    pub pretty: bool,
}

/// Arguments for the set command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// JSON file to modify
    pub file: String,

    /// Dotted path to assign
    pub path: String,

    /// New value, parsed as JSON ("1", "true", "[1,2]"). Values that do not
    /// parse are taken as bare strings unless --strict is set.
    pub value: String,

    /// Reject values that are not valid JSON instead of treating them as strings
    #[arg(long)]
    pub strict: bool,

    /// Indent string used when rewriting the file
    #[arg(long, default_value = "  ", env = "DOTSON_INDENT")]
    pub indent: String,
}

/// Arguments for the del command
#[derive(clap::Args, Debug)]
pub struct DelArgs {
    /// JSON file to modify
    pub file: String,

    /// Dotted path to delete
    pub path: String,

    /// Indent string used when rewriting the file
    #[arg(long, default_value = "  ", env = "DOTSON_INDENT")]
    pub indent: String,
}

/// Arguments for the fmt command
#[derive(clap::Args, Debug)]
pub struct FmtArgs {
    /// JSON file to pretty-print
    pub file: String,

    /// Indent string
    #[arg(long, default_value = "  ", env = "DOTSON_INDENT")]
    pub indent: String,
}
