use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "discogs_tag", author, version, about)]
pub struct CliArguments {
    /// Verbose mode (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to the directory whose files should be tagged
    #[arg(short, long)]
    pub input: PathBuf,

    /// Discogs release id
    ///
    /// `1234`, `r1234` and `[r1234]` are all accepted.
    #[arg(short, long)]
    pub release: String,
}
