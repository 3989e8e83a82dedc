use std::path::Path;

use clap::Parser;
use internal_prelude::*;

use crate::{args::CliArguments, discogs::Client, models::Album};

pub mod args;
pub mod discogs;
pub mod files;
pub mod models;
pub mod tagger;
pub mod token;
pub mod tracing;

pub(crate) mod internal_prelude {
    #[allow(unused_imports)]
    pub(crate) use tracing::{debug, error, info, trace, warn};

    pub(crate) use crate::errors::*;
}

pub(crate) mod errors {
    pub use color_eyre::Result;
    #[allow(unused_imports)]
    pub use color_eyre::eyre::{ContextCompat, OptionExt, WrapErr, bail, eyre};
}

fn main() -> Result<()> {
    // Parse commandline options.
    let opt = CliArguments::parse();

    // Set the verbosity level of the logger.
    tracing::install_tracing(opt.verbose)?;
    color_eyre::install()?;

    let token = token::obtain(Path::new(token::TOKEN_FILE), &mut std::io::stdin().lock())?;

    let release_id = discogs::sanitize_id(&opt.release);
    let client = Client::new(&token);
    let release = client.release(&release_id)?;

    let files = files::collect_audio_files(&opt.input)?;

    let album = Album::from_release(release, files)?;
    tagger::tag_tracks(&album)
}
