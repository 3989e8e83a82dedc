use std::{
    fs::File,
    io::{BufRead, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::internal_prelude::*;

/// Location of the token cache, relative to the invocation directory.
pub const TOKEN_FILE: &str = ".discogs_token.yml";

/// Discogs personal access tokens are 40 alphabetic characters.
const TOKEN_LEN: usize = 40;

/// How often a corrupt cache file may be rewritten before giving up.
const MAX_CACHE_ATTEMPTS: usize = 3;

const CACHE_VERSION: u32 = 1;

/// On-disk cache for the Discogs personal access token.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TokenCache {
    pub version: u32,
    pub token: String,
}

/// Get a usable access token, preferring the on-disk cache.
///
/// If no cache file exists, the operator is prompted for a token, which is
/// then persisted. A corrupt cache file is reported, the operator is
/// re-prompted and the file rewritten. The rewrite is attempted a bounded
/// number of times before this errors out.
pub fn obtain(path: &Path, input: &mut dyn BufRead) -> Result<String> {
    for _ in 0..MAX_CACHE_ATTEMPTS {
        if !path.exists() || !path.is_file() {
            info!("No token cache found at {path:?}");
            let token = prompt_token(input)?;
            write_cache(path, &token)?;
            return Ok(token);
        }

        match read_cache(path) {
            Ok(token) => return Ok(token),
            Err(err) => {
                eprintln!("[ERROR] {err:#}\nSomething is wrong with the token cache, try again...");
                let token = prompt_token(input)?;
                write_cache(path, &token)?;
                // Loop around and load the rewritten file.
            }
        }
    }

    bail!("Couldn't get a usable token cache after {MAX_CACHE_ATTEMPTS} attempts")
}

/// Read the operator's token from `input` until a well-formed one shows up.
fn prompt_token(input: &mut dyn BufRead) -> Result<String> {
    loop {
        print!("Please enter your Discogs personal access token: ");
        std::io::stdout()
            .flush()
            .wrap_err("Failed to flush stdout")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .wrap_err("Failed to read token from input")?;
        if read == 0 {
            bail!("Reached end of input while waiting for a token");
        }

        let entry = line.trim();
        if is_well_formed(entry) {
            return Ok(entry.to_string());
        }

        println!(
            "[INVALID ENTRY] The token must be a string of {TOKEN_LEN} alphabetical characters. Please try again.\n"
        );
    }
}

fn read_cache(path: &Path) -> Result<String> {
    let file =
        File::open(path).wrap_err_with(|| format!("Error opening token cache at {path:?}"))?;
    let cache: TokenCache = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Error deserializing token cache at {path:?}"))?;

    if !is_well_formed(&cache.token) {
        bail!("Token cache at {path:?} contains a malformed token");
    }

    Ok(cache.token)
}

fn write_cache(path: &Path, token: &str) -> Result<()> {
    let file =
        File::create(path).wrap_err_with(|| format!("Error creating token cache at {path:?}"))?;

    // The token is a secret, keep it readable by the owner only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .wrap_err_with(|| format!("Error restricting permissions on {path:?}"))?;
    }

    let cache = TokenCache {
        version: CACHE_VERSION,
        token: token.to_string(),
    };
    serde_yaml::to_writer(file, &cache)
        .wrap_err_with(|| format!("Error serializing token cache to {path:?}"))?;

    Ok(())
}

fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LEN && token.chars().all(|char| char.is_ascii_alphabetic())
}
