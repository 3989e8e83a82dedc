use std::time::Duration;

use serde::Deserialize;

use crate::internal_prelude::*;

const API_BASE_URL: &str = "https://api.discogs.com";
const USER_AGENT: &str = concat!("discogs_tag/", env!("CARGO_PKG_VERSION"));

/// The subset of a Discogs release record that's needed for tagging.
#[derive(Clone, Debug, Deserialize)]
pub struct Release {
    pub title: String,
    pub year: u32,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub tracklist: Vec<Track>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Track {
    pub title: String,
}

/// Blocking client for the Discogs REST API, authenticated via a personal
/// access token.
pub struct Client {
    agent: ureq::Agent,
    token: String,
}

impl Client {
    pub fn new(token: &str) -> Client {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build();

        Client {
            agent,
            token: token.to_string(),
        }
    }

    /// Fetch a single release record.
    ///
    /// There's no retry and no fallback. A failed lookup is fatal for the
    /// whole run, as nothing can be tagged without the metadata.
    pub fn release(&self, id: &str) -> Result<Release> {
        let url = format!("{API_BASE_URL}/releases/{id}");
        info!("Fetching release {id}");

        let release: Release = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Discogs token={}", self.token))
            .call()
            .wrap_err_with(|| format!("Release lookup failed for id {id}"))?
            .into_json()
            .wrap_err_with(|| format!("Failed to deserialize release record for id {id}"))?;

        debug!("{release:?}");
        Ok(release)
    }
}

/// Remove the wrapping chars from a Discogs release id.
///
/// Ids are sometimes presented as `r1234` or `[r1234]`.
pub fn sanitize_id(raw: &str) -> String {
    raw.chars()
        .filter(|char| !matches!(char, 'r' | '[' | ']'))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ids_are_sanitized() {
        assert_eq!(sanitize_id("1234"), "1234");
        assert_eq!(sanitize_id("r1234"), "1234");
        assert_eq!(sanitize_id("[r1234]"), "1234");
    }

    /// A trimmed-down response from `/releases/{id}`.
    #[test]
    fn release_record_deserializes() {
        let json = r#"{
            "id": 2610,
            "title": "Homework",
            "year": 1997,
            "genres": ["Electronic"],
            "styles": ["House", "Techno"],
            "artists": [{"name": "Daft Punk", "id": 1289}],
            "tracklist": [
                {"position": "A1", "title": "Daftendirekt", "duration": "2:44"},
                {"position": "A2", "title": "WDPK 83.7 FM", "duration": "0:28"}
            ]
        }"#;

        let release: Release = serde_json::from_str(json).unwrap();

        assert_eq!(release.title, "Homework");
        assert_eq!(release.year, 1997);
        assert_eq!(release.genres, vec!["Electronic".to_string()]);
        assert_eq!(release.artists[0].name, "Daft Punk");
        assert_eq!(release.tracklist[1].title, "WDPK 83.7 FM");
    }
}
