use chrono::{DateTime, Utc};
use serde::Deserialize;

pub mod preferences;
pub mod recommendation;

pub use preferences::{PreferenceRequest, RecommendationRequest};
pub use recommendation::{Recommendation, TrackMatch};

/// Bearer credential issued by the catalog service
///
/// Lives for a single request; every request authenticates again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl CatalogToken {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

// ============================================================================
// Spotify Web API Types
// ============================================================================

/// Response from POST /api/token (client credentials grant)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
}

fn default_expires_in() -> i64 {
    3600
}

/// Response from GET /search?type=track
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSearchResponse {
    #[serde(default)]
    pub tracks: ApiTrackPage,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiTrackPage {
    /// Unavailable tracks come back as `null` entries and are dropped
    #[serde(default, deserialize_with = "skip_null_items")]
    pub items: Vec<ApiTrack>,
}

fn skip_null_items<'de, D>(deserializer: D) -> Result<Vec<ApiTrack>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let items: Option<Vec<Option<ApiTrack>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ApiArtist>,
    #[serde(default)]
    pub album: ApiAlbum,
    #[serde(default)]
    pub external_urls: ApiExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiArtist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiAlbum {
    /// Album art, largest first
    #[serde(default)]
    pub images: Vec<ApiImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

impl ApiTrack {
    /// Whether any credited artist equals `artist`, ignoring case
    pub fn has_artist(&self, artist: &str) -> bool {
        let wanted = artist.to_lowercase();
        self.artists.iter().any(|a| a.name.to_lowercase() == wanted)
    }
}

impl From<&ApiTrack> for TrackMatch {
    /// Cover art is the second image size (index 1); a track with fewer
    /// images gets no cover
    fn from(track: &ApiTrack) -> Self {
        TrackMatch {
            stream_url: track.external_urls.spotify.clone(),
            cover_image_url: track.album.images.get(1).map(|image| image.url.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn image(url: &str) -> ApiImage {
        ApiImage {
            url: url.to_string(),
            width: None,
            height: None,
        }
    }

    #[test]
    fn test_has_artist_case_insensitive() {
        let track = ApiTrack {
            artists: vec![
                ApiArtist { name: "Tame Impala".into() },
                ApiArtist { name: "Kevin Parker".into() },
            ],
            ..Default::default()
        };

        assert!(track.has_artist("tame impala"));
        assert!(track.has_artist("KEVIN PARKER"));
        assert!(!track.has_artist("Tame"));
    }

    #[test]
    fn test_track_match_uses_second_image() {
        let track = ApiTrack {
            album: ApiAlbum {
                images: vec![image("640"), image("300"), image("64")],
            },
            external_urls: ApiExternalUrls {
                spotify: Some("https://open.spotify.com/track/abc".into()),
            },
            ..Default::default()
        };

        let matched = TrackMatch::from(&track);
        assert_eq!(
            matched.stream_url.as_deref(),
            Some("https://open.spotify.com/track/abc")
        );
        assert_eq!(matched.cover_image_url.as_deref(), Some("300"));
    }

    #[test]
    fn test_track_match_single_image_has_no_cover() {
        let track = ApiTrack {
            album: ApiAlbum {
                images: vec![image("640")],
            },
            external_urls: ApiExternalUrls {
                spotify: Some("https://open.spotify.com/track/abc".into()),
            },
            ..Default::default()
        };

        let matched = TrackMatch::from(&track);
        assert!(matched.stream_url.is_some());
        assert!(matched.cover_image_url.is_none());
    }

    #[test]
    fn test_search_response_tolerates_missing_sections() {
        let parsed: ApiSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.tracks.items.is_empty());
    }

    #[test]
    fn test_search_response_skips_null_items() {
        let parsed: ApiSearchResponse = serde_json::from_value(serde_json::json!({
            "tracks": {
                "items": [
                    null,
                    { "name": "Feather", "artists": [{ "name": "Nujabes" }] }
                ]
            }
        }))
        .unwrap();

        assert_eq!(parsed.tracks.items.len(), 1);
        assert_eq!(parsed.tracks.items[0].name, "Feather");

        let parsed: ApiSearchResponse =
            serde_json::from_str(r#"{"tracks": {"items": null}}"#).unwrap();
        assert!(parsed.tracks.items.is_empty());
    }

    #[test]
    fn test_token_expiry() {
        let live = CatalogToken {
            access_token: "t".into(),
            expires_at: Utc::now() + Duration::seconds(3600),
        };
        let stale = CatalogToken {
            access_token: "t".into(),
            expires_at: Utc::now() - Duration::seconds(1),
        };

        assert!(!live.is_expired());
        assert!(stale.is_expired());
    }
}
