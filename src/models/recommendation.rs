use serde::Serialize;

/// One recommended song, optionally enriched with catalog metadata
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Recommendation {
    pub artist: String,
    pub song: String,
    #[serde(rename = "spotify_url", skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(rename = "album_image_url", skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl Recommendation {
    pub fn new(artist: impl Into<String>, song: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            song: song.into(),
            stream_url: None,
            cover_image_url: None,
        }
    }

    /// Attaches the fields a catalog lookup found
    pub fn apply_match(&mut self, track: TrackMatch) {
        if let Some(url) = track.stream_url {
            self.stream_url = Some(url);
        }
        if let Some(url) = track.cover_image_url {
            self.cover_image_url = Some(url);
        }
    }

    pub fn is_enriched(&self) -> bool {
        self.stream_url.is_some() || self.cover_image_url.is_some()
    }
}

/// Metadata resolved for a track by the music catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMatch {
    pub stream_url: Option<String>,
    pub cover_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_without_enrichment() {
        let rec = Recommendation::new("Frank Ocean", "Nikes");
        assert_eq!(
            serde_json::to_value(&rec).unwrap(),
            json!({ "artist": "Frank Ocean", "song": "Nikes" })
        );
    }

    #[test]
    fn test_serialize_with_enrichment() {
        let mut rec = Recommendation::new("Dua Lipa", "Levitating");
        rec.apply_match(TrackMatch {
            stream_url: Some("https://open.spotify.com/track/1".into()),
            cover_image_url: Some("https://i.scdn.co/image/300".into()),
        });

        assert!(rec.is_enriched());
        assert_eq!(
            serde_json::to_value(&rec).unwrap(),
            json!({
                "artist": "Dua Lipa",
                "song": "Levitating",
                "spotify_url": "https://open.spotify.com/track/1",
                "album_image_url": "https://i.scdn.co/image/300"
            })
        );
    }

    #[test]
    fn test_apply_partial_match_keeps_missing_fields_absent() {
        let mut rec = Recommendation::new("Doja Cat", "Say So");
        rec.apply_match(TrackMatch {
            stream_url: Some("https://open.spotify.com/track/2".into()),
            cover_image_url: None,
        });

        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["spotify_url"], "https://open.spotify.com/track/2");
        assert!(value.get("album_image_url").is_none());
    }
}
