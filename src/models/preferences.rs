use serde::Deserialize;

/// Music preferences submitted with a recommendation request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceRequest {
    /// Artists the user already likes; excluded from recommendations
    pub liked_artists: Vec<String>,
    /// Artists the user dislikes; excluded from recommendations
    pub disliked_artists: Vec<String>,
    /// Preferred genres as free text
    pub genres: String,
    /// Desired mood as free text
    pub mood: String,
    /// Free-text artist field accepted on the wire; not used by the prompt
    pub artists: String,
}

/// Wire format of the recommendation request body
///
/// Every field is optional and `null` is treated the same as absent.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub artists: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub liked: Option<Vec<String>>,
    #[serde(default)]
    pub disliked: Option<Vec<String>>,
}

impl From<RecommendationRequest> for PreferenceRequest {
    fn from(request: RecommendationRequest) -> Self {
        Self {
            liked_artists: request.liked.unwrap_or_default(),
            disliked_artists: request.disliked.unwrap_or_default(),
            genres: request.genres.unwrap_or_default(),
            mood: request.mood.unwrap_or_default(),
            artists: request.artists.unwrap_or_default(),
        }
    }
}

impl PreferenceRequest {
    /// Decodes a raw request body, defaulting every missing field
    ///
    /// An empty (or whitespace-only) body is treated as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let request: RecommendationRequest = serde_json::from_slice(body)?;
        Ok(request.into())
    }
}
