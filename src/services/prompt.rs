use crate::models::PreferenceRequest;

/// Number of songs the model is asked for
pub const RECOMMENDATION_COUNT: usize = 8;

/// Renders user preferences into the instruction sent to the LLM
///
/// Liked and disliked artists are embedded as JSON arrays; genres and mood
/// pass through as free text. Nothing is validated here: empty fields render
/// as empty strings or `[]`.
pub fn build_prompt(preferences: &PreferenceRequest) -> String {
    let liked = json_list(&preferences.liked_artists);
    let disliked = json_list(&preferences.disliked_artists);

    format!(
        r#"
You are a music recommendation assistant.

User likes: {liked}
User dislikes: {disliked}

Preferred genres: {genres}
Mood: {mood}

Return {count} songs by different artists NOT previously liked or disliked.
Return ONLY valid JSON in the format:
[
  {{ "artist": "Artist name", "song": "Song title" }},
  ...
]
"#,
        genres = preferences.genres,
        mood = preferences.mood,
        count = RECOMMENDATION_COUNT,
    )
}

fn json_list(items: &[String]) -> String {
    // Serializing a slice of strings cannot fail
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}
