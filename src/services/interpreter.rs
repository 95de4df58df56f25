use serde::Deserialize;

use crate::models::Recommendation;

const CODE_FENCE: &str = "```";

/// Songs returned when the model output cannot be parsed
const FALLBACK_TRACKS: [(&str, &str); 8] = [
    ("The Weeknd", "Blinding Lights"),
    ("Arctic Monkeys", "Do I Wanna Know?"),
    ("Frank Ocean", "Nikes"),
    ("Dua Lipa", "Levitating"),
    ("Tame Impala", "The Less I Know the Better"),
    ("Kendrick Lamar", "HUMBLE."),
    ("Billie Eilish", "Happier Than Ever"),
    ("Doja Cat", "Say So"),
];

/// Turns raw model text into recommendations
///
/// Implementations never fail: unusable output degrades to a fixed list.
pub trait ResponseInterpreter: Send + Sync {
    fn interpret(&self, raw: &str) -> Vec<Recommendation>;
}

/// Extracts the outermost `[...]` span from free-form model text
///
/// Tolerates markdown fences and prose around the array. A leading fence
/// causes every backtick and every literal `json` in the text to be removed,
/// not just the fence markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketSliceInterpreter;

#[derive(Debug, Deserialize)]
struct SuggestedSong {
    artist: String,
    song: String,
}

impl ResponseInterpreter for BracketSliceInterpreter {
    fn interpret(&self, raw: &str) -> Vec<Recommendation> {
        match parse_recommendations(raw) {
            Ok(recommendations) => {
                tracing::debug!(
                    count = recommendations.len(),
                    "Parsed recommendations from model output"
                );
                recommendations
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    output_len = raw.len(),
                    "Model output was not a song list, using fallback recommendations"
                );
                fallback_recommendations()
            }
        }
    }
}

/// The fixed list served when model output is unusable
pub fn fallback_recommendations() -> Vec<Recommendation> {
    FALLBACK_TRACKS
        .iter()
        .map(|(artist, song)| Recommendation::new(*artist, *song))
        .collect()
}

fn parse_recommendations(raw: &str) -> Result<Vec<Recommendation>, serde_json::Error> {
    let cleaned = strip_code_fence(raw);
    let candidate = slice_json_array(&cleaned);
    let songs: Vec<SuggestedSong> = serde_json::from_str(candidate)?;

    Ok(songs
        .into_iter()
        .map(|s| Recommendation::new(s.artist, s.song))
        .collect())
}

fn strip_code_fence(raw: &str) -> String {
    let text = raw.trim();
    if text.starts_with(CODE_FENCE) {
        text.replace('`', "").replace("json", "").trim().to_string()
    } else {
        text.to_string()
    }
}

/// Slices from the first `[` to the last `]` inclusive
///
/// Text without both brackets is returned unchanged. When the last `]` comes
/// before the first `[` the result is empty.
fn slice_json_array(text: &str) -> &str {
    match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start <= end => &text[start..=end],
        (Some(_), Some(_)) => "",
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpret(raw: &str) -> Vec<Recommendation> {
        BracketSliceInterpreter.interpret(raw)
    }

    fn pairs(recs: &[Recommendation]) -> Vec<(&str, &str)> {
        recs.iter()
            .map(|r| (r.artist.as_str(), r.song.as_str()))
            .collect()
    }

    #[test]
    fn test_plain_array() {
        let recs = interpret(r#"[{"artist": "Nujabes", "song": "Feather"}]"#);
        assert_eq!(pairs(&recs), vec![("Nujabes", "Feather")]);
        assert!(!recs[0].is_enriched());
    }

    #[test]
    fn test_fenced_array() {
        let raw = "```json\n[\n  {\"artist\": \"J Dilla\", \"song\": \"Time: The Donut of the Heart\"},\n  {\"artist\": \"Tomppabeats\", \"song\": \"Monday Loop\"}\n]\n```";
        let recs = interpret(raw);
        assert_eq!(
            pairs(&recs),
            vec![
                ("J Dilla", "Time: The Donut of the Heart"),
                ("Tomppabeats", "Monday Loop"),
            ]
        );
    }

    #[test]
    fn test_prose_around_array() {
        let raw = "Sure! Here are some picks:\n[{\"artist\": \"Khruangbin\", \"song\": \"Maria También\"}]\nEnjoy the music [really].";
        // The last `]` belongs to the trailing prose, so the span is not valid JSON
        assert_eq!(interpret(raw), fallback_recommendations());

        let raw = "Sure! Here are some picks:\n[{\"artist\": \"Khruangbin\", \"song\": \"Maria También\"}]\nEnjoy!";
        assert_eq!(pairs(&interpret(raw)), vec![("Khruangbin", "Maria También")]);
    }

    #[test]
    fn test_fenced_array_with_prose_after_fence() {
        let raw = "```json\n[{\"artist\": \"Mac DeMarco\", \"song\": \"Chamber of Reflection\"}]\n```\nLet me know if you want more.";
        assert_eq!(
            pairs(&interpret(raw)),
            vec![("Mac DeMarco", "Chamber of Reflection")]
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let raw = r#"[{"artist": "Bonobo", "song": "Kerala", "year": 2017}]"#;
        assert_eq!(pairs(&interpret(raw)), vec![("Bonobo", "Kerala")]);
    }

    #[test]
    fn test_empty_array_is_kept() {
        assert!(interpret("[]").is_empty());
    }

    #[test]
    fn test_fence_stripping_removes_json_everywhere() {
        // Blunt stripping also mangles "json" inside values
        let raw = "```json\n[{\"artist\": \"The jsons\", \"song\": \"Parse Me\"}]\n```";
        assert_eq!(pairs(&interpret(raw)), vec![("The s", "Parse Me")]);
    }

    #[test]
    fn test_non_json_falls_back() {
        let recs = interpret("no songs today");
        assert_eq!(recs.len(), 8);
        assert_eq!(recs, fallback_recommendations());
    }

    #[test]
    fn test_truncated_json_falls_back() {
        let recs = interpret(r#"[{"artist": "Dua Lipa", "song": "Levit"#);
        assert_eq!(recs, fallback_recommendations());
    }

    #[test]
    fn test_wrong_shape_falls_back() {
        assert_eq!(interpret(r#"[{"artist": "Dua Lipa"}]"#), fallback_recommendations());
        assert_eq!(interpret(r#"["Levitating"]"#), fallback_recommendations());
        assert_eq!(
            interpret(r#"{"artist": "Dua Lipa", "song": "Levitating"}"#),
            fallback_recommendations()
        );
    }

    #[test]
    fn test_reversed_brackets_fall_back() {
        assert_eq!(interpret("] nothing here ["), fallback_recommendations());
    }

    #[test]
    fn test_fallback_contents() {
        let recs = fallback_recommendations();
        assert_eq!(
            pairs(&recs),
            vec![
                ("The Weeknd", "Blinding Lights"),
                ("Arctic Monkeys", "Do I Wanna Know?"),
                ("Frank Ocean", "Nikes"),
                ("Dua Lipa", "Levitating"),
                ("Tame Impala", "The Less I Know the Better"),
                ("Kendrick Lamar", "HUMBLE."),
                ("Billie Eilish", "Happier Than Ever"),
                ("Doja Cat", "Say So"),
            ]
        );
        assert!(recs.iter().all(|r| !r.is_enriched()));
    }
}
