//! Dictionary entry as returned by the provider. Only the fields the views use are kept.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub origin: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

impl LookupResult {
    pub fn has_meanings(&self) -> bool {
        !self.meanings.is_empty()
    }

    /// Audio of the first phonetic entry that carries one, in provider order.
    /// The provider sends `""` for entries without a recording.
    pub fn playable_audio(&self) -> Option<&str> {
        self.phonetics
            .iter()
            .filter_map(|p| p.audio.as_deref())
            .find(|audio| !audio.trim().is_empty())
    }

    /// The first definition of the first meaning, used as a quiz prompt
    pub fn first_definition(&self) -> Option<&str> {
        self.meanings
            .first()?
            .definitions
            .first()
            .map(|d| d.definition.as_str())
            .filter(|text| !text.trim().is_empty())
    }

    /// Non-empty origin text
    pub fn origin_text(&self) -> Option<&str> {
        self.origin.as_deref().filter(|o| !o.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "word": "hello",
        "phonetics": [
            { "text": "/həˈləʊ/", "audio": "" },
            { "text": "/həˈloʊ/", "audio": "https://example.test/hello-us.mp3" },
            { "audio": "https://example.test/hello-uk.mp3" }
        ],
        "origin": "early 19th century",
        "meanings": [
            {
                "partOfSpeech": "exclamation",
                "definitions": [
                    { "definition": "used as a greeting", "example": "hello there, Katie!", "synonyms": [] },
                    { "definition": "used to attract attention" }
                ]
            },
            {
                "partOfSpeech": "noun",
                "definitions": [{ "definition": "an utterance of 'hello'" }]
            }
        ]
    }"#;

    #[test]
    fn test_parses_provider_shape() {
        let result: LookupResult = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(result.word, "hello");
        assert_eq!(result.meanings.len(), 2);
        assert_eq!(result.meanings[0].part_of_speech, "exclamation");
        assert_eq!(
            result.meanings[0].definitions[0].example.as_deref(),
            Some("hello there, Katie!")
        );
        assert_eq!(result.meanings[0].definitions[1].example, None);
        assert_eq!(result.phonetics[2].text, None);
        assert_eq!(result.origin_text(), Some("early 19th century"));
    }

    #[test]
    fn test_playable_audio_skips_empty_entries() {
        let result: LookupResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(
            result.playable_audio(),
            Some("https://example.test/hello-us.mp3")
        );
    }

    #[test]
    fn test_no_audio_means_unavailable() {
        let result = LookupResult {
            phonetics: vec![
                Phonetic {
                    text: Some("/kæt/".to_string()),
                    audio: None,
                },
                Phonetic {
                    text: None,
                    audio: Some(String::new()),
                },
            ],
            ..LookupResult::default()
        };
        assert_eq!(result.playable_audio(), None);
    }

    #[test]
    fn test_first_definition() {
        let result: LookupResult = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(result.first_definition(), Some("used as a greeting"));

        let empty = LookupResult {
            meanings: vec![Meaning {
                part_of_speech: "noun".to_string(),
                definitions: Vec::new(),
            }],
            ..LookupResult::default()
        };
        assert_eq!(empty.first_definition(), None);
    }

    #[test]
    fn test_missing_arrays_default_to_empty() {
        let result: LookupResult = serde_json::from_str(r#"{ "word": "x" }"#).unwrap();
        assert!(!result.has_meanings());
        assert!(result.phonetics.is_empty());
        assert_eq!(result.origin_text(), None);
    }
}
