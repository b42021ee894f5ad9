//! HTTP client for the public dictionary API.
//!
//! One GET per lookup, no retries and no caching. The provider answers with an
//! array of entries; only the first one is used.

use crate::config::Config;
use crate::models::LookupResult;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("word is empty")]
    InvalidWord,

    #[error("word not found")]
    NotFound,

    #[error("HTTP {0}")]
    HttpStatus(StatusCode),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not start lookup: {0}")]
    Spawn(std::io::Error),

    #[error("invalid dictionary base URL {0}")]
    InvalidBaseUrl(String),
}

/// Anything that can turn a word into a dictionary entry
pub trait WordLookup: Send + Sync {
    fn lookup(&self, word: &str) -> Result<LookupResult, LookupError>;
}

pub struct DictionaryClient {
    base_url: Url,
    client: Client,
}

impl DictionaryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|_| LookupError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        Self::new(&config.dictionary_base_url, config.request_timeout())
    }

    /// `<base>/<word>` with the word as a single escaped path segment
    pub fn entry_url(&self, word: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url
    }
}

impl WordLookup for DictionaryClient {
    fn lookup(&self, word: &str) -> Result<LookupResult, LookupError> {
        if word.trim().is_empty() {
            return Err(LookupError::InvalidWord);
        }

        let url = self.entry_url(word);
        debug!(%url, "dictionary lookup");

        let response = self.client.get(url).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }
        if !status.is_success() {
            warn!(word, %status, "dictionary request failed");
            return Err(LookupError::HttpStatus(status));
        }

        let bytes = response.bytes()?;
        parse_entries(&bytes)
    }
}

/// Picks the first entry out of the provider's response array
pub fn parse_entries(body: &[u8]) -> Result<LookupResult, LookupError> {
    let entries: Vec<LookupResult> = serde_json::from_slice(body)?;
    entries.into_iter().next().ok_or(LookupError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> DictionaryClient {
        DictionaryClient::new(
            "https://api.dictionaryapi.dev/api/v2/entries/en",
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[test]
    fn test_entry_url() {
        assert_eq!(
            client().entry_url("hello").as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/hello"
        );
    }

    #[test]
    fn test_entry_url_escapes_word() {
        let url = client().entry_url("ice cream/cone");
        assert_eq!(
            url.as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/ice%20cream%2Fcone"
        );
    }

    #[test]
    fn test_trailing_slash_in_base() {
        let client = DictionaryClient::new("http://localhost:8080/entries/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(
            client.entry_url("cat").as_str(),
            "http://localhost:8080/entries/cat"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = DictionaryClient::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(LookupError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_blank_word_never_requests() {
        // Port 9 is discard; an actual request would fail with Request instead
        let client = DictionaryClient::new("http://127.0.0.1:9/entries", Duration::from_secs(1))
            .unwrap();
        assert!(matches!(client.lookup(""), Err(LookupError::InvalidWord)));
        assert!(matches!(client.lookup("  \t"), Err(LookupError::InvalidWord)));
    }

    #[test]
    fn test_parse_takes_first_entry() {
        let body = br#"[
            { "word": "bank", "meanings": [{ "partOfSpeech": "noun", "definitions": [{ "definition": "land beside a river" }] }] },
            { "word": "bank", "meanings": [{ "partOfSpeech": "verb", "definitions": [{ "definition": "to deposit" }] }] }
        ]"#;
        let result = parse_entries(body).unwrap();
        assert_eq!(result.first_definition(), Some("land beside a river"));
    }

    #[test]
    fn test_parse_empty_array_is_not_found() {
        assert!(matches!(parse_entries(b"[]"), Err(LookupError::NotFound)));
    }

    #[test]
    fn test_parse_error_object_is_decode_failure() {
        let body = br#"{ "title": "No Definitions Found", "message": "Sorry pal" }"#;
        assert!(matches!(parse_entries(body), Err(LookupError::Decode(_))));
    }
}
