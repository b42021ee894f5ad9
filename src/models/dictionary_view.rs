//! Search state for the dictionary screen.
//!
//! Only one query is live at a time. Editing the query drops whatever was
//! shown for the previous one, and every search carries a generation number so
//! a slow response for an old query cannot overwrite a newer one.

use super::{BookmarkStore, LookupResult};
use crate::lookup::LookupError;
use tracing::{debug, warn};

pub const NOT_FOUND_MESSAGE: &str = "Word not found.";
pub const BOOKMARK_NOOP_MESSAGE: &str = "Word is already bookmarked or empty.";
pub const NO_PRONUNCIATION_MESSAGE: &str = "No pronunciation available.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub word: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SearchState {
    Idle,
    Searching,
    Result(LookupResult),
    NotFound,
}

pub struct DictionaryView {
    query: String,
    state: SearchState,
    message: Option<String>,
    generation: u64,
}

impl Default for DictionaryView {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryView {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            state: SearchState::Idle,
            message: None,
            generation: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Error or status line shown under the search box
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn result(&self) -> Option<&LookupResult> {
        match &self.state {
            SearchState::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn can_bookmark(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn has_pronunciation(&self) -> bool {
        self.result().and_then(LookupResult::playable_audio).is_some()
    }

    /// Replaces the query text. Any edit returns the view to `Idle`.
    pub fn set_query(&mut self, text: &str) {
        if text == self.query {
            return;
        }
        self.query = text.to_string();
        self.state = SearchState::Idle;
        self.message = None;
    }

    /// Starts a search for the current query. Blank queries are ignored.
    pub fn submit_search(&mut self) -> Option<SearchRequest> {
        if self.query.trim().is_empty() {
            return None;
        }

        self.generation += 1;
        self.state = SearchState::Searching;
        self.message = None;
        debug!(word = %self.query, generation = self.generation, "search submitted");
        Some(SearchRequest {
            generation: self.generation,
            word: self.query.clone(),
        })
    }

    /// Applies a finished lookup. Returns false when it was superseded.
    pub fn resolve_search(
        &mut self,
        generation: u64,
        outcome: Result<LookupResult, LookupError>,
    ) -> bool {
        if generation != self.generation || self.state != SearchState::Searching {
            debug!(generation, latest = self.generation, "discarding stale search result");
            return false;
        }

        match outcome {
            Ok(result) if result.has_meanings() => {
                self.state = SearchState::Result(result);
            }
            Ok(_) => {
                debug!(word = %self.query, "lookup returned no meanings");
                self.not_found();
            }
            Err(e) => {
                debug!(word = %self.query, error = %e, "lookup failed");
                self.not_found();
            }
        }
        true
    }

    fn not_found(&mut self) {
        self.state = SearchState::NotFound;
        self.message = Some(NOT_FOUND_MESSAGE.to_string());
    }

    /// Adds the current query to the bookmarks
    pub fn bookmark(&mut self, store: &mut BookmarkStore) {
        if !self.can_bookmark() {
            self.message = Some(BOOKMARK_NOOP_MESSAGE.to_string());
            return;
        }

        match store.add(&self.query) {
            Ok(()) => self.message = None,
            Err(e) if e.is_noop() => self.message = Some(BOOKMARK_NOOP_MESSAGE.to_string()),
            Err(e) => {
                warn!(word = %self.query, error = %e, "bookmark not saved");
                self.message = Some(format!("Could not save bookmark: {e}"));
            }
        }
    }

    /// Audio locator to hand to the platform player, if the result has one
    pub fn pronunciation(&mut self) -> Option<String> {
        let audio = self
            .result()
            .and_then(LookupResult::playable_audio)
            .map(str::to_string);
        if audio.is_none() {
            self.message = Some(NO_PRONUNCIATION_MESSAGE.to_string());
        }
        audio
    }
}
