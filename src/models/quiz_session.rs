//! Vocabulary quiz over a snapshot of the bookmarked words.
//!
//! Each turn a word is drawn uniformly at random from the words not yet seen
//! in this session and its first definition is shown as the prompt. The
//! session never performs I/O itself: transitions that need a definition
//! return a [`ChallengeRequest`], and the caller feeds the lookup outcome back
//! through [`QuizSession::resolve_challenge`].

use super::LookupResult;
use crate::lookup::LookupError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use thiserror::Error;
use tracing::{debug, warn};

pub const NO_BOOKMARKS_MESSAGE: &str =
    "No bookmarked words available. Please bookmark words to start the quiz.";
pub const CORRECT_FEEDBACK: &str = "Correct!";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("there is no challenge to answer")]
    NoActiveChallenge,

    #[error("there are no bookmarked words")]
    NoBookmarks,

    #[error("the last definition fetch did not fail")]
    NotFailed,
}

/// A definition the session is waiting for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeRequest {
    pub generation: u64,
    pub word: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    pub word: String,
    pub definition: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizState {
    NoBookmarks,
    AwaitingChallenge { word: String },
    Challenge(Challenge),
    FetchFailed { word: String, message: String },
    Finished,
}

impl QuizState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, QuizState::NoBookmarks | QuizState::Finished)
    }
}

pub struct QuizSession {
    bookmarks: Vec<String>,
    seen: Vec<String>,
    score: u32,
    feedback: Option<String>,
    state: QuizState,
    generation: u64,
    rng: StdRng,
    /// Text box contents, cleared after every submission
    pub answer: String,
}

impl QuizSession {
    /// Starts a session over `bookmarks` as they are right now
    pub fn start(bookmarks: Vec<String>) -> (Self, Option<ChallengeRequest>) {
        Self::start_with_rng(bookmarks, StdRng::from_entropy())
    }

    /// Deterministic word order, for tests
    pub fn start_seeded(bookmarks: Vec<String>, seed: u64) -> (Self, Option<ChallengeRequest>) {
        Self::start_with_rng(bookmarks, StdRng::seed_from_u64(seed))
    }

    fn start_with_rng(bookmarks: Vec<String>, rng: StdRng) -> (Self, Option<ChallengeRequest>) {
        let mut session = Self {
            bookmarks,
            seen: Vec::new(),
            score: 0,
            feedback: None,
            state: QuizState::NoBookmarks,
            generation: 0,
            rng,
            answer: String::new(),
        };

        if session.bookmarks.is_empty() {
            debug!("quiz started without bookmarks");
            return (session, None);
        }
        let request = session.pick_next();
        (session, request)
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn seen(&self) -> &[String] {
        &self.seen
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Status line for the states that have one
    pub fn message(&self) -> Option<&str> {
        match &self.state {
            QuizState::NoBookmarks => Some(NO_BOOKMARKS_MESSAGE),
            QuizState::FetchFailed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn bookmark_count(&self) -> usize {
        self.bookmarks.len()
    }

    pub fn current_challenge(&self) -> Option<&Challenge> {
        match &self.state {
            QuizState::Challenge(challenge) => Some(challenge),
            _ => None,
        }
    }

    fn pick_next(&mut self) -> Option<ChallengeRequest> {
        // Random over the unseen words only, each equally likely
        let seen = &self.seen;
        let remaining: Vec<&String> = self
            .bookmarks
            .iter()
            .filter(|word| !seen.contains(word))
            .collect();
        let next = remaining.choose(&mut self.rng).map(|w| (*w).clone());

        match next {
            Some(word) => {
                self.generation += 1;
                self.state = QuizState::AwaitingChallenge { word: word.clone() };
                Some(ChallengeRequest {
                    generation: self.generation,
                    word,
                })
            }
            None => {
                debug!(score = self.score, "quiz finished");
                self.state = QuizState::Finished;
                None
            }
        }
    }

    /// Applies a definition lookup. Returns false when the outcome belongs to
    /// an older request and was ignored.
    pub fn resolve_challenge(
        &mut self,
        generation: u64,
        outcome: Result<LookupResult, LookupError>,
    ) -> bool {
        let word = match &self.state {
            QuizState::AwaitingChallenge { word } if generation == self.generation => word.clone(),
            _ => {
                debug!(generation, "discarding stale quiz definition");
                return false;
            }
        };

        let definition = match &outcome {
            Ok(result) => result.first_definition().map(str::to_string),
            Err(_) => None,
        };

        self.state = match definition {
            Some(definition) => QuizState::Challenge(Challenge { word, definition }),
            None => {
                if let Err(e) = &outcome {
                    warn!(word = %word, error = %e, "quiz definition fetch failed");
                } else {
                    warn!(word = %word, "quiz definition missing from lookup result");
                }
                let message = format!("Could not load a definition for \"{word}\".");
                QuizState::FetchFailed { word, message }
            }
        };
        true
    }

    /// Scores `self.answer` against the current challenge and moves on
    pub fn submit_answer(&mut self) -> Result<Option<ChallengeRequest>, QuizError> {
        let word = match &self.state {
            QuizState::Challenge(challenge) => challenge.word.clone(),
            _ => return Err(QuizError::NoActiveChallenge),
        };

        if self.answer.to_lowercase() == word.to_lowercase() {
            self.score += 1;
            self.feedback = Some(CORRECT_FEEDBACK.to_string());
        } else {
            self.feedback = Some(format!("Incorrect! The correct word was \"{word}\"."));
        }

        self.answer.clear();
        self.seen.push(word);
        Ok(self.pick_next())
    }

    /// Requests the failed word's definition again
    pub fn retry(&mut self) -> Result<ChallengeRequest, QuizError> {
        let word = match &self.state {
            QuizState::FetchFailed { word, .. } => word.clone(),
            _ => return Err(QuizError::NotFailed),
        };

        self.generation += 1;
        self.state = QuizState::AwaitingChallenge { word: word.clone() };
        Ok(ChallengeRequest {
            generation: self.generation,
            word,
        })
    }

    /// Gives up on the failed word without scoring it
    pub fn skip(&mut self) -> Result<Option<ChallengeRequest>, QuizError> {
        let word = match &self.state {
            QuizState::FetchFailed { word, .. } => word.clone(),
            _ => return Err(QuizError::NotFailed),
        };

        self.seen.push(word);
        Ok(self.pick_next())
    }

    pub fn restart(&mut self) -> Result<Option<ChallengeRequest>, QuizError> {
        if self.bookmarks.is_empty() {
            return Err(QuizError::NoBookmarks);
        }

        self.seen.clear();
        self.score = 0;
        self.feedback = None;
        self.answer.clear();
        Ok(self.pick_next())
    }
}
