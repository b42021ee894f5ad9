pub mod config;
pub mod database;
pub mod logging;
pub mod lookup;
pub mod models;

pub use models::{BookmarkStore, DictionaryView, LookupResult, QuizSession, QuizState};
