pub mod bookmark_set;
pub mod bookmark_store;
pub mod dictionary_view;
pub mod lookup_result;
pub mod quiz_session;

pub use bookmark_set::BookmarkSet;
pub use bookmark_store::{BookmarkError, BookmarkStore};
pub use dictionary_view::{DictionaryView, SearchRequest, SearchState};
pub use lookup_result::{Definition, LookupResult, Meaning, Phonetic};
pub use quiz_session::{Challenge, ChallengeRequest, QuizError, QuizSession, QuizState};
