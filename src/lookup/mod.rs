pub mod client;
pub mod dispatcher;

pub use client::{DictionaryClient, LookupError, WordLookup};
pub use dispatcher::{LookupDispatcher, LookupOutcome};
