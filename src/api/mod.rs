//! # API Module
//!
//! Reddit comment fetching and the translation service client.

mod reddit;
mod translate;

pub use reddit::{
    check_status, fetch_paginated, parse_listing, CommentSource, Connector, FetchError,
    RedditConnector, RedditSession,
};
pub use translate::{DisabledTranslator, LibreTranslateClient, TranslateError, Translator};
