//! # Reddit API Client
//!
//! OAuth token acquisition and subreddit comment listings.

use crate::config::RedditSettings;
use crate::defaults::LISTING_PAGE_SIZE;
use crate::models::Comment;
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while talking to Reddit
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Reddit credentials missing: set REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET")]
    MissingCredentials,

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Not authorized to read r/{0}")]
    Unauthorized(String),

    #[error("Subreddit '{0}' does not exist")]
    UnknownTopic(String),

    #[error("Reddit returned HTTP {status}")]
    Status { status: u16 },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Anything that can list the newest comments of a topic
pub trait CommentSource {
    /// Fetch up to `limit` comments in listing order
    fn fetch_comments(&self, topic: &str, limit: usize) -> Result<Vec<Comment>, FetchError>;
}

/// Produces an authenticated [`CommentSource`]
pub trait Connector {
    fn connect(&self) -> Result<Box<dyn CommentSource>, FetchError>;
}

/// OAuth token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

/// Listing envelope
#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    after: Option<String>,
    #[serde(default)]
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    kind: String,
    data: CommentData,
}

#[derive(Debug, Deserialize)]
struct CommentData {
    id: Option<String>,
    author: Option<String>,
    body: Option<String>,
    created_utc: Option<f64>,
}

/// Builds [`RedditSession`]s from configured credentials
#[derive(Debug, Clone)]
pub struct RedditConnector {
    settings: RedditSettings,
}

impl RedditConnector {
    pub fn new(settings: RedditSettings) -> Self {
        Self { settings }
    }

    /// Request an access token and return a ready session
    pub fn authenticate(&self) -> Result<RedditSession, FetchError> {
        let (client_id, client_secret) = match (
            self.settings.client_id.as_deref(),
            self.settings.client_secret.as_deref(),
        ) {
            (Some(id), Some(secret)) if !id.is_empty() => (id, secret),
            _ => return Err(FetchError::MissingCredentials),
        };

        let client = Client::builder()
            .user_agent(self.settings.user_agent.as_str())
            .timeout(Duration::from_secs(self.settings.timeout_secs))
            .redirect(Policy::none())
            .build()?;

        let mut form = Vec::new();
        match (&self.settings.username, &self.settings.password) {
            (Some(username), Some(password)) => {
                form.push(("grant_type", "password"));
                form.push(("username", username.as_str()));
                form.push(("password", password.as_str()));
            }
            _ => form.push(("grant_type", "client_credentials")),
        }

        let url = format!("{}/api/v1/access_token", self.settings.auth_base);
        debug!(url = %url, grant = form[0].1, "requesting reddit access token");

        let response = client
            .post(&url)
            .basic_auth(client_id, Some(client_secret))
            .form(&form)
            .send()?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::AuthFailed(format!(
                "token endpoint rejected the client credentials (HTTP {})",
                status.as_u16()
            )));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let token: TokenResponse = response
            .json()
            .map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

        match (token.access_token, token.error) {
            (Some(access_token), None) => {
                info!("authenticated with reddit");
                Ok(RedditSession {
                    client,
                    api_base: self.settings.api_base.clone(),
                    access_token,
                })
            }
            (_, Some(error)) => Err(FetchError::AuthFailed(error)),
            (None, None) => Err(FetchError::InvalidResponse(
                "token response has no access_token".to_string(),
            )),
        }
    }
}

impl Connector for RedditConnector {
    fn connect(&self) -> Result<Box<dyn CommentSource>, FetchError> {
        Ok(Box::new(self.authenticate()?))
    }
}

/// Authenticated Reddit session
pub struct RedditSession {
    client: Client,
    api_base: String,
    access_token: String,
}

impl RedditSession {
    fn fetch_page(
        &self,
        topic: &str,
        limit: usize,
        after: Option<&str>,
    ) -> Result<String, FetchError> {
        let url = format!("{}/r/{}/comments.json", self.api_base, topic);
        let limit = limit.to_string();

        let mut query = vec![("limit", limit.as_str()), ("raw_json", "1")];
        if let Some(cursor) = after {
            query.push(("after", cursor));
        }

        debug!(url = %url, limit = %limit, after = ?after, "fetching comment page");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&query)
            .send()?;

        check_status(response.status(), topic)?;
        Ok(response.text()?)
    }
}

impl CommentSource for RedditSession {
    fn fetch_comments(&self, topic: &str, limit: usize) -> Result<Vec<Comment>, FetchError> {
        let topic = topic.trim();
        let comments = fetch_paginated(topic, limit, |page_size, after| {
            self.fetch_page(topic, page_size, after)
        })?;
        info!(topic, count = comments.len(), "fetched comments");
        Ok(comments)
    }
}

/// Page through a comment listing until `limit` comments are collected.
///
/// `fetch_page(page_size, after)` returns one raw listing page. Paging
/// continues while the listing hands back a new cursor, even across pages
/// without comments, and stops early on a short page.
pub fn fetch_paginated<F>(
    topic: &str,
    limit: usize,
    mut fetch_page: F,
) -> Result<Vec<Comment>, FetchError>
where
    F: FnMut(usize, Option<&str>) -> Result<String, FetchError>,
{
    if topic.is_empty()
        || !topic
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '+')
    {
        return Err(FetchError::UnknownTopic(topic.to_string()));
    }

    let mut comments: Vec<Comment> = Vec::new();
    let mut after: Option<String> = None;

    while comments.len() < limit {
        let page_size = (limit - comments.len()).min(LISTING_PAGE_SIZE);
        let body = fetch_page(page_size, after.as_deref())?;
        let (batch, next) = parse_listing(&body, comments.len())?;
        let short_page = !batch.is_empty() && batch.len() < page_size;
        comments.extend(batch);

        match next {
            Some(cursor) if !short_page && after.as_deref() != Some(cursor.as_str()) => {
                after = Some(cursor)
            }
            _ => break,
        }
    }

    comments.truncate(limit);
    Ok(comments)
}

/// Map a listing response status to a fetch error
pub fn check_status(status: StatusCode, topic: &str) -> Result<(), FetchError> {
    if status.is_redirection() || status == StatusCode::NOT_FOUND {
        // Reddit redirects unknown subreddits to its search page
        return Err(FetchError::UnknownTopic(topic.to_string()));
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(FetchError::Unauthorized(topic.to_string()));
    }
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }
    Ok(())
}

/// Parse one comment listing page.
///
/// Returns the comments (indexed from `start_index`) and the cursor of the
/// next page. Non-comment children are skipped.
pub fn parse_listing(
    body: &str,
    start_index: usize,
) -> Result<(Vec<Comment>, Option<String>), FetchError> {
    let listing: Listing =
        serde_json::from_str(body).map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

    let comments = listing
        .data
        .children
        .into_iter()
        .filter(|thing| thing.kind == "t1")
        .filter_map(|thing| {
            let data = thing.data;
            data.body.map(|body| (body, data.id, data.author, data.created_utc))
        })
        .enumerate()
        .map(|(offset, (body, id, author, created_utc))| {
            let mut comment = Comment::new(start_index + offset, body);
            comment.id = id;
            comment.author = author;
            comment.created =
                created_utc.and_then(|ts| DateTime::<Utc>::from_timestamp(ts as i64, 0));
            comment
        })
        .collect();

    Ok((comments, listing.data.after))
}
