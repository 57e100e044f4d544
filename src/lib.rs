//! # Amara API client for Rust
//!
//! Async client for the [Amara](https://amara.org) subtitling platform's REST
//! API. It authenticates every request, maps resources onto URL templates,
//! walks paginated lists and retries transient failures (network errors,
//! HTTP 429 and 504) with linear backoff.
//!
//! ## Quick start
//!
//! ```no_run
//! use amara::{Client, SubtitleFormat};
//!
//! #[tokio::main]
//! async fn main() -> amara::Result<()> {
//!     let client = Client::new("alice", "0123456789abcdef0123456789abcdef01234567")?;
//!
//!     let video = client.get_video("Yt9t2tn8mFs3").await?;
//!     println!("{}", video.into_json()["title"]);
//!
//!     let srt = client
//!         .get_subtitles("Yt9t2tn8mFs3", "en", SubtitleFormat::Srt, None)
//!         .await?;
//!     println!("{}", srt.as_text().unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Raw resource access
//!
//! Every convenience method goes through [`Client::fetch`], which can also be
//! called directly with a [`Resource`], an optional [`Query`] and an optional
//! page filter:
//!
//! ```no_run
//! use amara::{pagination, Client, Method, Query, Resource, ResourceKind};
//!
//! # async fn example(client: &Client) -> amara::Result<()> {
//! let mut first_ten = pagination::take(10);
//! let tasks = client
//!     .fetch(
//!         Method::Get,
//!         &Resource::new(ResourceKind::Tasks).team("acme"),
//!         Some(&Query::new().param("type", "Review")),
//!         None,
//!         Some(&mut first_ten),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Retries
//!
//! A request that keeps failing transiently ends in
//! [`AmaraError::RetriesExhausted`]. Its outcome is unknown: a write may or
//! may not have been applied.

mod client;
mod credentials;
mod endpoints;
mod errors;
mod logger;
mod models;
pub mod pagination;
mod query;
mod routes;
mod transport;

pub use client::{Client, ClientBuilder, PageFilter};
pub use credentials::{is_valid_api_key, is_valid_api_version, Credentials};
pub use errors::{AmaraError, Result};
pub use logger::{LogLevel, Logger};
pub use models::{
    LanguageUpdate, Message, NewLanguage, NewMember, NewTask, NewVideo, NewVideoUrl, Payload,
    SubtitleFormat, SubtitleUpload, TaskType, TaskUpdate, VideoUpdate,
};
pub use pagination::{Page, PageMeta};
pub use query::Query;
pub use routes::{ContentType, PathParams, Resource, ResourceKind};
pub use transport::{Method, RetryPolicy};
