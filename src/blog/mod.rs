//! Blog feed for the portfolio
//!
//! Retrieves externally authored articles, normalizes them into [`BlogPost`]s
//! and tracks the currently displayed set.
//!
//! # Architecture
//!
//! - `client` - Upstream article source trait and the dev.to client
//! - `article` - Parse-and-normalize boundary for upstream records
//! - `catalog` - Popular tags and offline sample posts
//! - `date` - Display formatting for publish dates
//! - `filter` - Client-side term/tag filter and display cap
//! - `debounce` - Cancellable timer for search input
//! - `feed` - Sequenced feed controller
//!
//! # Usage
//!
//! ```rust,no_run
//! use folio::blog::{DevToClient, FeedController};
//!
//! # async fn example() {
//! let feed = FeedController::new(DevToClient::default());
//! let snapshot = feed.load().await;
//! for post in snapshot.visible_posts() {
//!     println!("{}", post.title);
//! }
//! # }
//! ```
//!
//! [`BlogPost`]: crate::types::BlogPost
mod article;
mod catalog;
mod client;
mod date;
mod debounce;
mod feed;
mod filter;

pub use article::{ArticleParseError, DEFAULT_READ_TIME, normalize, normalize_listing};
pub use catalog::{PLACEHOLDER_IMAGE, popular_tags, sample_posts};
pub use client::{
    ArticleSource, DEFAULT_API_BASE, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, DevToClient, FeedError, Page,
};
pub use date::display_date;
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use feed::{
    FeedController, FeedPhase, FeedSnapshot, Retrieval, RetrievalError, Retrieved, Ticket,
    fetch_by_tag, search,
};
pub use filter::{DISPLAY_LIMIT, filter_posts, visible_posts};
