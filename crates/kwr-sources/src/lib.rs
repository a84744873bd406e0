//! Platform post fetchers.
//!
//! Two backends behind the `kwr-core` source traits: a Twitter/X fetcher
//! that shells out to an external search tool, and a Reddit fetcher that
//! talks to the public OAuth search API. Both degrade to empty results on
//! failure so a single platform outage never aborts a report run.

mod error;
mod reddit;
mod twitter;

pub use error::SourceError;
pub use reddit::RedditClient;
pub use twitter::TwitterSearchClient;
