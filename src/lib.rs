//! Personal-data discovery: parse a free-text identity, build people-search URLs, and rank
//! same-site profile links scraped from those pages.

pub mod aggregate;
pub mod export;
pub mod extract;
pub mod fetcher;
pub mod identity;
pub mod profile;
pub mod scoring;
pub mod settings;
pub mod sites;
pub mod sweep;

pub use extract::ResultItem;
pub use identity::Identity;
