//! Library layer for ctfstats: CTFtime team page scraping and JSON rendering.
//!
//! Wraps the `ctftime_api` page fetcher with an on-disk cache and retries,
//! and turns team pages into a [`Profile`] of seasons and CTF results.

pub mod cache;
pub mod client;
pub mod error;
pub mod extract;
pub mod model;
pub mod parse;
pub mod scrape;
pub mod serialize;
pub mod validation;

pub use ctftime_api;

pub use cache::DiskCache;
pub use client::{CachedClient, RetryConfig};
pub use error::CtfStatsError;
pub use extract::{extract_ctf, extract_season, SeasonSummary};
pub use model::{Ctf, Profile, Season};
pub use scrape::{scrape_profile, PageLayout, ScrapeError, SeasonBlock};
pub use serialize::to_json;
