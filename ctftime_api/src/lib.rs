//! Page fetcher for public CTFtime team profiles.

mod client;
mod errors;
pub mod user_agent;
pub use self::client::Client;
pub use self::errors::Error;
