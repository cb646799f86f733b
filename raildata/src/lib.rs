//! Client for NJ Transit's RailData API.
//!
//! [`Client`] wraps every RailData method behind a token-managed request
//! pipeline: a rejected token is refreshed once from the configured
//! credentials and the request is retried once. Responses are normalized into
//! the [`domain`] model, with station and line identifiers resolved against
//! the [`catalog`].

pub mod api;
pub mod catalog;
pub mod client;
pub mod config;
pub mod context;
pub mod convert;
pub mod domain;
pub mod error;
pub mod reference;
pub mod token;
pub mod token_file;

pub use client::{Client, RateLimitedMethods};
pub use config::ClientConfig;
pub use context::RequestContext;
pub use error::{RailDataError, Result};
pub use token::{Credentials, TokenUpdate};
pub use token_file::TokenFile;
