#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod fetch;
pub mod http;

pub use crate::config::FetchConfig;
pub use crate::error::{FetchError, Result};
pub use crate::fetch::{AssetSource, FetchSummary, fetch_assets};
pub use crate::http::HttpAssetSource;
