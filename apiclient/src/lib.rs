// SPDX-FileCopyrightText: 2026 Entrig <hello@entrig.dev>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! HTTP client for the Entrig registration service

use std::time::Duration;

use reqwest::{Client, ClientBuilder, Url};
use thiserror::Error;
use url::ParseError;

pub mod delivery_api;
pub mod registration_api;

/// Production endpoint of the registration service.
pub const DEFAULT_BASE_URL: &str = "https://wlbsugnskuojugsubnjj.supabase.co/functions/v1";

/// All requests are given up after this long; there are no retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ApiClientInitError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error("Failed to parse URL {0}")]
    UrlParsingError(String),
}

pub type HttpClient = reqwest::Client;

// ApiClient is a wrapper around a reqwest client.
// It exposes a single function for each API endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: HttpClient,
    url: Url,
    api_key: String,
}

impl ApiClient {
    /// Creates a new HTTP client.
    pub fn new_http_client() -> reqwest::Result<Client> {
        ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .pool_idle_timeout(Duration::from_secs(4))
            .user_agent("EntrigClient/0.1")
            .build()
    }

    pub fn with_default_http_client(
        url: impl AsRef<str>,
        api_key: impl Into<String>,
    ) -> Result<Self, ApiClientInitError> {
        let client = Self::new_http_client();
        Self::initialize(client?, url, api_key)
    }

    /// Creates a new API client that connects to the given base URL.
    ///
    /// The URL may carry a path prefix (the production endpoint does);
    /// endpoint paths are appended to it. A bare hostname is accepted and
    /// treated as `https`.
    pub fn initialize(
        client: HttpClient,
        url: impl AsRef<str>,
        api_key: impl Into<String>,
    ) -> Result<Self, ApiClientInitError> {
        let url = url.as_ref();
        let url = match Url::parse(url) {
            Ok(url) => url,
            Err(ParseError::RelativeUrlWithoutBase) => {
                let url = format!("https://{url}");
                Url::parse(&url).map_err(|_| ApiClientInitError::UrlParsingError(url))?
            }
            Err(_) => return Err(ApiClientInitError::UrlParsingError(url.to_owned())),
        };
        Ok(Self {
            client,
            url,
            api_key: api_key.into(),
        })
    }

    /// Builds a URL for a given endpoint.
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.url.as_str().trim_end_matches('/'), endpoint)
    }
}
