// src/core/net.rs
// Blocking HTTP GET with fixed request headers.

use std::collections::BTreeMap;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{ConfigError, Error, FetchError};

/// A fetched page. Any status is returned; callers decide what counts as success.
#[derive(Clone, Debug)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

/// Where company pages come from. `HttpSource` in production, stubs in tests.
pub trait PageSource {
    fn get(&mut self, url: &str) -> Result<Page, FetchError>;
}

pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    /// Client sending `headers` on every request.
    pub fn new(headers: &BTreeMap<String, String>) -> Result<Self, Error> {
        let client = Client::builder()
            .default_headers(header_map(headers)?)
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn get(&mut self, url: &str) -> Result<Page, FetchError> {
        let resp = self.client.get(url).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(Page { status, body })
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, ConfigError> {
    let invalid = |message: String| ConfigError::Invalid { key: "HTTP_HEADERS", message };

    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| invalid(format!("bad header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| invalid(format!("bad value for {name}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}
