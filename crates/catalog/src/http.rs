//! Shared JSON transport for upstream catalog clients.
//!
//! Successful responses are kept in a bounded in-memory TTL cache keyed by the
//! full request (URL, query parameters, body). Failures are never cached and
//! never retried.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::{CatalogError, ClientConfig, Upstream};

/// Upper bound on cached responses per upstream client.
pub const MAX_CACHE_ENTRIES: usize = 1024;

#[derive(Clone)]
pub(crate) struct ResponseCache {
    ttl: Duration,
    capacity: usize,
    entries: Arc<RwLock<HashMap<String, (Instant, serde_json::Value)>>>,
}

impl ResponseCache {
    pub(crate) fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            ttl,
            capacity: capacity.max(1),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub(crate) async fn get(&self, key: &str) -> Option<serde_json::Value> {
        if !self.enabled() {
            return None;
        }
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|(stored, _)| stored.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    /// Store `value`. A full cache first drops expired entries, then the oldest.
    pub(crate) async fn insert(&self, key: String, value: serde_json::Value) {
        if !self.enabled() {
            return;
        }
        let mut entries = self.entries.write().await;
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            let ttl = self.ttl;
            entries.retain(|_, (stored, _)| stored.elapsed() < ttl);

            if entries.len() >= self.capacity {
                let mut by_age: Vec<(Instant, String)> = entries
                    .iter()
                    .map(|(k, (stored, _))| (*stored, k.clone()))
                    .collect();
                by_age.sort_unstable();
                let excess = entries.len() + 1 - self.capacity;
                for (_, old) in by_age.into_iter().take(excess) {
                    entries.remove(&old);
                }
            }
        }
        entries.insert(key, (Instant::now(), value));
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// How an upstream 404 is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Lists, searches and feeds: a 404 is an upstream failure.
    Listing,
    /// Single-record fetches: a 404 means the record does not exist.
    Record,
}

/// reqwest client bound to one upstream's base URL and cache.
#[derive(Clone)]
pub struct JsonTransport {
    upstream_label: &'static str,
    base_url: String,
    client: reqwest::Client,
    cache: ResponseCache,
}

impl JsonTransport {
    pub fn new(upstream_label: &'static str, config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            upstream_label,
            base_url: config.base_url.clone(),
            client,
            cache: ResponseCache::new(config.cache_ttl, MAX_CACHE_ENTRIES),
        }
    }

    /// GET `{base_url}{path}` with query parameters and extra headers.
    pub async fn get_json(
        &self,
        upstream: Upstream,
        lookup: Lookup,
        path: &str,
        params: &[(&str, String)],
        headers: &[(&'static str, &str)],
    ) -> Result<serde_json::Value, CatalogError> {
        let url = format!("{}{path}", self.base_url);
        let key = cache_key(&url, params, None);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(url = %url, "{} cache hit", self.upstream_label);
            return Ok(hit);
        }

        debug!(url = %url, "{} request", self.upstream_label);
        let mut request = self.client.get(&url).query(params);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let value = self.send(upstream, lookup, request).await?;
        self.cache.insert(key, value.clone()).await;
        Ok(value)
    }

    /// POST a JSON body to the base URL itself (GraphQL style endpoints).
    pub async fn post_json(
        &self,
        upstream: Upstream,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, CatalogError> {
        let body_text = body.to_string();
        let key = cache_key(&self.base_url, &[], Some(&body_text));
        if let Some(hit) = self.cache.get(&key).await {
            debug!(url = %self.base_url, "{} cache hit", self.upstream_label);
            return Ok(hit);
        }

        debug!(url = %self.base_url, "{} request", self.upstream_label);
        let request = self
            .client
            .post(&self.base_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body);

        let value = self.send(upstream, Lookup::Listing, request).await?;
        self.cache.insert(key, value.clone()).await;
        Ok(value)
    }

    async fn send(
        &self,
        upstream: Upstream,
        lookup: Lookup,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, CatalogError> {
        let resp = request
            .send()
            .await
            .map_err(|e| CatalogError::upstream(upstream, e.to_string()))?;

        if lookup == Lookup::Record && resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }

        if !resp.status().is_success() {
            return Err(CatalogError::upstream(
                upstream,
                format!("{} returned {}", self.upstream_label, resp.status()),
            ));
        }

        resp.json()
            .await
            .map_err(|e| CatalogError::upstream(upstream, format!("parse JSON: {e}")))
    }
}

fn cache_key(url: &str, params: &[(&str, String)], body: Option<&str>) -> String {
    let mut key = url.to_string();
    for (i, (name, value)) in params.iter().enumerate() {
        key.push(if i == 0 { '?' } else { '&' });
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    if let Some(body) = body {
        key.push('#');
        key.push_str(body);
    }
    key
}
