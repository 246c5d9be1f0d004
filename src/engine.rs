use futures::stream::{self, StreamExt};
use std::fmt::Display;

use crate::config::Config;
use crate::error::Result;
use crate::export::ExportOptions;
use crate::schema::{Envelope, Record};

// GENERALISED FUNCTIONS

// base url followed by each part and a trailing slash, e.g. ".../attr/country/"
pub fn build_call<I>(base: &str, parts: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut call_url = base.trim_end_matches('/').to_string();
    call_url.push('/');
    for part in parts {
        call_url.push_str(&part.to_string());
        call_url.push('/');
    }
    call_url
}

/// Handle on the OEC API: a shared HTTP client plus the settings every call needs.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    user_agent: String,
    concurrency: usize,
    export: ExportOptions,
}

impl Client {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api.base_url.clone(),
            user_agent: config.api.user_agent.clone(),
            concurrency: config.api.concurrency.max(1),
            export: config.export.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn export_options(&self) -> &ExportOptions {
        &self.export
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn build_call<I>(&self, parts: I) -> String
    where
        I: IntoIterator,
        I::Item: Display,
    {
        build_call(&self.base_url, parts)
    }

    /// GETs `call_url` and returns the records under the response's `data` key.
    ///
    /// Transport failures, non-2xx statuses and bodies that don't decode are all
    /// returned as `OecError::Http`.
    pub async fn request_data(&self, call_url: &str) -> Result<Vec<Record>> {
        tracing::debug!(url = call_url, "Requesting");
        let envelope: Envelope = self
            .http
            .get(call_url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        tracing::debug!(url = call_url, records = envelope.data.len(), "Received");
        Ok(envelope.data)
    }

    // bulk request of several urls, at most n in flight; results keep input order
    pub async fn request_many(&self, call_urls: &[String], n: usize) -> Vec<Result<Vec<Record>>> {
        stream::iter(call_urls.iter().map(|url| self.request_data(url)))
            .buffered(n.max(1))
            .collect()
            .await
    }
}
