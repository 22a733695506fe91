use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

use crate::error::ProtenixError;

/// An HTTP client that only allows requests to approved hosts.
/// The protocol only ever talks to the RCSB file server, so the default
/// allowlist is that host plus loopback.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client with the default allowlist.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProtenixError> {
        let allowlist = [
            "files.rcsb.org", // PDB downloads
            "localhost",
            "127.0.0.1",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|e| ProtenixError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Allows the host of `url`, if it has one.
    pub fn allow_url_host(&mut self, url: &str) -> Result<(), ProtenixError> {
        let parsed = Url::parse(url)
            .map_err(|e| ProtenixError::Config(format!("Invalid URL {}: {}", url, e)))?;
        match parsed.host_str() {
            Some(host) => {
                self.allow_domain(host);
                Ok(())
            }
            None => Err(ProtenixError::Config(format!("URL has no host: {}", url))),
        }
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        // exact match or subdomain of an allowed host
        self.allowlist
            .iter()
            .any(|allowed| host == allowed || host.ends_with(&format!(".{}", allowed)))
    }

    /// Returns a GET request builder if the URL passes the allowlist.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, ProtenixError> {
        if !self.is_allowed(url) {
            return Err(ProtenixError::Security(format!(
                "Network capabilities capped: domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}
