// src/poller/discovery.rs
use std::collections::HashSet;
use std::time::Duration;
use async_trait::async_trait;
use log::{debug, warn};
use thiserror::Error;

/// A server address advertised by the listing service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("listing request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[async_trait]
pub trait TargetSource: Send + Sync {
    async fn targets(&self) -> Result<Vec<Target>, DiscoveryError>;
}

/// Fetches the CSV server list published by the registry.
pub struct HttpListing {
    client: reqwest::Client,
    url: String,
}

impl HttpListing {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DiscoveryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl TargetSource for HttpListing {
    async fn targets(&self) -> Result<Vec<Target>, DiscoveryError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let targets = parse_targets(&body);
        debug!("Listing at {} returned {} targets", self.url, targets.len());
        Ok(targets)
    }
}

/// Skips the header line, then reads `_,host,port,...` rows. Bad rows are
/// logged and dropped; repeated addresses are kept once.
pub fn parse_targets(body: &str) -> Vec<Target> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for (line_no, line) in body.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 3 {
            warn!("Skipping listing row {}: expected at least 3 fields, got {:?}", line_no + 1, line);
            continue;
        }

        let host = fields[1].trim();
        let port = match fields[2].trim().parse::<u16>() {
            Ok(port) => port,
            Err(e) => {
                warn!("Skipping listing row {}: bad port {:?}: {}", line_no + 1, fields[2], e);
                continue;
            }
        };

        let target = Target {
            host: host.to_string(),
            port,
        };
        if seen.insert(target.clone()) {
            targets.push(target);
        }
    }

    targets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_header_and_malformed_rows() {
        let targets = parse_targets("header\nrow\nsrv1,10.0.0.1,7777\nsrv2,10.0.0.2,abc\n");
        assert_eq!(
            targets,
            vec![Target {
                host: "10.0.0.1".to_string(),
                port: 7777
            }]
        );
    }

    #[test]
    fn handles_crlf_and_extra_fields() {
        let body = "name,ip,port,mode\r\nA,1.2.3.4,6777,coop\r\nB,5.6.7.8,7777,adv\r\n\r\n";
        let targets = parse_targets(body);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].host, "5.6.7.8");
        assert_eq!(targets[1].port, 7777);
    }

    #[test]
    fn collapses_duplicates_and_rejects_out_of_range_ports() {
        let body = "h\na,1.1.1.1,6777\nb,1.1.1.1,6777\nc,1.1.1.1,70000\n";
        assert_eq!(parse_targets(body).len(), 1);
    }

    #[test]
    fn header_only_yields_nothing() {
        assert!(parse_targets("name,ip,port\n").is_empty());
        assert!(parse_targets("").is_empty());
    }

    #[tokio::test]
    async fn unreachable_listing_is_an_error() {
        let listing = HttpListing::new("http://127.0.0.1:1/servers", Duration::from_secs(2)).unwrap();
        assert!(matches!(listing.targets().await, Err(DiscoveryError::Request(_))));
    }
}
