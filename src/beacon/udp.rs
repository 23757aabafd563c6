// src/beacon/udp.rs
use std::time::Duration;
use async_trait::async_trait;
use log::debug;
use tokio::net::UdpSocket;
use super::report::parse_report;
use super::{BeaconError, ServerReport, StatusSource};

const REPORT_REQUEST: &[u8] = b"REPORT";
const MAX_REPLY_LEN: usize = 4096;

/// Queries a server's UDP beacon with a single `REPORT` datagram.
#[derive(Debug, Default, Clone)]
pub struct UdpBeacon;

impl UdpBeacon {
    pub fn new() -> Self {
        Self
    }

    async fn exchange(&self, host: &str, report_port: u16) -> Result<Vec<u8>, BeaconError> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.connect((host, report_port)).await?;
        socket.send(REPORT_REQUEST).await?;
        debug!("Report request sent to {}:{}", host, report_port);

        let mut buffer = vec![0u8; MAX_REPLY_LEN];
        let len = socket.recv(&mut buffer).await?;
        buffer.truncate(len);
        Ok(buffer)
    }
}

#[async_trait]
impl StatusSource for UdpBeacon {
    async fn query(&self, host: &str, report_port: u16, timeout: Duration) -> Result<ServerReport, BeaconError> {
        let reply = tokio::time::timeout(timeout, self.exchange(host, report_port))
            .await
            .map_err(|_| BeaconError::Timeout(timeout))??;

        debug!("Received {} byte report from {}:{}", reply.len(), host, report_port);
        let mut report = parse_report(&reply)?;
        if report.ip_address.is_empty() {
            report.ip_address = host.to_string();
        }
        Ok(report)
    }
}
