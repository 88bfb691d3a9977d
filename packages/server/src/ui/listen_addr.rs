//! Listen address in `<protocol>://<host>:<port>` form, e.g. `tcp://:9000`.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Default listen address: TCP, all interfaces, port 9000
pub const DEFAULT_LISTEN_ADDR: &str = "tcp://:9000";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenAddrError {
    #[error("Listen address '{0}' has no protocol (expected e.g. tcp://:9000)")]
    MissingScheme(String),

    #[error("Unsupported protocol '{0}' (only tcp is supported)")]
    UnsupportedProtocol(String),

    #[error("Invalid port '{0}'")]
    InvalidPort(String),

    #[error("Invalid address '{0}'")]
    InvalidAddress(String),
}

/// Parsed listen address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenAddr {
    host: String,
    port: u16,
}

impl ListenAddr {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host as written, without brackets for IPv6 literals; empty means all interfaces
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn is_all_interfaces(&self) -> bool {
        self.host.is_empty()
    }

    /// Hosts to try binding, in order.
    ///
    /// All interfaces prefers the IPv6 wildcard (dual-stack where the OS
    /// allows it) and falls back to the IPv4 wildcard.
    pub fn bind_hosts(&self) -> Vec<&str> {
        if self.is_all_interfaces() {
            vec!["::", "0.0.0.0"]
        } else {
            vec![self.host.as_str()]
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for ListenAddr {
    fn default() -> Self {
        Self::new("", 9000)
    }
}

impl FromStr for ListenAddr {
    type Err = ListenAddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (protocol, rest) = s
            .split_once("://")
            .ok_or_else(|| ListenAddrError::MissingScheme(s.to_string()))?;
        if !protocol.eq_ignore_ascii_case("tcp") {
            return Err(ListenAddrError::UnsupportedProtocol(protocol.to_string()));
        }

        let (host, port) = rest
            .rsplit_once(':')
            .ok_or_else(|| ListenAddrError::InvalidAddress(rest.to_string()))?;
        let port = port
            .parse::<u16>()
            .map_err(|_| ListenAddrError::InvalidPort(port.to_string()))?;

        let host = match host {
            "" => "",
            h if h.starts_with('[') => h
                .strip_prefix('[')
                .and_then(|h| h.strip_suffix(']'))
                .ok_or_else(|| ListenAddrError::InvalidAddress(rest.to_string()))?,
            h if h.contains(':') => return Err(ListenAddrError::InvalidAddress(rest.to_string())),
            h => h,
        };

        Ok(Self::new(host, port))
    }
}

impl fmt::Display for ListenAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "tcp://[{}]:{}", self.host, self.port)
        } else {
            write!(f, "tcp://{}:{}", self.host, self.port)
        }
    }
}
