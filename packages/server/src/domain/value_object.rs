//! Value objects: connection identity and display name.

use std::{fmt, net::SocketAddr};

use uuid::Uuid;

/// Opaque identity of one live client session.
///
/// Generated by the transport when a connection is accepted. The core only
/// stores and compares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh, random connection identity
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name shown in front of a client's messages.
///
/// Defaults to the remote address rendered at connect time. An empty name
/// stands for "unknown connection".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Default name for a freshly opened connection
    pub fn from_addr(addr: SocketAddr) -> Self {
        Self(addr.to_string())
    }

    /// The absent name used for connections the registry does not know
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_generate_is_unique() {
        // テスト項目: 生成される ConnectionId は毎回異なる
        // given (前提条件):

        // when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_name_from_addr() {
        // テスト項目: リモートアドレスからデフォルトの表示名が作られる
        // given (前提条件):
        let addr: SocketAddr = "192.168.0.10:53211".parse().unwrap();

        // when (操作):
        let name = DisplayName::from_addr(addr);

        // then (期待する結果):
        assert_eq!(name.as_str(), "192.168.0.10:53211");
        assert_eq!(name.to_string(), "192.168.0.10:53211");
    }

    #[test]
    fn test_display_name_from_ipv6_addr() {
        // テスト項目: IPv6 アドレスは角括弧付きで表示される
        // given (前提条件):
        let addr: SocketAddr = "[::1]:9000".parse().unwrap();

        // when (操作):
        let name = DisplayName::from_addr(addr);

        // then (期待する結果):
        assert_eq!(name.as_str(), "[::1]:9000");
    }

    #[test]
    fn test_display_name_empty() {
        // テスト項目: 空の表示名は空文字列として扱われる
        // given (前提条件):

        // when (操作):
        let name = DisplayName::empty();

        // then (期待する結果):
        assert!(name.is_empty());
        assert_eq!(name, DisplayName::default());
        assert_eq!(name.into_string(), "");
    }
}
