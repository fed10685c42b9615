//! Scheme and protocol enumerations.
//!
//! The set of selectable protocols depends on the scheme: the `default`
//! selector never offers [`Protocol::Direct`], only the per-scheme overrides do.

use crate::base::profileerror::ProfileError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// URL scheme category a proxy rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Fallback rule the other schemes may inherit from.
    Default,
    Http,
    Https,
    Ftp,
}

impl Scheme {
    /// All schemes in display order.
    pub const ALL: [Scheme; 4] = [Scheme::Default, Scheme::Http, Scheme::Https, Scheme::Ftp];

    /// Schemes that may inherit from [`Scheme::Default`].
    pub const OVERRIDES: [Scheme; 3] = [Scheme::Http, Scheme::Https, Scheme::Ftp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Default => "default",
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Ftp => "ftp",
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Scheme::Default)
    }

    /// Row label shown next to the rule.
    pub fn label(&self) -> &'static str {
        match self {
            Scheme::Default => "(default)",
            Scheme::Http => "http://",
            Scheme::Https => "https://",
            Scheme::Ftp => "ftp://",
        }
    }

    /// Pick the rule governing requests with the given URL scheme.
    ///
    /// Anything other than http, https and ftp falls back to the default rule.
    pub fn for_url_scheme(url_scheme: &str) -> Scheme {
        match url_scheme.to_ascii_lowercase().as_str() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            "ftp" => Scheme::Ftp,
            _ => Scheme::Default,
        }
    }

    /// Protocols that may be selected for this scheme.
    pub fn protocols(&self) -> &'static [Protocol] {
        Protocol::choices(!self.is_default())
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Scheme::Default),
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            "ftp" => Ok(Scheme::Ftp),
            _ => Err(ProfileError::UnknownScheme(s.to_string())),
        }
    }
}

/// Proxy protocol of a scheme rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Do not proxy this scheme.
    #[default]
    Direct,
    /// HTTP proxy (CONNECT for HTTPS)
    Http,
    /// HTTPS proxy (TLS to proxy)
    Https,
    Socks4,
    Socks5,
}

impl Protocol {
    /// Every protocol, in selector order.
    pub const ALL: [Protocol; 5] = [
        Protocol::Direct,
        Protocol::Http,
        Protocol::Https,
        Protocol::Socks4,
        Protocol::Socks5,
    ];

    /// Protocols that actually route through a proxy.
    pub const PROXIED: [Protocol; 4] = [
        Protocol::Http,
        Protocol::Https,
        Protocol::Socks4,
        Protocol::Socks5,
    ];

    /// Selectable protocols, with or without [`Protocol::Direct`].
    pub fn choices(allow_direct: bool) -> &'static [Protocol] {
        if allow_direct {
            &Self::ALL
        } else {
            &Self::PROXIED
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Direct => "direct",
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Socks4 => "socks4",
            Protocol::Socks5 => "socks5",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Protocol::Direct => "DIRECT",
            Protocol::Http => "HTTP",
            Protocol::Https => "HTTPS",
            Protocol::Socks4 => "SOCKS4",
            Protocol::Socks5 => "SOCKS5",
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Protocol::Direct)
    }

    pub fn is_socks(&self) -> bool {
        matches!(self, Protocol::Socks4 | Protocol::Socks5)
    }

    /// Port assumed when a rule leaves the port blank.
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Protocol::Direct => None,
            Protocol::Http => Some(80),
            Protocol::Https => Some(443),
            Protocol::Socks4 | Protocol::Socks5 => Some(1080),
        }
    }

    /// Map a proxy URL scheme (`socks5h://`, `http://`, ...) to a protocol.
    pub fn from_url_scheme(url_scheme: &str) -> Result<Self, ProfileError> {
        match url_scheme.to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            "socks4" | "socks4a" => Ok(Protocol::Socks4),
            "socks" | "socks5" | "socks5h" => Ok(Protocol::Socks5),
            _ => Err(ProfileError::UnknownProtocol(url_scheme.to_string())),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Protocol::Direct),
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            "socks4" => Ok(Protocol::Socks4),
            "socks5" => Ok(Protocol::Socks5),
            _ => Err(ProfileError::UnknownProtocol(s.to_string())),
        }
    }
}

/// An entry of the protocol selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolChoice {
    /// Inherit everything from the default rule.
    UseDefault,
    Protocol(Protocol),
}

impl ProtocolChoice {
    /// Selector entries offered for a scheme, in display order.
    pub fn options_for(scheme: Scheme) -> Vec<ProtocolChoice> {
        let mut options = Vec::with_capacity(Protocol::ALL.len() + 1);
        if !scheme.is_default() {
            options.push(ProtocolChoice::UseDefault);
        }
        let protocols = scheme.protocols().iter().copied();
        options.extend(protocols.map(ProtocolChoice::Protocol));
        options
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProtocolChoice::UseDefault => "(use default)",
            ProtocolChoice::Protocol(p) => p.label(),
        }
    }
}

impl From<Protocol> for ProtocolChoice {
    fn from(protocol: Protocol) -> Self {
        ProtocolChoice::Protocol(protocol)
    }
}
