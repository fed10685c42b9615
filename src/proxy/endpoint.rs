use crate::base::profileerror::ProfileError;
use crate::profile::config::SchemeConfig;
use crate::profile::scheme::Protocol;
use std::fmt;
use std::net::Ipv6Addr;
use url::Url;
use zeroize::Zeroizing;

/// A proxy server taken from a resolved scheme rule.
#[derive(Clone)]
pub struct ProxyEndpoint {
    /// Never [`Protocol::Direct`].
    pub protocol: Protocol,
    pub host: String,
    /// Explicit port; `None` means the protocol default.
    pub port: Option<u16>,
    /// Proxy username for authentication
    pub username: Option<String>,
    /// Proxy password (zeroized on drop)
    pub password: Option<Zeroizing<String>>,
}

impl ProxyEndpoint {
    /// Build an endpoint from a rule that has already been resolved through
    /// inheritance.
    ///
    /// Returns `None` for direct rules and rules without a server.
    pub fn from_config(config: &SchemeConfig) -> Option<Self> {
        if config.protocol.is_direct() || !config.has_server() {
            return None;
        }

        Some(Self {
            protocol: config.protocol,
            host: config.server.trim().to_string(),
            port: config.port,
            username: Some(config.user.clone()).filter(|u| !u.is_empty()),
            password: Some(config.password.clone())
                .filter(|p| !p.is_empty())
                .map(Zeroizing::new),
        })
    }

    /// Get proxy host and port, falling back to the protocol's default port.
    pub fn host_port(&self) -> (&str, u16) {
        let port = self.port.or(self.protocol.default_port()).unwrap_or(80);
        (self.host.as_str(), port)
    }

    /// Check if this proxy requires authentication.
    pub fn requires_auth(&self) -> bool {
        self.username.is_some()
    }

    /// Check if this is a SOCKS proxy.
    pub fn is_socks(&self) -> bool {
        self.protocol.is_socks()
    }

    /// Proxy URL with credentials, e.g. `socks5://user:pw@host:1080`.
    pub fn to_url(&self) -> Result<Url, ProfileError> {
        let (host, port) = self.host_port();
        let host = if host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", host)
        } else {
            host.to_string()
        };

        let mut url = Url::parse(&format!("{}://{}:{}", self.protocol.as_str(), host, port))?;
        if let Some(user) = &self.username {
            url.set_username(user)
                .map_err(|_| ProfileError::InvalidProxyUrl(self.host.clone()))?;
            if let Some(pass) = &self.password {
                url.set_password(Some(pass.as_str()))
                    .map_err(|_| ProfileError::InvalidProxyUrl(self.host.clone()))?;
            }
        }
        Ok(url)
    }
}

impl fmt::Debug for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyEndpoint")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
