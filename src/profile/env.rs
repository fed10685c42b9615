//! Profiles from proxy environment variables.
//!
//! Reads `ALL_PROXY`, `HTTP_PROXY`, `HTTPS_PROXY`, `FTP_PROXY` and `NO_PROXY`,
//! upper case first, then lower case.

use crate::base::profileerror::ProfileError;
use crate::profile::config::{ProxyProfile, SchemeConfig};
use crate::profile::normalize::is_blank;
use crate::profile::scheme::Protocol;
use percent_encoding::percent_decode_str;
use url::Url;

impl SchemeConfig {
    /// Parse a proxy URL such as `socks5://user:pw@host:1080`.
    ///
    /// A missing URL scheme is read as `http://`.
    pub fn from_proxy_url(raw: &str) -> Result<Self, ProfileError> {
        let raw = raw.trim();
        let url = if raw.contains("://") {
            Url::parse(raw)?
        } else {
            Url::parse(&format!("http://{}", raw))?
        };

        let protocol = Protocol::from_url_scheme(url.scheme())?;
        let server = url
            .host_str()
            .map(|h| h.trim_start_matches('[').trim_end_matches(']'))
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ProfileError::InvalidProxyUrl(raw.to_string()))?;

        let user = percent_decode_str(url.username())
            .decode_utf8_lossy()
            .into_owned();
        let password = url
            .password()
            .map(|p| percent_decode_str(p).decode_utf8_lossy().into_owned())
            .unwrap_or_default();

        let config = SchemeConfig::proxied(protocol, server, url.port());
        Ok(config.with_auth(user, password))
    }
}

impl ProxyProfile {
    /// Create a profile from the process environment.
    ///
    /// Returns `None` when no proxy variable is set.
    pub fn from_env() -> Option<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Create a profile from an arbitrary variable lookup.
    ///
    /// The default rule comes from `ALL_PROXY`, falling back to the first of
    /// `HTTPS_PROXY`, `HTTP_PROXY` and `FTP_PROXY`. Schemes without a variable
    /// inherit the default rule.
    pub fn from_env_with<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .or_else(|| lookup(&name.to_ascii_lowercase()))
                .filter(|v| !is_blank(v))
        };
        let rule = |name: &str| {
            let raw = var(name)?;
            match SchemeConfig::from_proxy_url(&raw) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!(variable = name, error = %e, "ignoring malformed proxy");
                    None
                }
            }
        };

        let http = rule("HTTP_PROXY");
        let https = rule("HTTPS_PROXY");
        let ftp = rule("FTP_PROXY");
        let default = rule("ALL_PROXY")
            .or_else(|| https.clone())
            .or_else(|| http.clone())
            .or_else(|| ftp.clone())?;

        let mut profile = ProxyProfile::new().with_default(default);
        profile.http = http.unwrap_or_else(SchemeConfig::inherited);
        profile.https = https.unwrap_or_else(SchemeConfig::inherited);
        profile.ftp = ftp.unwrap_or_else(SchemeConfig::inherited);

        if let Some(no_proxy) = var("NO_PROXY") {
            profile.bypass_list = no_proxy
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_string)
                .collect();
        }

        tracing::debug!(
            bypass_entries = profile.bypass_list.len(),
            "profile from environment"
        );
        Some(profile)
    }
}
