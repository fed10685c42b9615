//! Bypass-list matching.
//!
//! Entries use the browser bypass-list syntax:
//! - `*` matches every host
//! - `<local>` matches plain host names without a dot
//! - `[scheme://]host-pattern[:port]`, where the pattern may contain `*`
//! - `.example.com` matches the domain and all of its subdomains
//! - `[scheme://]ip[:port]`, with IPv6 literals bracketed when a port follows
//! - `ip/prefix` CIDR ranges

use crate::profile::config::ProxyProfile;
use std::net::IpAddr;
use url::Url;

/// Compiled bypass list.
#[derive(Debug, Clone, Default)]
pub struct BypassMatcher {
    rules: Vec<BypassRule>,
    match_all: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BypassRule {
    scheme: Option<String>,
    host: HostMatch,
    port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostMatch {
    Local,
    /// Exact host name, or a `*` wildcard pattern.
    Pattern(String),
    /// Domain plus subdomains.
    Suffix(String),
    Address(IpAddr),
    Cidr(IpAddr, u8),
}

impl BypassMatcher {
    /// Compile bypass entries. Blank and unparseable entries are skipped.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut matcher = BypassMatcher::default();

        for entry in entries {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }

            if entry == "*" {
                matcher.match_all = true;
                continue;
            }

            match parse_rule(entry) {
                Some(rule) => matcher.rules.push(rule),
                None => tracing::debug!(entry = %entry, "skipping unparseable bypass entry"),
            }
        }

        matcher
    }

    /// Compile the bypass list of a profile.
    pub fn from_profile(profile: &ProxyProfile) -> Self {
        Self::new(&profile.bypass_list)
    }

    /// Number of compiled rules, not counting `*`.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && !self.match_all
    }

    /// Check a bare host. Scheme and port restrictions of rules are ignored.
    pub fn should_bypass(&self, host: &str) -> bool {
        self.should_bypass_target(None, host, None)
    }

    /// Check a request target.
    ///
    /// A rule restricted to a scheme or port only applies when the caller
    /// supplies that scheme or port.
    pub fn should_bypass_target(
        &self,
        scheme: Option<&str>,
        host: &str,
        port: Option<u16>,
    ) -> bool {
        if self.match_all {
            return true;
        }

        // Strip brackets from IPv6
        let host = host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .to_ascii_lowercase();
        let ip = host.parse::<IpAddr>().ok();

        self.rules.iter().any(|rule| {
            let scheme_ok = match (&rule.scheme, scheme) {
                (Some(want), Some(got)) => want.eq_ignore_ascii_case(got),
                _ => true,
            };
            let port_ok = match (rule.port, port) {
                (Some(want), Some(got)) => want == got,
                _ => true,
            };
            scheme_ok && port_ok && host_matches(&rule.host, &host, ip)
        })
    }

    /// Check if a URL should skip proxying.
    pub fn should_bypass_url(&self, url: &Url) -> bool {
        url.host_str().is_some_and(|h| {
            self.should_bypass_target(Some(url.scheme()), h, url.port_or_known_default())
        })
    }
}

fn parse_rule(entry: &str) -> Option<BypassRule> {
    if entry.eq_ignore_ascii_case("<local>") {
        return Some(BypassRule {
            scheme: None,
            host: HostMatch::Local,
            port: None,
        });
    }

    let (scheme, rest) = match entry.split_once("://") {
        Some((scheme, rest)) => (Some(scheme.to_ascii_lowercase()), rest),
        None => (None, entry),
    };

    // Try to parse as CIDR
    if let Some((ip_str, prefix_str)) = rest.split_once('/') {
        let ip_str = ip_str.trim_start_matches('[').trim_end_matches(']');
        if let (Ok(ip), Ok(prefix)) = (ip_str.parse::<IpAddr>(), prefix_str.parse::<u8>()) {
            return Some(BypassRule {
                scheme,
                host: HostMatch::Cidr(ip, prefix),
                port: None,
            });
        }
        return None;
    }

    let (host, port) = split_host_port(rest);
    let host = host.to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }

    let host = if let Ok(ip) = host.parse::<IpAddr>() {
        HostMatch::Address(ip)
    } else if let Some(domain) = host.strip_prefix('.') {
        HostMatch::Suffix(domain.to_string())
    } else {
        HostMatch::Pattern(host)
    };

    Some(BypassRule { scheme, host, port })
}

/// Split an optional trailing `:port`, leaving bare IPv6 literals intact.
fn split_host_port(s: &str) -> (&str, Option<u16>) {
    if let Some(rest) = s.strip_prefix('[') {
        if let Some((host, after)) = rest.split_once(']') {
            let port = after.strip_prefix(':').and_then(|p| p.parse().ok());
            return (host, port);
        }
    }

    match s.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') => match port.parse() {
            Ok(port) => (host, Some(port)),
            Err(_) => (s, None),
        },
        _ => (s, None),
    }
}

fn host_matches(rule: &HostMatch, host: &str, ip: Option<IpAddr>) -> bool {
    match rule {
        HostMatch::Local => ip.is_none() && !host.contains('.'),
        HostMatch::Pattern(pattern) => wildcard_match(pattern, host),
        HostMatch::Suffix(domain) => {
            // "www.example.com" matches ".example.com", "notexample.com" does not
            match host.strip_suffix(domain.as_str()) {
                Some(rest) => rest.is_empty() || rest.ends_with('.'),
                None => false,
            }
        }
        HostMatch::Address(addr) => ip == Some(*addr),
        HostMatch::Cidr(network, prefix) => {
            ip.is_some_and(|ip| cidr_contains(*network, *prefix, ip))
        }
    }
}

/// Glob match where `*` spans any run of characters.
fn wildcard_match(pattern: &str, value: &str) -> bool {
    let p = pattern.as_bytes();
    let v = value.as_bytes();
    let (mut pi, mut vi) = (0, 0);
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while vi < v.len() {
        if pi < p.len() && p[pi] == b'*' {
            star = Some(pi);
            pi += 1;
            mark = vi;
        } else if pi < p.len() && p[pi] == v[vi] {
            pi += 1;
            vi += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            vi = mark;
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|&b| b == b'*')
}

/// Check if IP is within CIDR range.
fn cidr_contains(network: IpAddr, prefix: u8, addr: IpAddr) -> bool {
    match (network, addr) {
        (IpAddr::V4(net), IpAddr::V4(ip)) => {
            if prefix > 32 {
                return false;
            }
            let mask = if prefix == 0 {
                0u32
            } else {
                !0u32 << (32 - prefix)
            };
            (u32::from(net) & mask) == (u32::from(ip) & mask)
        }
        (IpAddr::V6(net), IpAddr::V6(ip)) => {
            if prefix > 128 {
                return false;
            }
            let mask = if prefix == 0 {
                0u128
            } else {
                !0u128 << (128 - prefix)
            };
            (u128::from(net) & mask) == (u128::from(ip) & mask)
        }
        _ => false,
    }
}
