//! Route selection for request targets.

use crate::base::profileerror::ProfileError;
use crate::profile::config::ProxyProfile;
use crate::profile::scheme::Scheme;
use crate::proxy::endpoint::ProxyEndpoint;
use crate::proxy::matcher::BypassMatcher;
use url::Url;

/// How a request should leave the machine.
#[derive(Debug, Clone)]
pub enum Route {
    Direct,
    Proxy(ProxyEndpoint),
}

impl Route {
    pub fn is_direct(&self) -> bool {
        matches!(self, Route::Direct)
    }

    pub fn endpoint(&self) -> Option<&ProxyEndpoint> {
        match self {
            Route::Direct => None,
            Route::Proxy(endpoint) => Some(endpoint),
        }
    }
}

/// Resolves request targets against a committed profile.
///
/// Bypass entries win over every rule. Otherwise the rule for the target's
/// URL scheme applies (anything other than http, https and ftp uses the
/// default rule), with inheritance resolved through the default rule.
#[derive(Debug, Clone)]
pub struct ProfileRouter {
    profile: ProxyProfile,
    bypass: BypassMatcher,
}

impl ProfileRouter {
    pub fn new(profile: ProxyProfile) -> Self {
        let bypass = BypassMatcher::from_profile(&profile);
        Self { profile, bypass }
    }

    pub fn profile(&self) -> &ProxyProfile {
        &self.profile
    }

    pub fn bypass(&self) -> &BypassMatcher {
        &self.bypass
    }

    /// Pick the route for a target URL.
    pub fn route(&self, target: &Url) -> Route {
        if self.bypass.should_bypass_url(target) {
            tracing::debug!(url = %target, "bypass list match, going direct");
            return Route::Direct;
        }

        let scheme = Scheme::for_url_scheme(target.scheme());
        match ProxyEndpoint::from_config(self.profile.effective(scheme)) {
            Some(endpoint) => {
                tracing::debug!(
                    url = %target,
                    scheme = %scheme,
                    proxy = %endpoint.host,
                    "routing via proxy"
                );
                Route::Proxy(endpoint)
            }
            None => Route::Direct,
        }
    }

    /// Parse a target URL and pick its route.
    pub fn route_str(&self, target: &str) -> Result<Route, ProfileError> {
        let url = Url::parse(target)?;
        Ok(self.route(&url))
    }
}

impl From<ProxyProfile> for ProfileRouter {
    fn from(profile: ProxyProfile) -> Self {
        Self::new(profile)
    }
}
