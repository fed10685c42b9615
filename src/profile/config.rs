//! Proxy profile data model.
//!
//! A [`ProxyProfile`] holds one [`SchemeConfig`] per [`Scheme`] plus the bypass
//! list. Serialization follows the payload handed to save callbacks: camelCase
//! keys, lowercase protocol names, and inherited rules written as
//! `{"useDefault": true}` with nothing else.

use crate::base::profileerror::ProfileError;
use crate::profile::normalize::{is_blank, parse_port};
use crate::profile::scheme::{Protocol, Scheme};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Editable field of a scheme rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    UseDefault,
    Protocol,
    Server,
    Port,
    User,
    Password,
}

impl Field {
    /// Fields shown as text inputs; these are locked while a rule is not editable.
    pub const INPUTS: [Field; 4] = [Field::Server, Field::Port, Field::User, Field::Password];
}

/// Value read back from a scheme rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Flag(bool),
    Protocol(Protocol),
    Text(String),
    /// Blank ports are `None`, never zero.
    Port(Option<u16>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_port(&self) -> Option<u16> {
        match self {
            FieldValue::Port(p) => *p,
            _ => None,
        }
    }

    pub fn as_protocol(&self) -> Option<Protocol> {
        match self {
            FieldValue::Protocol(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Flag(b) => write!(f, "{}", b),
            FieldValue::Protocol(p) => f.write_str(p.as_str()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Port(Some(p)) => write!(f, "{}", p),
            FieldValue::Port(None) => Ok(()),
        }
    }
}

/// A single field assignment, already coerced by the input layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    UseDefault(bool),
    Protocol(Protocol),
    Server(String),
    Port(Option<u16>),
    User(String),
    Password(String),
}

impl Edit {
    pub fn field(&self) -> Field {
        match self {
            Edit::UseDefault(_) => Field::UseDefault,
            Edit::Protocol(_) => Field::Protocol,
            Edit::Server(_) => Field::Server,
            Edit::Port(_) => Field::Port,
            Edit::User(_) => Field::User,
            Edit::Password(_) => Field::Password,
        }
    }
}

/// Proxy rule for one scheme.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawSchemeConfig", into = "RawSchemeConfig")]
pub struct SchemeConfig {
    /// Defer every field to the default rule.
    pub use_default: bool,
    pub protocol: Protocol,
    pub server: String,
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
}

impl SchemeConfig {
    /// Blank rule with the given inheritance flag.
    pub fn empty(use_default: bool) -> Self {
        Self {
            use_default,
            ..Self::default()
        }
    }

    /// Blank rule inheriting from the default rule.
    pub fn inherited() -> Self {
        Self::empty(true)
    }

    /// Non-inherited rule that bypasses proxying.
    pub fn direct() -> Self {
        Self::empty(false)
    }

    /// Blank default rule. The default rule never offers `direct`, so it
    /// starts on the first protocol it does offer.
    pub fn default_rule() -> Self {
        Self {
            protocol: Scheme::Default.protocols()[0],
            ..Self::empty(false)
        }
    }

    /// Independently configured proxy rule.
    pub fn proxied(protocol: Protocol, server: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            protocol,
            server: server.into(),
            port,
            ..Self::empty(false)
        }
    }

    /// Add authentication credentials.
    pub fn with_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = user.into();
        self.password = password.into();
        self
    }

    /// Read one field of this rule as stored, without inheritance.
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::UseDefault => FieldValue::Flag(self.use_default),
            Field::Protocol => FieldValue::Protocol(self.protocol),
            Field::Server => FieldValue::Text(self.server.clone()),
            Field::Port => FieldValue::Port(self.port),
            Field::User => FieldValue::Text(self.user.clone()),
            Field::Password => FieldValue::Text(self.password.clone()),
        }
    }

    pub fn has_server(&self) -> bool {
        !is_blank(&self.server)
    }
}

/// Proxy settings for every scheme plus hosts that skip proxying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyProfile {
    #[serde(
        default = "SchemeConfig::default_rule",
        deserialize_with = "deserialize_default_rule"
    )]
    pub default: SchemeConfig,
    #[serde(default = "SchemeConfig::inherited")]
    pub http: SchemeConfig,
    #[serde(default = "SchemeConfig::inherited")]
    pub https: SchemeConfig,
    #[serde(default = "SchemeConfig::inherited")]
    pub ftp: SchemeConfig,
    /// Host patterns exempt from proxying, in display order.
    #[serde(default)]
    pub bypass_list: Vec<String>,
}

impl Default for ProxyProfile {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyProfile {
    /// Blank profile: empty default rule, every other scheme inheriting it.
    pub fn new() -> Self {
        Self {
            default: SchemeConfig::default_rule(),
            http: SchemeConfig::inherited(),
            https: SchemeConfig::inherited(),
            ftp: SchemeConfig::inherited(),
            bypass_list: Vec::new(),
        }
    }

    /// Set the default rule.
    pub fn with_default(mut self, config: SchemeConfig) -> Self {
        self.default = config;
        self.enforce_default_rule();
        self
    }

    /// Set the rule for one scheme.
    pub fn with_scheme(mut self, scheme: Scheme, config: SchemeConfig) -> Self {
        *self.get_mut(scheme) = config;
        self.enforce_default_rule();
        self
    }

    /// Set the bypass list.
    pub fn with_bypass<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bypass_list = entries.into_iter().map(Into::into).collect();
        self
    }

    pub fn get(&self, scheme: Scheme) -> &SchemeConfig {
        match scheme {
            Scheme::Default => &self.default,
            Scheme::Http => &self.http,
            Scheme::Https => &self.https,
            Scheme::Ftp => &self.ftp,
        }
    }

    pub fn get_mut(&mut self, scheme: Scheme) -> &mut SchemeConfig {
        match scheme {
            Scheme::Default => &mut self.default,
            Scheme::Http => &mut self.http,
            Scheme::Https => &mut self.https,
            Scheme::Ftp => &mut self.ftp,
        }
    }

    /// The rule whose values apply to `scheme` after inheritance.
    pub fn effective(&self, scheme: Scheme) -> &SchemeConfig {
        let own = self.get(scheme);
        if scheme.is_default() || own.use_default {
            &self.default
        } else {
            own
        }
    }

    /// The default rule can never inherit.
    pub(crate) fn enforce_default_rule(&mut self) {
        if self.default.use_default {
            tracing::debug!("default rule cannot inherit, clearing useDefault");
            self.default.use_default = false;
        }
    }

    /// Parse a JSON template.
    #[cfg(feature = "json")]
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let mut profile: ProxyProfile = serde_json::from_str(json)?;
        profile.enforce_default_rule();
        Ok(profile)
    }

    /// Serialize to pretty-printed JSON.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The default rule keeps its values even when a template marks it as
/// inheriting, and a missing protocol falls back to the first one offered.
fn deserialize_default_rule<'de, D>(deserializer: D) -> Result<SchemeConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let mut raw = RawSchemeConfig::deserialize(deserializer)?;
    raw.use_default = false;
    raw.protocol.get_or_insert(Scheme::Default.protocols()[0]);
    SchemeConfig::try_from(raw).map_err(de::Error::custom)
}

/// Serialized form of [`SchemeConfig`].
#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RawSchemeConfig {
    #[serde(default)]
    use_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    protocol: Option<Protocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    port: Option<RawPort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
}

/// Ports arrive as numbers or as text (blank meaning unset).
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawPort {
    Number(i64),
    Text(String),
}

impl TryFrom<RawSchemeConfig> for SchemeConfig {
    type Error = ProfileError;

    fn try_from(raw: RawSchemeConfig) -> Result<Self, Self::Error> {
        // Inherited rules carry no values of their own; stale ones are dropped.
        if raw.use_default {
            return Ok(SchemeConfig::inherited());
        }

        let port = match raw.port {
            None => None,
            Some(RawPort::Number(n)) => {
                let port = u16::try_from(n)
                    .map_err(|_| ProfileError::InvalidPort(n.to_string()))?;
                Some(port)
            }
            Some(RawPort::Text(text)) => parse_port(&text)?,
        };

        Ok(SchemeConfig {
            use_default: false,
            protocol: raw.protocol.unwrap_or_default(),
            server: raw.server.unwrap_or_default(),
            port,
            user: raw.user.unwrap_or_default(),
            password: raw.password.unwrap_or_default(),
        })
    }
}

impl From<SchemeConfig> for RawSchemeConfig {
    fn from(config: SchemeConfig) -> Self {
        if config.use_default {
            return RawSchemeConfig {
                use_default: true,
                ..Default::default()
            };
        }

        RawSchemeConfig {
            use_default: false,
            protocol: Some(config.protocol),
            server: Some(config.server),
            port: config.port.map(|p| RawPort::Number(i64::from(p))),
            user: Some(config.user),
            password: Some(config.password),
        }
    }
}
