//! Input coercion and save-time normalization.

use crate::base::profileerror::ProfileError;
use crate::profile::config::{ProxyProfile, SchemeConfig};
use crate::profile::scheme::Scheme;

/// True for empty or whitespace-only text.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Split the bypass text area into entries, one per line.
///
/// Entries are kept verbatim so whitespace-only lines survive while the user
/// is still typing; [`commit`] trims and filters them.
pub fn normalize_bypass_list(raw: &str) -> Vec<String> {
    raw.split('\n').map(str::to_string).collect()
}

/// Coerce port text from an input field.
///
/// Blank text means no port. Only unsigned integers are accepted, and `0`
/// reads as blank.
pub fn parse_port(text: &str) -> Result<Option<u16>, ProfileError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProfileError::InvalidPort(text.to_string()));
    }
    let port: u16 = text
        .parse()
        .map_err(|_| ProfileError::InvalidPort(text.to_string()))?;
    Ok(if port == 0 { None } else { Some(port) })
}

/// Produce the profile handed to a save callback.
///
/// - bypass entries are trimmed and blank ones dropped
/// - inherited override rules collapse to a bare `useDefault`
/// - independently configured override rules get their server trimmed
///
/// Credentials and ports pass through untouched. Validity is not checked
/// here; callers gate on it beforehand.
pub fn commit(profile: &ProxyProfile) -> ProxyProfile {
    let mut committed = profile.clone();

    committed.bypass_list = profile
        .bypass_list
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect();

    for scheme in Scheme::OVERRIDES {
        let config = committed.get_mut(scheme);
        if config.use_default {
            *config = SchemeConfig::inherited();
        } else {
            config.server = config.server.trim().to_string();
        }
    }

    committed
}
