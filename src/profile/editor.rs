//! Profile editing session.
//!
//! [`ProfileEditor`] owns a working copy of a caller's template. All mutation
//! goes through [`ProfileEditor::set_field`]; display values are resolved on
//! read through the default rule, so a rule marked as inheriting always
//! reflects the current default.

use crate::base::profileerror::ProfileError;
use crate::profile::config::{Edit, Field, FieldValue, ProxyProfile, SchemeConfig};
use crate::profile::normalize::{self, is_blank};
use crate::profile::scheme::{Protocol, ProtocolChoice, Scheme};

/// Editing session over a working copy of a [`ProxyProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEditor {
    working: ProxyProfile,
}

impl Default for ProfileEditor {
    fn default() -> Self {
        Self::load(&ProxyProfile::new())
    }
}

impl ProfileEditor {
    /// Start a session from a copy of `template`. The template itself is never modified.
    pub fn load(template: &ProxyProfile) -> Self {
        let mut working = template.clone();
        working.enforce_default_rule();
        tracing::debug!(
            bypass_entries = working.bypass_list.len(),
            "loaded proxy profile"
        );
        Self { working }
    }

    /// Current working copy.
    pub fn profile(&self) -> &ProxyProfile {
        &self.working
    }

    /// Discard the session, returning the uncommitted working copy.
    pub fn into_profile(self) -> ProxyProfile {
        self.working
    }

    /// Apply one field edit.
    ///
    /// Inherited rules accept only protocol changes, which break inheritance.
    /// Choosing `direct` resets the rule to a blank direct rule; choosing
    /// `useDefault` resets it to a blank inherited rule. The default rule
    /// cannot inherit and ignores `useDefault`.
    pub fn set_field(&mut self, scheme: Scheme, edit: Edit) {
        let field = edit.field();
        let config = self.working.get_mut(scheme);

        if config.use_default && field != Field::Protocol {
            tracing::debug!(scheme = %scheme, field = ?field, "ignoring edit of inherited rule");
            return;
        }

        match edit {
            Edit::UseDefault(true) if scheme.is_default() => {
                tracing::debug!("default rule cannot inherit, ignoring useDefault");
            }
            Edit::UseDefault(true) => *config = SchemeConfig::inherited(),
            Edit::UseDefault(false) => config.use_default = false,
            Edit::Protocol(Protocol::Direct) => *config = SchemeConfig::direct(),
            Edit::Protocol(protocol) => {
                config.use_default = false;
                config.protocol = protocol;
            }
            Edit::Server(server) => config.server = server,
            Edit::Port(port) => config.port = port,
            Edit::User(user) => config.user = user,
            Edit::Password(password) => config.password = password,
        }
    }

    /// Value to display for a field, after inheritance.
    pub fn resolve(&self, scheme: Scheme, field: Field) -> FieldValue {
        self.working.effective(scheme).get(field)
    }

    /// Whether the server, port and credential inputs accept edits.
    pub fn is_editable(&self, scheme: Scheme) -> bool {
        let own = self.working.get(scheme);
        !own.use_default && !own.protocol.is_direct()
    }

    /// A rule is invalid when it proxies on its own without naming a server.
    pub fn is_valid(&self, scheme: Scheme) -> bool {
        let own = self.working.get(scheme);
        if own.use_default {
            return true;
        }
        let resolved = self.working.effective(scheme);
        resolved.protocol.is_direct() || !is_blank(&resolved.server)
    }

    /// Whether the password visibility toggle is offered.
    pub fn can_toggle_password_visibility(&self, scheme: Scheme) -> bool {
        !self.working.effective(scheme).protocol.is_direct()
    }

    /// Schemes currently blocking a save, in display order.
    pub fn invalid_schemes(&self) -> Vec<Scheme> {
        Scheme::ALL
            .into_iter()
            .filter(|s| !self.is_valid(*s))
            .collect()
    }

    pub fn is_savable(&self) -> bool {
        Scheme::ALL.iter().all(|s| self.is_valid(*s))
    }

    /// Selector entry currently shown for a scheme.
    ///
    /// A stored protocol the scheme does not offer shows as the first option.
    pub fn selected_choice(&self, scheme: Scheme) -> ProtocolChoice {
        let own = self.working.get(scheme);
        if own.use_default {
            return ProtocolChoice::UseDefault;
        }
        let choice = ProtocolChoice::Protocol(own.protocol);
        let options = ProtocolChoice::options_for(scheme);
        if options.contains(&choice) {
            choice
        } else {
            options[0]
        }
    }

    /// Apply a selector pick.
    pub fn select(&mut self, scheme: Scheme, choice: ProtocolChoice) {
        match choice {
            ProtocolChoice::UseDefault => self.set_field(scheme, Edit::UseDefault(true)),
            ProtocolChoice::Protocol(protocol) => self.set_field(scheme, Edit::Protocol(protocol)),
        }
    }

    /// Replace the bypass list from the raw text area contents.
    pub fn set_bypass_text(&mut self, raw: &str) {
        self.working.bypass_list = normalize::normalize_bypass_list(raw);
    }

    /// Bypass list as shown in the text area.
    pub fn bypass_text(&self) -> String {
        self.working.bypass_list.join("\n")
    }

    /// Normalized copy of the working profile. Does not validate.
    pub fn commit(&self) -> ProxyProfile {
        normalize::commit(&self.working)
    }

    /// Commit and hand the result to `on_save`, unless some rule is invalid.
    ///
    /// # Example
    /// ```ignore
    /// editor.save(|profile| store.persist(profile))?;
    /// ```
    pub fn save<F>(&self, on_save: F) -> Result<(), ProfileError>
    where
        F: FnOnce(ProxyProfile),
    {
        if let Some(scheme) = self.invalid_schemes().into_iter().next() {
            tracing::warn!(scheme = %scheme, "save withheld, proxy server missing");
            return Err(ProfileError::MissingServer(scheme));
        }

        let committed = self.commit();
        tracing::debug!(
            bypass_entries = committed.bypass_list.len(),
            "committing proxy profile"
        );
        on_save(committed);
        Ok(())
    }
}
