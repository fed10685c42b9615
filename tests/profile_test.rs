//! Profile Editing Tests
//!
//! Covers:
//! - Inheritance resolution through the default rule
//! - `set_field` branching (useDefault, protocol, direct)
//! - Validity and editability per scheme
//! - Save-time normalization

use proxyprofile::profile::{commit, normalize_bypass_list};
use proxyprofile::{
    Edit, Field, FieldValue, ProfileEditor, ProfileError, Protocol, ProxyProfile, Scheme,
    SchemeConfig,
};

const ALL_FIELDS: [Field; 6] = [
    Field::UseDefault,
    Field::Protocol,
    Field::Server,
    Field::Port,
    Field::User,
    Field::Password,
];

fn configured_editor() -> ProfileEditor {
    let default = SchemeConfig::proxied(Protocol::Http, "proxy.local", Some(8080))
        .with_auth("ops", "pw");
    ProfileEditor::load(&ProxyProfile::new().with_default(default))
}

#[test]
fn test_use_default_resolves_like_default() {
    for scheme in Scheme::OVERRIDES {
        let mut editor = configured_editor();
        editor.set_field(scheme, Edit::Protocol(Protocol::Socks5));
        editor.set_field(scheme, Edit::Server("other".into()));
        editor.set_field(scheme, Edit::UseDefault(true));

        for field in ALL_FIELDS {
            assert_eq!(
                editor.resolve(scheme, field),
                editor.resolve(Scheme::Default, field)
            );
        }
    }
}

#[test]
fn test_inheritance_tracks_later_default_edits() {
    let mut editor = configured_editor();
    editor.set_field(Scheme::Default, Edit::Server("moved.local".into()));
    assert_eq!(
        editor.resolve(Scheme::Https, Field::Server),
        FieldValue::Text("moved.local".into())
    );
}

#[test]
fn test_direct_clears_fields() {
    for scheme in Scheme::ALL {
        let mut editor = configured_editor();
        editor.set_field(scheme, Edit::Protocol(Protocol::Https));
        editor.set_field(scheme, Edit::Server("edge".into()));
        editor.set_field(scheme, Edit::Port(Some(443)));
        editor.set_field(scheme, Edit::User("u".into()));
        editor.set_field(scheme, Edit::Password("p".into()));
        editor.set_field(scheme, Edit::Protocol(Protocol::Direct));

        let config = editor.profile().get(scheme);
        assert!(!config.use_default, "{} still inherits", scheme);
        assert_eq!(config.protocol, Protocol::Direct);
        assert!(config.server.is_empty());
        assert_eq!(config.port, None);
        assert!(config.user.is_empty());
        assert!(config.password.is_empty());
    }
}

#[test]
fn test_direct_default_is_inherited() {
    let mut editor = configured_editor();
    editor.set_field(Scheme::Default, Edit::Protocol(Protocol::Direct));

    for scheme in Scheme::OVERRIDES {
        assert_eq!(
            editor.resolve(scheme, Field::Protocol),
            FieldValue::Protocol(Protocol::Direct)
        );
        assert!(!editor.can_toggle_password_visibility(scheme));
    }
    assert!(editor.is_savable());
}

#[test]
fn test_breaking_inheritance_requires_server() {
    let mut editor = configured_editor();
    assert!(editor.profile().http.use_default);

    editor.set_field(Scheme::Http, Edit::Protocol(Protocol::Https));

    let http = &editor.profile().http;
    assert!(!http.use_default);
    assert_eq!(http.protocol, Protocol::Https);
    assert!(http.server.is_empty());
    assert!(!editor.is_valid(Scheme::Http));
}

#[test]
fn test_inherited_https_shows_default_server_and_port() {
    let editor = configured_editor();
    assert_eq!(
        editor.resolve(Scheme::Https, Field::Server),
        FieldValue::Text("proxy.local".into())
    );
    assert_eq!(
        editor.resolve(Scheme::Https, Field::Port),
        FieldValue::Port(Some(8080))
    );
    assert!(!editor.is_editable(Scheme::Https));
}

#[test]
fn test_direct_ftp_valid_without_server() {
    let default = SchemeConfig::proxied(Protocol::Http, "proxy.local", Some(8080));
    let template = ProxyProfile::new()
        .with_default(default)
        .with_scheme(Scheme::Ftp, SchemeConfig::direct());
    let editor = ProfileEditor::load(&template);

    assert!(editor.is_valid(Scheme::Ftp));
    assert!(!editor.can_toggle_password_visibility(Scheme::Ftp));
}

#[test]
fn test_validity_rule() {
    let mut editor = configured_editor();
    for scheme in Scheme::OVERRIDES {
        assert!(
            editor.is_valid(scheme),
            "inherited {} should be valid",
            scheme
        );
    }

    editor.set_field(Scheme::Ftp, Edit::Protocol(Protocol::Socks4));
    assert!(!editor.is_valid(Scheme::Ftp));
    editor.set_field(Scheme::Ftp, Edit::Server("\t ".into()));
    assert!(!editor.is_valid(Scheme::Ftp));
    editor.set_field(Scheme::Ftp, Edit::Server("socks.local".into()));
    assert!(editor.is_valid(Scheme::Ftp));
    assert!(editor.is_savable());
}

#[test]
fn test_commit_idempotent() {
    let mut editor = configured_editor();
    editor.set_field(Scheme::Http, Edit::Protocol(Protocol::Http));
    editor.set_field(Scheme::Http, Edit::Server("  padded.local  ".into()));
    editor.set_bypass_text("one\n\n two \n\t");

    let once = editor.commit();
    assert_eq!(commit(&once), once);
    assert_eq!(once.http.server, "padded.local");
    assert_eq!(once.bypass_list, vec!["one", "two"]);
}

#[test]
fn test_bypass_normalization() {
    let entries = normalize_bypass_list("a\n  \nb ");
    let profile = ProxyProfile::new().with_bypass(entries);
    assert_eq!(commit(&profile).bypass_list, vec!["a", "b"]);
}

#[test]
fn test_save_hands_off_normalized_profile() {
    let mut editor = configured_editor();
    editor.set_field(Scheme::Ftp, Edit::Protocol(Protocol::Direct));

    let mut saved = Vec::new();
    editor.save(|p| saved.push(p)).unwrap();

    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].http, SchemeConfig::inherited());
    assert_eq!(saved[0].ftp, SchemeConfig::direct());
}

#[test]
fn test_save_withheld_when_invalid() {
    let mut editor = configured_editor();
    editor.set_field(Scheme::Https, Edit::Protocol(Protocol::Socks5));

    let result = editor.save(|_| panic!("save must not run"));
    assert_eq!(result, Err(ProfileError::MissingServer(Scheme::Https)));
}
