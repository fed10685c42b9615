//! # proxyprofile
//!
//! Per-scheme proxy profiles for applications that let users configure
//! proxies by hand.
//!
//! A [`ProxyProfile`] carries a `default` rule plus overrides for `http`,
//! `https` and `ftp`. Each override either inherits the default rule or names
//! its own protocol, server, port and credentials. A bypass list names hosts
//! that never go through a proxy.
//!
//! ## Features
//!
//! - **Editing sessions**: [`ProfileEditor`] works on a copy of the caller's
//!   template and centralizes every field edit
//! - **Inheritance on read**: inherited rules always display the current default
//! - **Validation**: per-scheme validity gating the save action
//! - **Save-time normalization**: trimming, blank filtering and collapsing of
//!   inherited rules before handing the profile to a save callback
//! - **Routing hand-off**: bypass-list matching and per-URL proxy selection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use proxyprofile::{Edit, ProfileEditor, ProfileRouter, Protocol, ProxyProfile, Scheme};
//!
//! let mut editor = ProfileEditor::load(&ProxyProfile::new());
//! editor.set_field(Scheme::Default, Edit::Server("proxy.local".into()));
//! editor.set_field(Scheme::Default, Edit::Port(Some(3128)));
//! editor.set_field(Scheme::Ftp, Edit::Protocol(Protocol::Direct));
//! editor.set_bypass_text("localhost\n*.internal");
//!
//! editor.save(|profile| {
//!     let router = ProfileRouter::new(profile);
//!     let route = router.route_str("https://example.com/").unwrap();
//!     println!("{:?}", route);
//! })?;
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`profile`] - Profile model, editing, validation and normalization
//! - [`proxy`] - Bypass matching and route selection for the network layer

pub mod base;
pub mod profile;
pub mod proxy;

pub use base::profileerror::ProfileError;
pub use profile::{
    Edit, Field, FieldValue, ProfileEditor, Protocol, ProtocolChoice, ProxyProfile, Scheme,
    SchemeConfig,
};
pub use proxy::{BypassMatcher, ProfileRouter, ProxyEndpoint, Route};
