//! Proxy profile model and editing.
//!
//! A profile holds a `default` rule plus http, https and ftp overrides, each
//! either inheriting the default or configured on its own, and a bypass list.
//!
//! - [`scheme`]: scheme and protocol enumerations
//! - [`config`]: the profile data model and its serialized shape
//! - [`editor`]: editing session with validation and display resolution
//! - [`normalize`]: input coercion and save-time cleanup
//! - [`env`]: profiles from `*_PROXY` environment variables
//!
//! # Example
//!
//! ```rust,ignore
//! use proxyprofile::profile::{Edit, ProfileEditor, ProxyProfile, Protocol, Scheme};
//!
//! let mut editor = ProfileEditor::load(&ProxyProfile::new());
//! editor.set_field(Scheme::Default, Edit::Server("proxy.local".into()));
//! editor.set_field(Scheme::Ftp, Edit::Protocol(Protocol::Direct));
//! editor.save(|profile| println!("{:?}", profile))?;
//! ```

pub mod config;
pub mod editor;
pub mod env;
pub mod normalize;
pub mod scheme;

pub use config::{Edit, Field, FieldValue, ProxyProfile, SchemeConfig};
pub use editor::ProfileEditor;
pub use normalize::{commit, normalize_bypass_list, parse_port};
pub use scheme::{Protocol, ProtocolChoice, Scheme};
