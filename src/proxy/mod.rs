//! Hand-off of a committed profile to the network layer.
//!
//! Nothing here opens connections; it only answers which proxy, if any, a
//! request target should use:
//! - [`matcher`]: bypass-list host matching
//! - [`endpoint`]: proxy server and credentials for a resolved rule
//! - [`route`]: per-URL route selection

pub mod endpoint;
pub mod matcher;
pub mod route;

pub use endpoint::ProxyEndpoint;
pub use matcher::BypassMatcher;
pub use route::{ProfileRouter, Route};
