//! Base types and error handling.
//!
//! - [`ProfileError`](profileerror::ProfileError): failures at the input and save boundaries

pub mod profileerror;

#[cfg(test)]
mod tests;
