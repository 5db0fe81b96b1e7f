//! Base-policy descriptors, one static per rule.
//!
//! Descriptors carry the identity (provider, service, short code), severity and prose of a
//! policy. A few also embed an evaluation that rules delegate to instead of carrying their own
//! check.

#[cfg(feature = "aws")]
pub mod aws;
#[cfg(feature = "azure")]
pub mod azure;
#[cfg(feature = "digitalocean")]
pub mod digitalocean;
#[cfg(feature = "google")]
pub mod google;
#[cfg(feature = "oracle")]
pub mod oracle;
