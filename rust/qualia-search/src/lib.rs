//! # Qualia Search — the web-search provider collaborator
//!
//! The generator treats web search as an external service behind the
//! [`SearchProvider`] trait: text snippets for evidence queries and result
//! counts for the set-relation queries the web metrics are built on.
//!
//! Operational concerns live here too, kept strictly separated:
//!
//! - **Credentials** rotate through a [`credentials::CredentialRing`]; when
//!   every credential has hit its quota the provider surfaces
//!   [`SearchError::QuotaExhausted`] — a distinguishable condition, never an
//!   empty result.
//! - **Caching** is its own collaborator ([`QueryCache`]) keyed by the
//!   literal query string, with an explicit hit/miss contract. The provider
//!   consults it; it is not part of the provider interface.

pub mod cache;
pub mod credentials;
pub mod error;
pub mod google;
pub mod provider;

pub use cache::{DiskCache, MemoryCache, QueryCache};
pub use credentials::{Credential, CredentialRing, read_key_file};
pub use error::SearchError;
pub use google::GoogleSearchProvider;
pub use provider::SearchProvider;
