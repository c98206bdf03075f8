//! Client for the hosted zero-shot classification endpoint.

pub mod api;

pub use api::{DEFAULT_ENDPOINT, HostedClassifier, RemoteError, ZeroShotRequest};
