//! HTTP plumbing shared by the adapters.
//!
//! Adapters never reach for a global client: a `BackendClient` is built from
//! configuration and handed to each adapter explicitly.

pub mod client;

pub use client::{create_client, BackendClient};
