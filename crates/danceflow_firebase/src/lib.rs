//! Firebase bootstrap for Danceflow
//!
//! Creates the Firebase app from its connection parameters and exposes the
//! three capability handles the frontend needs: authentication, the
//! document store, and object storage. All three talk to the Firebase REST
//! endpoints (or to the emulators when their URLs are configured).

pub mod auth;
pub mod client;
pub mod firestore;
pub mod storage;

pub use auth::{AuthClient, AuthSession};
pub use client::{FirebaseApp, FirebaseError, FirebaseServices};
pub use firestore::{decode_value, Document, FirestoreClient, DANCE_SCHOOLS_COLLECTION};
pub use storage::StorageClient;
