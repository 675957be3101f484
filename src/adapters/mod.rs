//! Adapters: concrete implementations of the ports.

pub mod firestore;
pub mod identity;
pub mod memory;

pub use firestore::{FirestoreGateway, FirestoreGatewayConfig};
pub use identity::{FirebaseIdentity, FirebaseIdentityConfig, MockIdentity};
pub use memory::InMemoryGateway;
