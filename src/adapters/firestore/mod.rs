//! Firestore REST adapter: wire types, document mapper, and gateway.

pub mod document;
pub mod gateway;
pub mod mapper;

pub use gateway::{FirestoreGateway, FirestoreGatewayConfig};
