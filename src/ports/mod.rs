//! Ports - interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `BookingGateway` - the remote document store round trips
//! - `IdentityProvider` - the external auth collaborator (sign-in,
//!   current-user handle, change notifications, token issuance)

mod booking_gateway;
mod identity_provider;

pub use booking_gateway::{BookingGateway, GatewayError};
pub use identity_provider::{
    AuthError, AuthListener, AuthSubscription, Credentials, IdentityProvider, ListenerRegistry,
    UserHandle,
};
