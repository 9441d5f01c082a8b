//! Protocol engines and supporting collaborators for the PUF-assisted
//! Ethernet mutual-authentication handshake: the credential store, the
//! Supplicant and Authenticator state machines, and the capability
//! traits (`Network`, `Puf`, `Environment`) they're built against.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod authenticator;
pub mod config;
mod env;
mod error;
mod network;
mod puf;
mod store;
mod supplicant;

pub use authenticator::Authenticator;
pub use env::{Environment, SimEnvironment, SystemEnvironment};
pub use error::{CredentialStoreError, EngineError, NetworkError, PufError};
pub use network::{Network, NETWORK_TIMEOUT};
pub use puf::Puf;
pub use store::{CredentialStore, QueryResult};
pub use supplicant::{Supplicant, SupplicantState};
