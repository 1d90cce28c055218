/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Session reload for accounts bound to education-data providers.
//!
//! A caller holding a stale [`Account`] asks the [`ReloadDispatcher`] for a
//! fresh session. The dispatcher picks the adapter for the account's service,
//! runs it, and folds whatever that provider returns into one
//! [`Reconnection`]. Persisting the new credential and swapping in the new
//! client stay with the caller.

pub mod config;

pub mod constants;

pub mod error;

pub mod application;

pub mod presentation;

pub mod session;

pub mod utils;

pub use application::models::account::{Account, IdentityProvider, LocalAccount, Session};
pub use application::models::credentials::Credentials;
pub use application::models::provider::{
    Ard, ArdHandle, EcoleDirecte, Handle, Izly, Local, LocalInstance, Multi, Pronote, Provider,
    Skolengo, Turboself,
};
pub use application::models::reconnected::{Reconnected, Reconnection};
pub use application::models::service::AccountService;
pub use application::services::reload_service::{ReloadDispatcher, ReloadService};
pub use error::{ReloadError, ReloadResult};
pub use session::registry::{AdapterRegistry, AdapterRegistryBuilder};
