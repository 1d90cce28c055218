/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
//! Contracts provider adapters fulfil. Each provider speaks its own protocol;
//! these traits only fix the shape of what the dispatcher gets back.

use crate::application::models::account::Session;
use crate::application::models::provider::Provider;
use crate::application::models::reconnected::Reconnected;
use crate::error::ReloadResult;
use async_trait::async_trait;
use serde_json::Value;

/// A live, authenticated provider client.
pub trait LiveClient: Send + Sync {
    /// Short label used in logs and `Debug` output.
    fn describe(&self) -> String {
        "live client".to_string()
    }
}

/// ARD client, which also exposes the account's online payment balances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArdClient: Send + Sync {
    async fn online_payments(&self) -> ReloadResult<Value>;
}

/// Rebuilds client and credential from the stored credential alone
/// (Pronote, Multi).
#[async_trait]
pub trait InstanceReloader<P: Provider>: Send + Sync {
    async fn reload_instance(
        &self,
        authentication: &P::Authentication,
    ) -> ReloadResult<Reconnected<P>>;
}

/// Refreshes the credential only (Turboself).
#[async_trait]
pub trait AuthenticationReloader<P: Provider>: Send + Sync {
    async fn reload(&self, account: &Session<P>) -> ReloadResult<P::Authentication>;
}

/// Builds a new client only (ARD, Izly).
#[async_trait]
pub trait ClientReloader<P: Provider>: Send + Sync {
    async fn reload(&self, account: &Session<P>) -> ReloadResult<P::Instance>;
}

/// Returns both a new client and a refreshed credential (Skolengo,
/// EcoleDirecte).
#[async_trait]
pub trait SessionReloader<P: Provider>: Send + Sync {
    async fn reload(&self, account: &Session<P>) -> ReloadResult<Reconnected<P>>;
}
