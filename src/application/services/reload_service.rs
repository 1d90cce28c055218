/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use async_trait::async_trait;
use futures_util::future::join_all;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    application::models::{
        account::{Account, LocalAccount},
        provider::{Local, LocalInstance},
        reconnected::{Reconnected, Reconnection},
    },
    constants::BALANCES_FIELD,
    error::ReloadResult,
    session::registry::AdapterRegistry,
};

/// Revives the session of a stale account.
#[async_trait]
pub trait ReloadService: Send + Sync {
    /// Reloads `account` through its provider and returns the client and
    /// credential to swap in. The account itself is left untouched.
    ///
    /// Adapter errors are returned unchanged. An unrecognized service never
    /// fails: it yields [`Reconnection::Unrecognized`].
    async fn reload(&self, account: &Account) -> ReloadResult<Reconnection>;
}

/// Stateless router from an account's service to its provider adapter.
///
/// Concurrent reloads of different accounts are independent. Reloads of the
/// same account are not deduplicated; callers that need a single reload in
/// flight per account have to serialise them.
#[derive(Debug, Default)]
pub struct ReloadDispatcher {
    adapters: AdapterRegistry,
}

impl ReloadDispatcher {
    pub fn new(adapters: AdapterRegistry) -> Self {
        Self { adapters }
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    /// Reloads every account concurrently. Results are in input order and
    /// one failure does not affect the others.
    pub async fn reload_all(&self, accounts: &[Account]) -> Vec<ReloadResult<Reconnection>> {
        debug!("Reloading {} accounts", accounts.len());
        join_all(accounts.iter().map(|account| self.reload(account))).await
    }
}

#[async_trait]
impl ReloadService for ReloadDispatcher {
    #[instrument(skip_all, fields(service = %account.service()))]
    async fn reload(&self, account: &Account) -> ReloadResult<Reconnection> {
        match account {
            Account::Pronote(session) => {
                let adapter = self.adapters.pronote.resolve().await?;
                let reconnected = adapter.reload_instance(&session.authentication).await?;
                Ok(Reconnection::Pronote(reconnected))
            }
            Account::Local(local) => Ok(Reconnection::Local(reconnect_local(local))),
            Account::Turboself(session) => {
                let adapter = self.adapters.turboself.resolve().await?;
                let authentication = adapter.reload(session).await?;
                // only the credential is refreshed, the current client stays
                Ok(Reconnection::Turboself(Reconnected {
                    instance: session.instance.clone(),
                    authentication,
                }))
            }
            Account::Ard(session) => {
                let adapter = self.adapters.ard.resolve().await?;
                let instance = adapter.reload(session).await?;
                let balances = instance.online_payments().await?;
                let authentication = session.authentication.with_field(BALANCES_FIELD, balances);
                Ok(Reconnection::Ard(Reconnected::new(instance, authentication)))
            }
            Account::Izly(session) => {
                let adapter = self.adapters.izly.resolve().await?;
                let instance = adapter.reload(session).await?;
                Ok(Reconnection::Izly(Reconnected::new(
                    instance,
                    session.authentication.clone(),
                )))
            }
            Account::Skolengo(session) => {
                let adapter = self.adapters.skolengo.resolve().await?;
                Ok(Reconnection::Skolengo(adapter.reload(session).await?))
            }
            Account::EcoleDirecte(session) => {
                let adapter = self.adapters.ecole_directe.resolve().await?;
                Ok(Reconnection::EcoleDirecte(adapter.reload(session).await?))
            }
            Account::Multi(session) => {
                let adapter = self.adapters.multi.resolve().await?;
                let reconnected = adapter.reload_instance(&session.authentication).await?;
                Ok(Reconnection::Multi(reconnected))
            }
            Account::Unrecognized { service } => {
                warn!("Service not implemented: {}", service);
                Ok(Reconnection::Unrecognized)
            }
        }
    }
}

fn reconnect_local(account: &LocalAccount) -> Reconnected<Local> {
    let instance = match account.raw_data() {
        Some(raw) if is_present(raw) => LocalInstance::Identity(raw.clone()),
        _ => LocalInstance::Ready,
    };
    Reconnected::new(instance, true)
}

/// Empty-ish payloads (`null`, `false`, `0`, `""`) count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
