/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use crate::application::models::credentials::Credentials;
use crate::application::models::service::AccountService;
use crate::error::ReloadResult;
use crate::session::interface::{ArdClient, LiveClient};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Ties a service tag to the concrete payloads its accounts carry.
///
/// `Instance` is the live, process-local client and is never persisted.
/// `Authentication` is what survives a restart, so it must serialize.
pub trait Provider: Send + Sync + 'static {
    const SERVICE: AccountService;
    type Instance: Clone + Send + Sync + fmt::Debug + 'static;
    type Authentication: Serialize + DeserializeOwned + Clone + Send + Sync + fmt::Debug + 'static;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pronote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turboself;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Izly;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skolengo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcoleDirecte;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multi;

impl Provider for Pronote {
    const SERVICE: AccountService = AccountService::Pronote;
    type Instance = Handle<Pronote>;
    type Authentication = Credentials<Pronote>;
}

impl Provider for Local {
    const SERVICE: AccountService = AccountService::Local;
    type Instance = LocalInstance;
    type Authentication = bool;
}

impl Provider for Turboself {
    const SERVICE: AccountService = AccountService::Turboself;
    type Instance = Handle<Turboself>;
    type Authentication = Credentials<Turboself>;
}

impl Provider for Ard {
    const SERVICE: AccountService = AccountService::Ard;
    type Instance = ArdHandle;
    type Authentication = Credentials<Ard>;
}

impl Provider for Izly {
    const SERVICE: AccountService = AccountService::Izly;
    type Instance = Handle<Izly>;
    type Authentication = Credentials<Izly>;
}

impl Provider for Skolengo {
    const SERVICE: AccountService = AccountService::Skolengo;
    type Instance = Handle<Skolengo>;
    type Authentication = Credentials<Skolengo>;
}

impl Provider for EcoleDirecte {
    const SERVICE: AccountService = AccountService::EcoleDirecte;
    type Instance = Handle<EcoleDirecte>;
    type Authentication = Credentials<EcoleDirecte>;
}

impl Provider for Multi {
    const SERVICE: AccountService = AccountService::Multi;
    type Instance = Handle<Multi>;
    type Authentication = Credentials<Multi>;
}

/// Live client handle tagged with the provider that produced it.
///
/// Clones share the underlying client; adapters hand out a fresh client per
/// reload so two accounts never end up with the same one.
pub struct Handle<P> {
    client: Arc<dyn LiveClient>,
    _provider: PhantomData<fn() -> P>,
}

impl<P: Provider> Handle<P> {
    pub fn new<C: LiveClient + 'static>(client: C) -> Self {
        Self::from_arc(Arc::new(client))
    }

    pub fn from_arc(client: Arc<dyn LiveClient>) -> Self {
        Self {
            client,
            _provider: PhantomData,
        }
    }

    pub fn client(&self) -> &dyn LiveClient {
        self.client.as_ref()
    }

    /// Same underlying client, not just an equal one.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.client) as *const () == Arc::as_ptr(&other.client) as *const ()
    }
}

impl<P> Clone for Handle<P> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            _provider: PhantomData,
        }
    }
}

impl<P: Provider> fmt::Debug for Handle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("service", &P::SERVICE)
            .field("client", &self.client.describe())
            .finish()
    }
}

/// ARD live client. Unlike the other handles it is queried by the dispatcher
/// itself, for the balances it folds into the credential.
#[derive(Clone)]
pub struct ArdHandle {
    client: Arc<dyn ArdClient>,
}

impl ArdHandle {
    pub fn new<C: ArdClient + 'static>(client: C) -> Self {
        Self::from_arc(Arc::new(client))
    }

    pub fn from_arc(client: Arc<dyn ArdClient>) -> Self {
        Self { client }
    }

    pub async fn online_payments(&self) -> ReloadResult<Value> {
        self.client.online_payments().await
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.client) as *const () == Arc::as_ptr(&other.client) as *const ()
    }
}

impl fmt::Debug for ArdHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArdHandle").finish_non_exhaustive()
    }
}

/// What a local account exposes as its instance: the identity provider's raw
/// payload when there is one, otherwise a bare "ready" marker.
#[derive(Debug, Clone, PartialEq)]
pub enum LocalInstance {
    Identity(Value),
    Ready,
}

impl LocalInstance {
    /// JSON view of the instance; the marker shows up as `true`.
    pub fn to_value(&self) -> Value {
        match self {
            LocalInstance::Identity(raw) => raw.clone(),
            LocalInstance::Ready => Value::Bool(true),
        }
    }
}
