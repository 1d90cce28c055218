use account_reload::session::interface::{
    ArdClient, AuthenticationReloader, ClientReloader, InstanceReloader, LiveClient,
    SessionReloader,
};
use account_reload::{
    Ard, ArdHandle, Credentials, EcoleDirecte, Handle, Izly, Multi, Pronote, Provider,
    Reconnected, ReloadError, ReloadResult, Session, Skolengo, Turboself,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
pub struct FakeClient {
    pub label: String,
}

impl FakeClient {
    pub fn labelled(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

impl LiveClient for FakeClient {
    fn describe(&self) -> String {
        self.label.clone()
    }
}

pub fn credentials<P: Provider>(value: Value) -> Credentials<P> {
    Credentials::from_value(value).unwrap()
}

/// Pronote and Multi: hands back a preset pair, or a preset error.
pub struct FixedInstanceReloader<P: Provider> {
    pub result: fn() -> ReloadResult<Reconnected<P>>,
}

#[async_trait]
impl<P: Provider> InstanceReloader<P> for FixedInstanceReloader<P> {
    async fn reload_instance(
        &self,
        _authentication: &P::Authentication,
    ) -> ReloadResult<Reconnected<P>> {
        (self.result)()
    }
}

/// Turboself: refreshes the token and never touches the client.
pub struct TurboselfReloader;

#[async_trait]
impl AuthenticationReloader<Turboself> for TurboselfReloader {
    async fn reload(&self, account: &Session<Turboself>) -> ReloadResult<Credentials<Turboself>> {
        Ok(account
            .authentication
            .with_field("session", json!({"token": "refreshed"})))
    }
}

pub struct FailingTurboselfReloader;

#[async_trait]
impl AuthenticationReloader<Turboself> for FailingTurboselfReloader {
    async fn reload(&self, _account: &Session<Turboself>) -> ReloadResult<Credentials<Turboself>> {
        Err(ReloadError::BadCredentials)
    }
}

pub struct IzlyReloader {
    pub client: Arc<FakeClient>,
}

#[async_trait]
impl ClientReloader<Izly> for IzlyReloader {
    async fn reload(&self, _account: &Session<Izly>) -> ReloadResult<Handle<Izly>> {
        Ok(Handle::from_arc(self.client.clone()))
    }
}

#[derive(Debug)]
pub struct FakeArdClient {
    pub balances: Option<Value>,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ArdClient for FakeArdClient {
    async fn online_payments(&self) -> ReloadResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.balances
            .clone()
            .ok_or_else(|| ReloadError::provider(account_reload::AccountService::Ard, "payments unavailable"))
    }
}

pub struct ArdReloader {
    pub balances: Option<Value>,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait]
impl ClientReloader<Ard> for ArdReloader {
    async fn reload(&self, _account: &Session<Ard>) -> ReloadResult<ArdHandle> {
        Ok(ArdHandle::new(FakeArdClient {
            balances: self.balances.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

/// Skolengo and EcoleDirecte: returns a new client and a credential with a
/// bumped `generation` field.
pub struct BumpingSessionReloader;

async fn bump<P: Provider<Instance = Handle<P>, Authentication = Credentials<P>>>(
    account: &Session<P>,
) -> ReloadResult<Reconnected<P>> {
    let generation = account
        .authentication
        .get("generation")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    Ok(Reconnected::new(
        Handle::new(FakeClient::labelled("fresh")),
        account
            .authentication
            .with_field("generation", json!(generation + 1)),
    ))
}

#[async_trait]
impl SessionReloader<Skolengo> for BumpingSessionReloader {
    async fn reload(&self, account: &Session<Skolengo>) -> ReloadResult<Reconnected<Skolengo>> {
        bump(account).await
    }
}

#[async_trait]
impl SessionReloader<EcoleDirecte> for BumpingSessionReloader {
    async fn reload(
        &self,
        account: &Session<EcoleDirecte>,
    ) -> ReloadResult<Reconnected<EcoleDirecte>> {
        bump(account).await
    }
}

pub fn pronote_pair() -> ReloadResult<Reconnected<Pronote>> {
    Ok(Reconnected::new(
        Handle::new(FakeClient::labelled("pronote")),
        credentials(json!({"url": "https://demo.index-education.net", "token": "next"})),
    ))
}

pub fn multi_pair() -> ReloadResult<Reconnected<Multi>> {
    Ok(Reconnected::new(
        Handle::new(FakeClient::labelled("multi")),
        credentials(json!({"refreshAuthToken": "r2"})),
    ))
}

pub fn pronote_expired() -> ReloadResult<Reconnected<Pronote>> {
    Err(ReloadError::SessionExpired)
}
