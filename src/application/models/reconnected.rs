/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use serde_json::Value;

use super::provider::{
    Ard, EcoleDirecte, Izly, Local, Multi, Pronote, Provider, Skolengo, Turboself,
};
use super::service::AccountService;
use crate::error::ReloadResult;
use crate::presentation::serialization::Serializer;

/// Result of a reload for provider `P`: the live client to swap in and the
/// credential to persist.
#[derive(Debug, Clone)]
pub struct Reconnected<P: Provider> {
    pub instance: Option<P::Instance>,
    pub authentication: P::Authentication,
}

impl<P: Provider> Reconnected<P> {
    pub fn new(instance: P::Instance, authentication: P::Authentication) -> Self {
        Self {
            instance: Some(instance),
            authentication,
        }
    }
}

/// Uniform output of [`crate::application::services::reload_service::ReloadService::reload`].
#[derive(Debug, Clone)]
pub enum Reconnection {
    Pronote(Reconnected<Pronote>),
    Local(Reconnected<Local>),
    Turboself(Reconnected<Turboself>),
    Ard(Reconnected<Ard>),
    Izly(Reconnected<Izly>),
    Skolengo(Reconnected<Skolengo>),
    EcoleDirecte(Reconnected<EcoleDirecte>),
    Multi(Reconnected<Multi>),
    /// Neither an instance nor a credential.
    Unrecognized,
}

impl Reconnection {
    pub fn service(&self) -> AccountService {
        match self {
            Reconnection::Pronote(_) => AccountService::Pronote,
            Reconnection::Local(_) => AccountService::Local,
            Reconnection::Turboself(_) => AccountService::Turboself,
            Reconnection::Ard(_) => AccountService::Ard,
            Reconnection::Izly(_) => AccountService::Izly,
            Reconnection::Skolengo(_) => AccountService::Skolengo,
            Reconnection::EcoleDirecte(_) => AccountService::EcoleDirecte,
            Reconnection::Multi(_) => AccountService::Multi,
            Reconnection::Unrecognized => AccountService::Unrecognized,
        }
    }

    pub fn has_instance(&self) -> bool {
        match self {
            Reconnection::Pronote(r) => r.instance.is_some(),
            Reconnection::Local(r) => r.instance.is_some(),
            Reconnection::Turboself(r) => r.instance.is_some(),
            Reconnection::Ard(r) => r.instance.is_some(),
            Reconnection::Izly(r) => r.instance.is_some(),
            Reconnection::Skolengo(r) => r.instance.is_some(),
            Reconnection::EcoleDirecte(r) => r.instance.is_some(),
            Reconnection::Multi(r) => r.instance.is_some(),
            Reconnection::Unrecognized => false,
        }
    }

    /// The credential in the form callers persist. `None` for an
    /// unrecognized service, which has nothing to store.
    pub fn authentication_json(&self) -> ReloadResult<Option<Value>> {
        let value = match self {
            Reconnection::Pronote(r) => Serializer::to_value(&r.authentication)?,
            Reconnection::Local(r) => Serializer::to_value(&r.authentication)?,
            Reconnection::Turboself(r) => Serializer::to_value(&r.authentication)?,
            Reconnection::Ard(r) => Serializer::to_value(&r.authentication)?,
            Reconnection::Izly(r) => Serializer::to_value(&r.authentication)?,
            Reconnection::Skolengo(r) => Serializer::to_value(&r.authentication)?,
            Reconnection::EcoleDirecte(r) => Serializer::to_value(&r.authentication)?,
            Reconnection::Multi(r) => Serializer::to_value(&r.authentication)?,
            Reconnection::Unrecognized => return Ok(None),
        };
        Ok(Some(value))
    }
}
