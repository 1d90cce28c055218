/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::provider::{Ard, EcoleDirecte, Izly, Multi, Pronote, Provider, Skolengo, Turboself};
use super::reconnected::{Reconnected, Reconnection};
use super::service::AccountService;
use crate::error::{ReloadError, ReloadResult};

/// The two mutable halves of a remote account: its live client, if one has
/// been built in this process, and its stored credential.
#[derive(Debug, Clone)]
pub struct Session<P: Provider> {
    pub instance: Option<P::Instance>,
    pub authentication: P::Authentication,
}

impl<P: Provider> Session<P> {
    /// Session restored from storage, before any client exists.
    pub fn new(authentication: P::Authentication) -> Self {
        Self {
            instance: None,
            authentication,
        }
    }

    pub fn with_instance(mut self, instance: P::Instance) -> Self {
        self.instance = Some(instance);
        self
    }

    fn replace(&mut self, reconnected: Reconnected<P>) {
        self.instance = reconnected.instance;
        self.authentication = reconnected.authentication;
    }
}

/// Identity attached to a local account by whoever created it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityProvider {
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub raw_data: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalAccount {
    pub identity_provider: Option<IdentityProvider>,
}

impl LocalAccount {
    pub fn with_raw_data(raw_data: Option<Value>) -> Self {
        Self {
            identity_provider: Some(IdentityProvider {
                raw_data,
                ..IdentityProvider::default()
            }),
        }
    }

    pub fn raw_data(&self) -> Option<&Value> {
        self.identity_provider
            .as_ref()
            .and_then(|identity| identity.raw_data.as_ref())
    }
}

/// An account bound to one provider. The variant fixes which adapter reloads
/// it and which payload types its session carries.
#[derive(Debug, Clone)]
pub enum Account {
    Pronote(Session<Pronote>),
    Local(LocalAccount),
    Turboself(Session<Turboself>),
    Ard(Session<Ard>),
    Izly(Session<Izly>),
    Skolengo(Session<Skolengo>),
    EcoleDirecte(Session<EcoleDirecte>),
    Multi(Session<Multi>),
    /// Tag this build does not know; the raw tag is kept for diagnostics.
    Unrecognized { service: String },
}

impl Account {
    pub fn service(&self) -> AccountService {
        match self {
            Account::Pronote(_) => AccountService::Pronote,
            Account::Local(_) => AccountService::Local,
            Account::Turboself(_) => AccountService::Turboself,
            Account::Ard(_) => AccountService::Ard,
            Account::Izly(_) => AccountService::Izly,
            Account::Skolengo(_) => AccountService::Skolengo,
            Account::EcoleDirecte(_) => AccountService::EcoleDirecte,
            Account::Multi(_) => AccountService::Multi,
            Account::Unrecognized { .. } => AccountService::Unrecognized,
        }
    }

    /// Swaps in the client and credential of a successful reload.
    ///
    /// The old instance is dropped. Local accounts keep no session state, and
    /// the empty result of an unrecognized reload leaves any account as is.
    pub fn apply(&mut self, reconnection: Reconnection) -> ReloadResult<()> {
        match (self, reconnection) {
            (_, Reconnection::Unrecognized) | (Account::Local(_), Reconnection::Local(_)) => {}
            (Account::Pronote(session), Reconnection::Pronote(r)) => session.replace(r),
            (Account::Turboself(session), Reconnection::Turboself(r)) => session.replace(r),
            (Account::Ard(session), Reconnection::Ard(r)) => session.replace(r),
            (Account::Izly(session), Reconnection::Izly(r)) => session.replace(r),
            (Account::Skolengo(session), Reconnection::Skolengo(r)) => session.replace(r),
            (Account::EcoleDirecte(session), Reconnection::EcoleDirecte(r)) => session.replace(r),
            (Account::Multi(session), Reconnection::Multi(r)) => session.replace(r),
            (account, other) => {
                return Err(ReloadError::ServiceMismatch {
                    expected: account.service(),
                    found: other.service(),
                })
            }
        }
        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Account::Unrecognized { service } => {
                write!(f, "{{\"service\":\"{}\",\"recognized\":false}}", service)
            }
            account => write!(f, "{{\"service\":\"{}\",\"recognized\":true}}", account.service()),
        }
    }
}
