/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider an account is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountService {
    Pronote,
    Local,
    Turboself,
    Ard,
    Izly,
    Skolengo,
    EcoleDirecte,
    Multi,
    #[serde(other)]
    Unrecognized,
}

impl AccountService {
    /// Every service the dispatcher knows how to reload.
    pub const ALL: [AccountService; 8] = [
        AccountService::Pronote,
        AccountService::Local,
        AccountService::Turboself,
        AccountService::Ard,
        AccountService::Izly,
        AccountService::Skolengo,
        AccountService::EcoleDirecte,
        AccountService::Multi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountService::Pronote => "pronote",
            AccountService::Local => "local",
            AccountService::Turboself => "turboself",
            AccountService::Ard => "ard",
            AccountService::Izly => "izly",
            AccountService::Skolengo => "skolengo",
            AccountService::EcoleDirecte => "ecoledirecte",
            AccountService::Multi => "multi",
            AccountService::Unrecognized => "unrecognized",
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, AccountService::Unrecognized)
    }

    /// Local accounts have no remote session and unrecognized ones are never
    /// dispatched, so neither needs an adapter.
    pub fn requires_adapter(&self) -> bool {
        !matches!(self, AccountService::Local | AccountService::Unrecognized)
    }
}

impl fmt::Display for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountService {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        Ok(AccountService::ALL
            .into_iter()
            .find(|service| service.as_str() == tag)
            .unwrap_or(AccountService::Unrecognized))
    }
}
