use crate::application::models::account::Session;
use crate::application::models::provider::Provider;
use crate::error::ReloadResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// JSON helpers for the persisted half of an account.
pub struct Serializer;

impl Serializer {
    pub fn to_value<T: Serialize>(value: &T) -> ReloadResult<Value> {
        Ok(serde_json::to_value(value)?)
    }

    pub fn to_json<T: Serialize>(value: &T) -> ReloadResult<String> {
        Ok(serde_json::to_string(value)?)
    }

    pub fn to_json_pretty<T: Serialize>(value: &T) -> ReloadResult<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    pub fn from_json<T: DeserializeOwned>(json: &str) -> ReloadResult<T> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuilds a session from a persisted credential. The instance is never
    /// stored, so the session starts without one.
    pub fn restore_session<P: Provider>(json: &str) -> ReloadResult<Session<P>> {
        let authentication: P::Authentication = Self::from_json(json)?;
        Ok(Session::new(authentication))
    }
}
