/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/
use crate::application::models::provider::Provider;
use crate::error::{ReloadError, ReloadResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// Stored authentication material for one provider.
///
/// The content is opaque to this crate; only the adapter of provider `P`
/// knows what the fields mean. The type parameter keeps one provider's blob
/// from being handed to another provider's adapter.
pub struct Credentials<P> {
    fields: Map<String, Value>,
    _provider: PhantomData<fn() -> P>,
}

impl<P: Provider> Credentials<P> {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            _provider: PhantomData,
        }
    }

    /// Wraps a JSON value, which must be an object.
    pub fn from_value(value: Value) -> ReloadResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(ReloadError::InvalidCredentials(format!(
                "{} credentials must be a JSON object, got {}",
                P::SERVICE,
                other
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy of these credentials with `key` set to `value`. Every other field
    /// is kept as is; an existing `key` is overwritten.
    pub fn with_field(&self, key: &str, value: Value) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(key.to_string(), value);
        Self::new(fields)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl<P> Clone for Credentials<P> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            _provider: PhantomData,
        }
    }
}

impl<P> PartialEq for Credentials<P> {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl<P: Provider> fmt::Debug for Credentials<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // values may hold tokens and passwords
        let keys: Vec<&String> = self.fields.keys().collect();
        f.debug_struct("Credentials")
            .field("service", &P::SERVICE)
            .field("fields", &keys)
            .finish()
    }
}

impl<P> Serialize for Credentials<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de, P> Deserialize<'de> for Credentials<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::deserialize(deserializer)?;
        Ok(Self {
            fields,
            _provider: PhantomData,
        })
    }
}
