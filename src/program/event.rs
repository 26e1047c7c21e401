use crate::error::ProgramConversionError;
use crate::value::Value;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// The flat record of attributes a program is tested against.
///
/// There is no schema: an attribute the program asks for but the event does
/// not carry is simply absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventData {
    attributes: AHashMap<String, Value>,
}

impl EventData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an event record (`{ "value": 150, "location": "web" }`).
    pub fn from_json(json: &str) -> Result<Self, ProgramConversionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for EventData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
