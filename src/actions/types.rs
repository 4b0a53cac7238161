//! Action message types.

use crate::error::{Result, StoreError};
use crate::types::{User, UserId};
use serde::{Deserialize, Serialize};

/// A request to mutate the user collection.
///
/// Serialized as `{"type": "ADD_USER", "payload": {...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Action {
    /// Append a user. The id must already be assigned.
    #[serde(rename = "ADD_USER")]
    Add(User),

    /// Replace the user with the same id. No-op if absent.
    #[serde(rename = "UPDATE_USER")]
    Update(User),

    /// Remove every user with this id. No-op if absent.
    #[serde(rename = "DELETE_USER")]
    Delete(UserId),
}

impl Action {
    pub fn add(user: User) -> Self {
        Action::Add(user)
    }

    pub fn update(user: User) -> Self {
        Action::Update(user)
    }

    pub fn delete(id: impl Into<UserId>) -> Self {
        Action::Delete(id.into())
    }

    /// Wire name of the action kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Add(_) => "ADD_USER",
            Action::Update(_) => "UPDATE_USER",
            Action::Delete(_) => "DELETE_USER",
        }
    }

    /// Id the action targets.
    pub fn target(&self) -> &UserId {
        match self {
            Action::Add(user) | Action::Update(user) => &user.id,
            Action::Delete(id) => id,
        }
    }

    /// Decode a raw action. Unknown kinds and malformed payloads are rejected.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| StoreError::InvalidAction(e.to_string()))
    }

    /// Decode a raw action that has already been parsed into a JSON value.
    pub fn from_value(raw: serde_json::Value) -> Result<Self> {
        serde_json::from_value(raw).map_err(|e| StoreError::InvalidAction(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let action = Action::add(User::new("1", "Ann", "a@x.com"));
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({"type": "ADD_USER", "payload": {"id": "1", "name": "Ann", "email": "a@x.com"}})
        );

        let delete = serde_json::to_value(Action::delete("1")).unwrap();
        assert_eq!(delete, json!({"type": "DELETE_USER", "payload": "1"}));
    }

    #[test]
    fn test_decode_known_kinds() {
        let action =
            Action::from_json(r#"{"type":"UPDATE_USER","payload":{"id":"7","name":"B","email":"b@x"}}"#)
                .unwrap();
        assert_eq!(action, Action::update(User::new("7", "B", "b@x")));
        assert_eq!(action.kind(), "UPDATE_USER");
        assert_eq!(action.target().as_str(), "7");
    }

    #[test]
    fn test_decode_unknown_kind() {
        let result = Action::from_json(r#"{"type":"RENAME_USER","payload":"1"}"#);
        assert!(matches!(result, Err(StoreError::InvalidAction(_))));
    }

    #[test]
    fn test_decode_malformed_payload() {
        let result = Action::from_value(json!({"type": "ADD_USER", "payload": {"id": "1"}}));
        assert!(matches!(result, Err(StoreError::InvalidAction(_))));

        let result = Action::from_value(json!({"payload": "1"}));
        assert!(matches!(result, Err(StoreError::InvalidAction(_))));
    }
}
