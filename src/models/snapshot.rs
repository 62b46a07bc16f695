use serde::{Deserialize, Serialize};

use super::drink::DrinkEvent;
use super::tracker::TrackerState;
use crate::sync::SyncError;

/// The wire representation of tracker state, exchanged with the remote
/// blob store as JSON: `{ "drinks": [...], "target": n, "updatedAt": ms }`.
///
/// Structurally identical to [`TrackerState`] but kept separate because it
/// crosses a serialization boundary with its own validation rule: a pulled
/// payload is only well-formed when `drinks` is present and array-typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    pub drinks: Vec<DrinkEvent>,
    pub target: u32,
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl SyncSnapshot {
    /// Captures the current tracker state for transport.
    pub fn from_state(state: &TrackerState) -> Self {
        Self {
            drinks: state.events.clone(),
            target: state.daily_target,
            updated_at: state.updated_at,
        }
    }

    /// Validates and decodes a pulled payload.
    ///
    /// Anything without an array-typed `drinks` field is rejected as
    /// malformed remote data rather than silently coerced.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SyncError> {
        match value.get("drinks") {
            Some(drinks) if drinks.is_array() => {}
            Some(_) => {
                return Err(SyncError::MalformedData(
                    "\"drinks\" is not an array".to_string(),
                ))
            }
            None => {
                return Err(SyncError::MalformedData(
                    "missing \"drinks\" field".to_string(),
                ))
            }
        }

        serde_json::from_value(value).map_err(|e| SyncError::MalformedData(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_state_copies_fields() {
        let mut state = TrackerState::default();
        state.append(DrinkEvent::at(100));
        state.append(DrinkEvent::at(200));

        let snapshot = SyncSnapshot::from_state(&state);
        assert_eq!(snapshot.drinks, state.events);
        assert_eq!(snapshot.target, state.daily_target);
        assert_eq!(snapshot.updated_at, state.updated_at);
    }

    #[test]
    fn test_wire_field_names() {
        let snapshot = SyncSnapshot {
            drinks: vec![DrinkEvent::at(1)],
            target: 8,
            updated_at: 99,
        };
        let json = serde_json::to_value(&snapshot).unwrap();

        assert!(json["drinks"].is_array());
        assert_eq!(json["target"], 8);
        assert_eq!(json["updatedAt"], 99);
    }

    #[test]
    fn test_from_value_accepts_well_formed_payload() {
        let value = json!({
            "drinks": [{"id": "7d4edc16-2a0a-4e9b-a97e-c8c1dbfc1dcd", "timestamp": 5, "amount": 1}],
            "target": 10,
            "updatedAt": 123,
        });
        let snapshot = SyncSnapshot::from_value(value).unwrap();
        assert_eq!(snapshot.drinks.len(), 1);
        assert_eq!(snapshot.target, 10);
        assert_eq!(snapshot.updated_at, 123);
    }

    #[test]
    fn test_from_value_rejects_missing_drinks() {
        let err = SyncSnapshot::from_value(json!({"target": 8, "updatedAt": 1})).unwrap_err();
        assert!(matches!(err, SyncError::MalformedData(_)));
    }

    #[test]
    fn test_from_value_rejects_non_array_drinks() {
        let err =
            SyncSnapshot::from_value(json!({"drinks": "nope", "target": 8, "updatedAt": 1}))
                .unwrap_err();
        assert!(matches!(err, SyncError::MalformedData(_)));
    }
}
