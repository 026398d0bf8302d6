//! Monkey registry payloads.
//!
//! `MonkeyDraft` is what the runner submits; the remaining types are the
//! typed response contracts each endpoint is checked against. Contracts only
//! require the fields a check actually inspects, so extra or missing optional
//! fields never cause a spurious shape mismatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// A monkey record as submitted to `POST /monkeys`, `PUT /monkeys/{id}`
/// and `POST /generate-description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonkeyDraft {
    /// Display name.
    pub name: String,
    /// Species, e.g. "Capuchin".
    pub species: String,
    /// Age in whole years.
    pub age_years: i64,
    /// Favourite fruit.
    pub favourite_fruit: String,
    /// Date of the last veterinary checkup (`YYYY-MM-DD`).
    pub last_checkup_at: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MonkeyDraft {
    /// The fully-populated record used by the create and generate cases.
    #[must_use]
    pub fn charlie() -> Self {
        Self {
            name: "Charlie".to_string(),
            species: "Capuchin".to_string(),
            age_years: 5,
            favourite_fruit: "Banana".to_string(),
            last_checkup_at: "2024-01-15".to_string(),
            description: None,
        }
    }

    /// The modified record used by the update case.
    #[must_use]
    pub fn charlie_updated() -> Self {
        Self {
            name: "Charlie Updated".to_string(),
            species: "Capuchin".to_string(),
            age_years: 6,
            favourite_fruit: "Mango".to_string(),
            last_checkup_at: "2024-02-15".to_string(),
            description: Some("Updated test monkey".to_string()),
        }
    }

    /// A record every field of which the registry must reject.
    #[must_use]
    pub fn invalid() -> Self {
        Self {
            name: String::new(),
            species: String::new(),
            age_years: -1,
            favourite_fruit: String::new(),
            last_checkup_at: String::new(),
            description: None,
        }
    }

    /// Encodes the draft as a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if encoding fails.
    pub fn to_body(&self) -> DomainResult<Value> {
        serde_json::to_value(self).map_err(|e| DomainError::InvalidBody(e.to_string()))
    }
}

/// `GET /` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiInfo {
    /// Banner naming the service.
    pub message: String,
}

/// Identifier rendered for use in a path.
///
/// Registries assign either string or numeric ids; anything else has no
/// usable text form.
#[must_use]
pub fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn display_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => "None".to_string(),
    }
}

/// `POST /monkeys` response.
///
/// `monkey_id` must be present, in any form; the echoed name must match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedMonkey {
    /// Registry-assigned identifier.
    pub monkey_id: Value,
    /// Echoed name.
    #[serde(default)]
    pub name: Option<Value>,
}

impl CreatedMonkey {
    /// Returns true if the echoed name is the submitted one.
    #[must_use]
    pub fn echoes(&self, draft: &MonkeyDraft) -> bool {
        self.name.as_ref().and_then(Value::as_str) == Some(draft.name.as_str())
    }

    /// The assigned id as path text, if it has one.
    #[must_use]
    pub fn id_text(&self) -> Option<String> {
        id_text(&self.monkey_id)
    }

    /// The assigned id as it should appear in messages.
    #[must_use]
    pub fn id_display(&self) -> String {
        display_field(Some(&self.monkey_id))
    }
}

/// `GET /monkeys/{id}` response. Only the id is checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchedMonkey {
    /// Identifier, if echoed.
    #[serde(default)]
    pub monkey_id: Option<Value>,
    /// Name, if echoed.
    #[serde(default)]
    pub name: Option<Value>,
}

impl FetchedMonkey {
    /// Returns true if the response carries `monkey_id`.
    #[must_use]
    pub fn has_id(&self, monkey_id: &str) -> bool {
        self.monkey_id.as_ref().and_then(id_text).as_deref() == Some(monkey_id)
    }

    /// Name for messages; `None` when absent.
    #[must_use]
    pub fn name_display(&self) -> String {
        display_field(self.name.as_ref())
    }
}

/// `PUT /monkeys/{id}` response. Name and age are checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdatedMonkey {
    /// Echoed name.
    #[serde(default)]
    pub name: Option<Value>,
    /// Echoed age, integral or not.
    #[serde(default)]
    pub age_years: Option<Value>,
}

impl UpdatedMonkey {
    /// Returns true if name and age match the submitted draft.
    ///
    /// Ages compare numerically, so `6.0` matches `6`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn matches(&self, draft: &MonkeyDraft) -> bool {
        let name_matches = self.name.as_ref().and_then(Value::as_str) == Some(draft.name.as_str());
        let age_matches = self.age_years.as_ref().is_some_and(|age| match age.as_i64() {
            Some(years) => years == draft.age_years,
            None => age
                .as_f64()
                .is_some_and(|years| (years - draft.age_years as f64).abs() < f64::EPSILON),
        });
        name_matches && age_matches
    }

    /// Name for messages; `None` when absent.
    #[must_use]
    pub fn name_display(&self) -> String {
        display_field(self.name.as_ref())
    }
}

/// Minimal view of a list element: only the identifier is inspected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MonkeyRef {
    /// Registry-assigned identifier, if the element carries one.
    #[serde(default)]
    pub monkey_id: Option<Value>,
}

/// Returns true if any element of a list response has the given id.
#[must_use]
pub fn contains_monkey(list: &[MonkeyRef], monkey_id: &str) -> bool {
    list.iter()
        .any(|m| m.monkey_id.as_ref().and_then(id_text).as_deref() == Some(monkey_id))
}

/// `POST /generate-description` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneratedDescription {
    /// Generated prose.
    pub description: String,
    /// Generation timestamp.
    pub generated_at: String,
    /// Echoed species.
    #[serde(default)]
    pub species: Option<String>,
    /// Echoed name.
    #[serde(default)]
    pub monkey_name: Option<String>,
}

impl GeneratedDescription {
    /// Length of the description in characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.description.chars().count()
    }
}

/// 400 response listing validation failures.
///
/// The registry reports `errors` as an object keyed by field; a plain array
/// of messages is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidationErrors {
    /// Field errors.
    pub errors: Value,
}

impl ValidationErrors {
    /// Number of reported errors.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.errors {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            Value::Null => 0,
            _ => 1,
        }
    }

    /// Returns true if no errors were reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Error body returned with 404 and other failures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// Error text.
    pub error: String,
}

/// `DELETE /monkeys/{id}` response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteAck {
    /// Confirmation text.
    pub message: String,
}
