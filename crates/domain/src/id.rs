//! ID generation utilities.

use uuid::Uuid;

/// Generates a random UUID v4 as a string.
///
/// Used to build identifiers that the registry cannot have assigned yet,
/// e.g. for the not-found check.
#[must_use]
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
