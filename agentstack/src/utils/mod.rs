//! Identifier generation.

use uuid::Uuid;

/// Generates a new request id (UUID v4, hyphenated).
#[must_use]
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}
