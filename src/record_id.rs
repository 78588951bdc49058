//! Opaque identifiers for stored records.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// The identifier of a transaction or category.
///
/// Identifiers are opaque strings. New identifiers are derived from the
/// current time in milliseconds, see [RecordId::generate].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an existing identifier string.
    pub fn new(id: &str) -> Self {
        Self(id.to_owned())
    }

    /// Generate an identifier that `is_taken` reports as free.
    ///
    /// Starts from the current Unix time in milliseconds and counts upwards
    /// until a free value is found, so two records created within the same
    /// millisecond still get distinct identifiers.
    pub fn generate(is_taken: impl Fn(&RecordId) -> bool) -> Self {
        let now_millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        Self::generate_from(now_millis, is_taken)
    }

    fn generate_from(seed: i128, is_taken: impl Fn(&RecordId) -> bool) -> Self {
        let mut candidate = seed;

        loop {
            let id = Self(candidate.to_string());

            if !is_taken(&id) {
                return id;
            }

            candidate += 1;
        }
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::RecordId;

    #[test]
    fn generate_uses_seed_when_free() {
        let id = RecordId::generate_from(1_700_000_000_000, |_| false);

        assert_eq!(id.as_str(), "1700000000000");
    }

    #[test]
    fn generate_skips_taken_ids() {
        let taken: HashSet<RecordId> = ["100", "101", "102"]
            .into_iter()
            .map(RecordId::new)
            .collect();

        let id = RecordId::generate_from(100, |id| taken.contains(id));

        assert_eq!(id, RecordId::new("103"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = RecordId::new("1704844800000");

        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, "\"1704844800000\"");
    }
}
