//! Helpers for the Json columns that hold ordered lists.
//!
//! Tag sequences, gallery urls, feature records and select options are
//! all stored as Json arrays; these keep the (de)serialization in one
//! place so editors work with plain vectors.

use sea_orm::entity::prelude::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serializes any list into a Json column value.
pub fn to_json<T: Serialize>(items: &[T]) -> Json {
    serde_json::to_value(items).unwrap_or_default()
}

/// Reads a Json column back into a list of strings, skipping anything
/// that is not a string.
pub fn strings(value: Option<&Json>) -> Vec<String> {
    value
        .and_then(Json::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

/// Reads a Json column back into typed records; a missing or malformed
/// column yields an empty list rather than an error.
pub fn records<T: DeserializeOwned>(value: Option<&Json>) -> Vec<T> {
    value
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_list_round_trip() {
        let tags = vec!["renovatie".to_owned(), "isolatie".to_owned()];
        let json = to_json(&tags);
        assert_eq!(strings(Some(&json)), tags);
    }

    #[test]
    fn test_missing_column_is_empty() {
        assert!(strings(None).is_empty());
        assert!(records::<String>(None).is_empty());
    }

    #[test]
    fn test_non_array_column_is_empty() {
        let json = Json::String("niet een lijst".to_owned());
        assert!(strings(Some(&json)).is_empty());
    }
}
