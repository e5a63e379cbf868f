//! Storage form for the list-valued user columns.
//!
//! Lists are persisted as a single text column joined with [`DELIMITER`].
//! There is no escaping: values that contain the delimiter are rejected by
//! [`check_value`] before they reach the repository.

use crate::errors::DomainError;
use tracing::warn;

pub const DELIMITER: &str = ", ";

pub fn encode<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<_>>()
        .join(DELIMITER)
}

/// Like [`encode`] but maps an empty list to `None` for nullable columns.
pub fn encode_optional<S: AsRef<str>>(values: &[S]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(encode(values))
    }
}

pub fn decode(stored: Option<&str>) -> Vec<String> {
    match stored {
        Some(s) if !s.is_empty() => s.split(DELIMITER).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

pub fn encode_ids(ids: &[i32]) -> String {
    let values: Vec<String> = ids.iter().map(i32::to_string).collect();
    encode(&values)
}

pub fn decode_ids(stored: Option<&str>) -> Vec<i32> {
    decode(stored)
        .into_iter()
        .filter_map(|raw| match raw.trim().parse::<i32>() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Skipping non-numeric list entry '{}'", raw);
                None
            }
        })
        .collect()
}

pub fn check_value(value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "List entries cannot be empty".to_string(),
        ));
    }

    if value.contains(DELIMITER) {
        return Err(DomainError::ValidationError(format!(
            "List entry '{}' may not contain '{}'",
            value, DELIMITER
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_of_missing_or_empty_column_is_empty() {
        assert!(decode(None).is_empty());
        assert!(decode(Some("")).is_empty());
        assert!(decode_ids(None).is_empty());
    }

    #[test]
    fn strings_keep_their_order() {
        let stored = encode(&["1", "2", "3"]);
        assert_eq!(stored, "1, 2, 3");
        assert_eq!(decode(Some(&stored)), vec!["1", "2", "3"]);
    }

    #[test]
    fn single_entry_has_no_delimiter() {
        assert_eq!(encode(&["Kana Hanazawa"]), "Kana Hanazawa");
        assert_eq!(decode(Some("Kana Hanazawa")), vec!["Kana Hanazawa"]);
    }

    #[test]
    fn empty_list_is_stored_as_null() {
        let empty: [&str; 0] = [];
        assert_eq!(encode_optional(&empty), None);
        assert_eq!(encode_optional(&["9"]), Some("9".to_string()));
    }

    #[test]
    fn genre_ids_skip_garbage() {
        assert_eq!(encode_ids(&[1, 4]), "1, 4");
        assert_eq!(decode_ids(Some("1, Action, 4")), vec![1, 4]);
    }

    #[test]
    fn delimiter_inside_a_value_is_rejected() {
        assert!(check_value("Miyuki Sawashiro").is_ok());
        assert!(check_value("Sawashiro,Miyuki").is_ok());
        assert!(check_value("Sawashiro, Miyuki").is_err());
        assert!(check_value("  ").is_err());
    }
}
