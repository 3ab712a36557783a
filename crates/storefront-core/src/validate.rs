//! Required-field validation.

use indexmap::IndexMap;

/// Field name → human-readable problem. Empty means valid.
pub type ErrorMap = IndexMap<String, String>;

/// Report every field whose value is empty once surrounding whitespace
/// is trimmed, as `"<field> is required"`.
///
/// Non-blank fields are omitted. Result order follows input order.
pub fn validate_fields<I, K, V>(fields: I) -> ErrorMap
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    fields
        .into_iter()
        .filter(|(_, value)| value.as_ref().trim().is_empty())
        .map(|(key, _)| {
            let key = key.as_ref();
            (key.to_owned(), format!("{key} is required"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_fields_produce_no_errors() {
        let errors = validate_fields([("name", "John Doe"), ("email", "john@example.com")]);
        assert!(errors.is_empty());
    }

    #[test]
    fn empty_and_blank_fields_are_required() {
        let errors = validate_fields([("name", "  "), ("email", "")]);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["name"], "name is required");
        assert_eq!(errors["email"], "email is required");
    }

    #[test]
    fn mixed_fields_report_only_blank_ones() {
        let errors = validate_fields([("name", "John Doe"), ("email", ""), ("phone", "\t \n")]);
        let keys: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(keys, ["email", "phone"]);
        assert!(!errors.contains_key("name"));
    }

    #[test]
    fn no_fields_means_no_errors() {
        let errors = validate_fields(Vec::<(String, String)>::new());
        assert!(errors.is_empty());
    }

    #[test]
    fn surrounding_whitespace_does_not_hide_content() {
        let errors = validate_fields([("username", "  bob  ")]);
        assert!(errors.is_empty());
    }
}
