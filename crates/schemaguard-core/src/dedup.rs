use std::collections::HashMap;

use crate::report::ValidationError;

/// Collapse findings with the same path, property and message.
///
/// The first occurrence keeps its position and absorbs the count of every
/// later duplicate.
pub fn dedup_errors(errors: Vec<ValidationError>) -> Vec<ValidationError> {
    let mut first_seen: HashMap<(String, String, String), usize> = HashMap::new();
    let mut unique: Vec<ValidationError> = Vec::with_capacity(errors.len());

    for mut err in errors {
        let count = err.errorcount.max(1);
        let key = (err.path.clone(), err.property.clone(), err.message.clone());
        match first_seen.get(&key) {
            Some(&index) => unique[index].errorcount += count,
            None => {
                err.errorcount = count;
                first_seen.insert(key, unique.len());
                unique.push(err);
            }
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn err(path: &str, property: &str, message: &str) -> ValidationError {
        ValidationError::new(path, property, message)
    }

    #[test]
    fn identical_errors_collapse_with_count() {
        let errors = vec![
            err("root", "type", "a"),
            err("root.x", "type", "a"),
            err("root", "type", "a"),
            err("root", "type", "a"),
        ];
        let deduped = dedup_errors(errors);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].errorcount, 3);
        assert_eq!(deduped[1].path, "root.x");
        assert_eq!(deduped[1].errorcount, 1);
    }

    #[test]
    fn any_differing_field_keeps_entries_apart() {
        let errors = vec![
            err("root", "type", "a"),
            err("root", "enum", "a"),
            err("root", "type", "b"),
        ];
        assert_eq!(dedup_errors(errors).len(), 3);
    }

    #[test]
    fn empty_input() {
        assert!(dedup_errors(Vec::new()).is_empty());
    }
}
