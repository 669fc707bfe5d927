//! Partial-update SET-clause building.
//!
//! A PATCH payload names only the fields it wants changed. [`set_clause`]
//! turns that sparse, ordered field list into the `SET` portion of a
//! single-row `UPDATE` — a `"col1"=$1, "col2"=$2` fragment plus the value
//! list that binds to it — leaving the caller to supply the
//! `UPDATE <table> SET` / `WHERE` framing and the row key parameter.

use crate::error::{Error, Result};
use crate::value::{FieldValue, Patch};

/// An ordered sparse update payload.
///
/// Fields keep the order in which they were supplied; that order decides
/// placeholder numbering, so it is a list of pairs rather than a map.
#[derive(Debug, Clone, Default)]
pub struct UpdateFields {
    fields: Vec<(String, FieldValue)>,
}

impl UpdateFields {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field value.
    pub fn set(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.push((field.to_string(), value.into()));
        self
    }

    /// Append a tri-state PATCH field: `Absent` is skipped, `Null` becomes
    /// SQL NULL, `Value` is appended as-is.
    pub fn set_patch<T: Into<FieldValue>>(self, field: &str, patch: Patch<T>) -> Self {
        match patch {
            Patch::Absent => self,
            Patch::Null => self.set(field, FieldValue::Null),
            Patch::Value(value) => self.set(field, value),
        }
    }

    /// Number of supplied fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields were supplied.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in supplied order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(field, value)| (field.as_str(), value))
    }
}

/// A built `SET` clause and its positionally matched parameters.
///
/// `params[i]` binds to placeholder `$i+1`; indices are contiguous from `$1`
/// in field-supplied order, so a caller appending its row key binds it as
/// `$params.len()+1`.
#[derive(Debug, Clone)]
pub struct SetClause {
    /// Comma-joined assignments: `"col1"=$1, "col2"=$2`
    pub sql: String,
    /// Values in assignment order
    pub params: Vec<FieldValue>,
}

/// Build the `SET` clause for a single-row partial update.
///
/// Each field resolves its column through `columns` (wire name → column
/// name); a field absent from the table uses its name verbatim. Column
/// names are interpolated into the fragment double-quoted and unvalidated:
/// translation tables must be fixed, caller-controlled constants, never
/// user input. Data values are never interpolated — they only ever travel
/// through the returned parameter list.
///
/// Fails with [`Error::EmptyUpdate`] when `fields` is empty.
///
/// # Example
/// ```ignore
/// let fields = UpdateFields::new().set("username", "test").set("favNum", 8i64);
/// let clause = set_clause(fields, &[("favNum", "fav_num")])?;
/// assert_eq!(clause.sql, r#""username"=$1, "fav_num"=$2"#);
/// ```
pub fn set_clause(fields: UpdateFields, columns: &[(&str, &str)]) -> Result<SetClause> {
    if fields.is_empty() {
        return Err(Error::EmptyUpdate);
    }

    let mut assignments = Vec::with_capacity(fields.len());
    let mut params = Vec::with_capacity(fields.len());
    for (idx, (field, value)) in fields.fields.into_iter().enumerate() {
        let column = columns
            .iter()
            .find(|(wire, _)| *wire == field)
            .map_or(field.as_str(), |(_, column)| *column);
        assignments.push(format!("\"{}\"=${}", column, idx + 1));
        params.push(value);
    }

    Ok(SetClause {
        sql: assignments.join(", "),
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_mapped_fields_and_keeps_the_rest() {
        let fields = UpdateFields::new().set("username", "test").set("favNum", 8i64);
        let supplied: Vec<&str> = fields.iter().map(|(field, _)| field).collect();
        assert_eq!(supplied, ["username", "favNum"]);

        let clause = set_clause(fields, &[("favNum", "fav_num")]).unwrap();

        assert_eq!(clause.sql, r#""username"=$1, "fav_num"=$2"#);
        assert_eq!(
            clause.params,
            vec![FieldValue::Text("test".into()), FieldValue::Int(8)]
        );
    }

    #[test]
    fn empty_payload_fails_with_no_data() {
        let err = set_clause(UpdateFields::new(), &[]).unwrap_err();
        assert!(matches!(err, Error::EmptyUpdate));
        assert_eq!(err.to_string(), "No data");
    }

    #[test]
    fn empty_payload_fails_regardless_of_translation_table() {
        let err = set_clause(UpdateFields::new(), &[("favNum", "fav_num")]).unwrap_err();
        assert!(matches!(err, Error::EmptyUpdate));
    }

    #[test]
    fn nulls_are_bound_not_skipped() {
        let fields = UpdateFields::new()
            .set("title", "New Title")
            .set("salary", FieldValue::Null)
            .set("equity", FieldValue::Null);
        let clause = set_clause(fields, &[]).unwrap();

        assert_eq!(clause.sql, r#""title"=$1, "salary"=$2, "equity"=$3"#);
        assert_eq!(
            clause.params,
            vec![
                FieldValue::Text("New Title".into()),
                FieldValue::Null,
                FieldValue::Null
            ]
        );
    }

    #[test]
    fn placeholders_are_contiguous_in_supplied_order() {
        let fields = UpdateFields::new()
            .set("d", 4i64)
            .set("a", 1i64)
            .set("c", 3i64)
            .set("b", 2i64);
        let clause = set_clause(fields, &[]).unwrap();

        assert_eq!(clause.sql, r#""d"=$1, "a"=$2, "c"=$3, "b"=$4"#);
        assert_eq!(clause.sql.matches("=$").count(), clause.params.len());
        assert_eq!(clause.params.len(), 4);
    }

    #[test]
    fn set_patch_skips_absent_fields() {
        let fields = UpdateFields::new()
            .set_patch("name", Patch::Value("n"))
            .set_patch::<i64>("salary", Patch::Absent)
            .set_patch::<i64>("equity", Patch::Null);
        let clause = set_clause(fields, &[]).unwrap();

        assert_eq!(clause.sql, r#""name"=$1, "equity"=$2"#);
        assert_eq!(
            clause.params,
            vec![FieldValue::Text("n".into()), FieldValue::Null]
        );
    }

    #[test]
    fn all_absent_patch_fields_fail_with_no_data() {
        let fields = UpdateFields::new()
            .set_patch::<String>("name", Patch::Absent)
            .set_patch::<i64>("salary", Patch::Absent);
        assert!(matches!(set_clause(fields, &[]), Err(Error::EmptyUpdate)));
    }
}
