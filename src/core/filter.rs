//! Song query filters
//!
//! Turns the free-form `key=value` pairs of a listing request into a list of
//! predicates on song columns. Unknown keys and empty values are dropped.

use std::collections::HashMap;

/// A song column that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongField {
    Band,
    Song,
    ReleaseDate,
    Text,
    Link,
}

impl SongField {
    /// Recognized filter keys in the order predicates are emitted.
    pub const ALL: [SongField; 5] = [
        SongField::Band,
        SongField::Song,
        SongField::ReleaseDate,
        SongField::Text,
        SongField::Link,
    ];

    /// Name of the query parameter that carries this filter.
    pub fn key(&self) -> &'static str {
        match self {
            SongField::Band => "band",
            SongField::Song => "song",
            SongField::ReleaseDate => "releaseDate",
            SongField::Text => "text",
            SongField::Link => "link",
        }
    }

    /// Column in the `songs` table.
    pub fn column(&self) -> &'static str {
        match self {
            SongField::Band => "band",
            SongField::Song => "song",
            SongField::ReleaseDate => "release_date",
            SongField::Text => "text",
            SongField::Link => "link",
        }
    }
}

/// A single condition on one song column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Equals { field: SongField, value: String },
    /// Case-sensitive substring match.
    Contains { field: SongField, value: String },
}

impl Predicate {
    pub fn field(&self) -> SongField {
        match self {
            Predicate::Equals { field, .. } | Predicate::Contains { field, .. } => *field,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Predicate::Equals { value, .. } | Predicate::Contains { value, .. } => value,
        }
    }

    /// SQL condition with a single positional parameter bound to [`Predicate::value`].
    ///
    /// `instr` is used instead of `LIKE` because SQLite's `LIKE` ignores ASCII case.
    pub fn sql_condition(&self) -> String {
        match self {
            Predicate::Equals { field, .. } => format!("{} = ?", field.column()),
            Predicate::Contains { field, .. } => format!("instr({}, ?) > 0", field.column()),
        }
    }
}

/// Build the predicates for a listing request.
///
/// Output order is fixed (band, song, releaseDate, text, link) regardless of
/// the map's iteration order.
pub fn build_predicates(filters: &HashMap<String, String>) -> Vec<Predicate> {
    SongField::ALL
        .iter()
        .filter_map(|field| {
            let value = filters.get(field.key())?;
            if value.is_empty() {
                return None;
            }

            let value = value.clone();
            Some(match field {
                SongField::Text => Predicate::Contains { field: *field, value },
                _ => Predicate::Equals { field: *field, value },
            })
        })
        .collect()
}

/// Render predicates as a `WHERE` clause (empty when there are none).
pub fn where_clause(predicates: &[Predicate]) -> String {
    if predicates.is_empty() {
        return String::new();
    }

    let conditions: Vec<String> = predicates.iter().map(Predicate::sql_condition).collect();
    format!("WHERE {}", conditions.join(" AND "))
}
