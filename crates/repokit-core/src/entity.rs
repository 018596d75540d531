//! Mapping between Rust types and tables.

/// A persisted type with a backing table.
///
/// `NAME` is the type's simple name and seeds the default query alias
/// (`Task` becomes `task`). `TABLE` is the SQL table it is stored in.
pub trait Entity: 'static {
    const NAME: &'static str;
    const TABLE: &'static str;
}

/// Placeholder entity for paths whose table is only known at runtime.
///
/// Paths typed with `AnyEntity` carry their table name as data, see
/// [`EntityPath::dynamic`](crate::EntityPath::dynamic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnyEntity;

impl Entity for AnyEntity {
    const NAME: &'static str = "Row";
    const TABLE: &'static str = "";
}

/// Derive the default alias for an entity name by lower-casing its first character.
#[must_use]
pub fn default_alias(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_lowercases_first_letter_only() {
        assert_eq!(default_alias("Task"), "task");
        assert_eq!(default_alias("ImplLog"), "implLog");
        assert_eq!(default_alias("already"), "already");
        assert_eq!(default_alias(""), "");
    }
}
