use sqlparser::ast::Ident;

/// Normalize a parsed identifier.
///
/// Unquoted identifiers are case-insensitive in SQL and are lowercased;
/// quoted identifiers keep their exact spelling.
pub fn normalize_ident(ident: &Ident) -> String {
    if ident.quote_style.is_some() {
        ident.value.clone()
    } else {
        ident.value.to_ascii_lowercase()
    }
}

/// Join the normalized parts of a (possibly qualified) column reference with `.`.
///
/// Examples:
/// - `Users.Id` -> `users.id`
/// - `"Users".id` -> `Users.id`
pub fn column_path(parts: &[Ident]) -> String {
    parts
        .iter()
        .map(normalize_ident)
        .collect::<Vec<_>>()
        .join(".")
}
