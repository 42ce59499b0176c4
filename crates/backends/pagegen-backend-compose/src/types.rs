use pagegen_core::ir::FieldKind;

/// Map a field kind to its Kotlin type, or `None` if it has no mapping.
pub fn kotlin_type(kind: &FieldKind) -> Option<&'static str> {
    match kind {
        FieldKind::Number => Some("Int"),
        FieldKind::String => Some("String"),
        FieldKind::Boolean => Some("Boolean"),
        FieldKind::Unsupported(_) => None,
    }
}

/// Kotlin initializer text for a field's raw initial value.
///
/// Number and Boolean literals are copied verbatim. A String value that is
/// not already a double-quoted literal is quoted and escaped.
pub fn kotlin_initial_value(kind: &FieldKind, raw: &str) -> String {
    match kind {
        FieldKind::String if !is_quoted(raw) => quote_kotlin_string(raw),
        _ => raw.to_string(),
    }
}

fn is_quoted(raw: &str) -> bool {
    raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"')
}

fn quote_kotlin_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
