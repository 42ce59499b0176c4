//! Naming conventions for generated types, functions, and files.

/// Suffix of the generated state-holder class.
pub const STATE_HOLDER_SUFFIX: &str = "StateHolder";

/// Suffix of the generated view function.
pub const VIEW_SUFFIX: &str = "View";

/// Convert a logical page name to `PascalCase`.
///
/// Splits on any non-alphanumeric character and capitalizes the first
/// letter of each part; the rest of each part is kept as-is.
///
/// ```text
/// "counter_page" → "CounterPage"
/// "user-profile" → "UserProfile"
/// "CounterPage"  → "CounterPage"
/// "2fa"          → "_2fa"
/// ```
pub fn to_pascal_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut capitalize_next = true;
    for ch in name.chars() {
        if !ch.is_alphanumeric() {
            capitalize_next = true;
        } else if capitalize_next {
            out.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(ch);
        }
    }
    if out.is_empty() {
        return "Page".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Name of the state-holder class for a page.
pub fn state_holder_type(page_name: &str) -> String {
    format!("{}{STATE_HOLDER_SUFFIX}", to_pascal_case(page_name))
}

/// Name of the composable view function for a page.
pub fn view_function(page_name: &str) -> String {
    format!("{}{VIEW_SUFFIX}", to_pascal_case(page_name))
}

/// Kotlin source file name for a top-level declaration.
pub fn source_file_name(decl: &str) -> String {
    format!("{decl}.kt")
}
