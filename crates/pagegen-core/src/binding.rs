//! Bound expressions: opaque text with scoped-name references.
//!
//! Prop values refer to the page's state through [`PAGE_SCOPE_PREFIX`] and
//! method bodies through [`SELF_PREFIX`]. Neither is parsed as an expression
//! language; the text is split into literal runs and prefix occurrences so
//! each occurrence can be rewritten (or stripped) and the members it names
//! can be checked against the page.

/// Scoped prefix used in prop values to reference the page's state.
pub const PAGE_SCOPE_PREFIX: &str = "page.";

/// Self-reference prefix used inside method bodies.
pub const SELF_PREFIX: &str = "this.";

/// One run of a [`BoundExpr`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Text copied through unchanged.
    Text(String),
    /// One occurrence of the scope prefix. `member` is the identifier that
    /// follows it (possibly empty); the identifier itself stays in the next
    /// `Text` run.
    ScopeRef { member: String },
}

/// Text split at every occurrence of a scope prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundExpr {
    segments: Vec<Segment>,
}

impl BoundExpr {
    /// Split `text` at every non-overlapping occurrence of `prefix`,
    /// scanning left to right.
    pub fn parse(text: &str, prefix: &str) -> Self {
        let mut segments = Vec::new();
        if prefix.is_empty() {
            if !text.is_empty() {
                segments.push(Segment::Text(text.to_string()));
            }
            return Self { segments };
        }

        let mut rest = text;
        while let Some(pos) = rest.find(prefix) {
            if pos > 0 {
                segments.push(Segment::Text(rest[..pos].to_string()));
            }
            rest = &rest[pos + prefix.len()..];
            let end = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());
            segments.push(Segment::ScopeRef {
                member: rest[..end].to_string(),
            });
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }
        Self { segments }
    }

    /// Members named right after each prefix occurrence, in order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::ScopeRef { member } => Some(member.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Render back to text. Each prefix occurrence becomes `<binding>.`, or
    /// is dropped when `binding` is `None`.
    pub fn render(&self, binding: Option<&str>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::ScopeRef { .. } => {
                    if let Some(binding) = binding {
                        out.push_str(binding);
                        out.push('.');
                    }
                }
            }
        }
        out
    }
}

/// Rewrite every `page.` occurrence in a prop value to `<binding>.`.
pub fn rewrite_page_scope(value: &str, binding: &str) -> String {
    BoundExpr::parse(value, PAGE_SCOPE_PREFIX).render(Some(binding))
}

/// Strip every `this.` occurrence from a method body.
pub fn strip_self_prefix(body: &str) -> String {
    BoundExpr::parse(body, SELF_PREFIX).render(None)
}
