//! State-holder lowering: page fields and methods → a `ViewModel` class.
//!
//! Each field becomes one observable cell (`mutableStateOf`), each method one
//! member function whose body has the `this.` self-reference stripped.

use std::collections::BTreeSet;
use std::fmt::Write;

use pagegen_core::binding::strip_self_prefix;
use pagegen_core::error::CoreError;
use pagegen_core::ir::{Field, Method, PageDefinition};
use pagegen_core::pipeline::GenerateConfig;
use tracing::debug;

use crate::kotlin::{indent, write_header, write_imports};
use crate::names::state_holder_type;
use crate::types::{kotlin_initial_value, kotlin_type};

const MUTABLE_STATE_OF: &str = "androidx.compose.runtime.mutableStateOf";
const VIEW_MODEL: &str = "androidx.lifecycle.ViewModel";

/// Lower the page's state into the state-holder source file.
///
/// Fails with `UnsupportedFieldType` on the first field whose kind has no
/// Kotlin mapping; nothing is produced in that case.
pub fn lower_state_holder(
    page: &PageDefinition,
    config: &GenerateConfig,
) -> Result<String, CoreError> {
    let info = &page.page_info;
    let type_name = state_holder_type(&page.name);

    let mut cells = Vec::with_capacity(info.fields.len());
    for field in &info.fields {
        cells.push(lower_field(field)?);
    }

    let mut sections = Vec::with_capacity(info.methods.len() + 1);
    if !cells.is_empty() {
        sections.push(cells.concat());
    }
    sections.extend(info.methods.iter().map(lower_method));

    let mut imports = BTreeSet::new();
    if !info.fields.is_empty() {
        imports.insert(MUTABLE_STATE_OF.to_string());
    }
    imports.insert(VIEW_MODEL.to_string());

    let mut out = String::new();
    write_header(&mut out, &page.name, config.package.as_deref());
    write_imports(&mut out, &imports);
    let _ = writeln!(out, "class {type_name} : ViewModel() {{");
    out.push_str(&sections.join("\n"));
    let _ = writeln!(out, "}}");

    debug!(
        page = %page.name,
        fields = info.fields.len(),
        methods = info.methods.len(),
        "lowered state holder"
    );
    Ok(out)
}

fn lower_field(field: &Field) -> Result<String, CoreError> {
    let ty = kotlin_type(&field.kind).ok_or_else(|| CoreError::UnsupportedFieldType {
        field: field.name.clone(),
        kind: field.kind.to_string(),
    })?;
    Ok(format!(
        "{}val {} = mutableStateOf<{ty}>({})\n",
        indent(1),
        field.name,
        kotlin_initial_value(&field.kind, &field.initial_value),
    ))
}

fn lower_method(method: &Method) -> String {
    let body = strip_self_prefix(&method.body);
    let mut out = String::new();
    let _ = writeln!(out, "{}fun {}() {{", indent(1), method.name);
    for line in body.lines() {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "{}{}", indent(2), line.trim_end());
        }
    }
    let _ = writeln!(out, "{}}}", indent(1));
    out
}
