//! Shared Kotlin source layout: file header, imports, indentation.

use std::collections::BTreeSet;
use std::fmt::Write;

/// One level of indentation.
pub const INDENT: &str = "    ";

pub fn indent(depth: usize) -> String {
    INDENT.repeat(depth)
}

/// Write the generated-file banner and optional package declaration.
pub fn write_header(out: &mut String, page_name: &str, package: Option<&str>) {
    let _ = writeln!(
        out,
        "// Generated by pagegen from page `{page_name}`. Do not edit."
    );
    let _ = writeln!(out);
    if let Some(package) = package {
        let _ = writeln!(out, "package {package}");
        let _ = writeln!(out);
    }
}

/// Write sorted import lines followed by a blank line.
pub fn write_imports(out: &mut String, imports: &BTreeSet<String>) {
    if imports.is_empty() {
        return;
    }
    for import in imports {
        let _ = writeln!(out, "import {import}");
    }
    let _ = writeln!(out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_package() {
        let mut out = String::new();
        write_header(&mut out, "counter", Some("com.example"));
        assert_eq!(
            out,
            "// Generated by pagegen from page `counter`. Do not edit.\n\npackage com.example\n\n"
        );
    }

    #[test]
    fn imports_are_sorted() {
        let imports: BTreeSet<String> = ["b.B", "a.A"].iter().map(|s| s.to_string()).collect();
        let mut out = String::new();
        write_imports(&mut out, &imports);
        assert_eq!(out, "import a.A\nimport b.B\n\n");
    }
}
