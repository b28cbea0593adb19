use std::io::{self, Write};

use anyhow::Error;
use stoich_forge::DesignError;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let hints = collect_hints(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn collect_hints(err: &Error) -> Vec<String> {
    if let Some(design_err) = err.chain().find_map(|e| e.downcast_ref::<DesignError>()) {
        return design_hints(design_err);
    }

    if let Some(io_err) = err.chain().find_map(|e| e.downcast_ref::<io::Error>()) {
        return io_hints(io_err);
    }

    Vec::new()
}

fn design_hints(err: &DesignError) -> Vec<String> {
    match err {
        DesignError::InvalidFormula { source, .. } => vec![
            format!("Parsing stopped at character {}", source.position),
            "Slot labels start with an uppercase letter, e.g. A, X, Xa".to_string(),
            "Counts are positive integers; groups use parentheses, e.g. (AB)2X".to_string(),
        ],

        DesignError::CatalogParse(_) => vec![
            "The catalog must be a TOML document of element tables".to_string(),
            "Each table looks like: [Fe] all = [2, 3, 6] common = [2, 3]".to_string(),
        ],

        DesignError::InvalidCatalog { symbol, .. } => vec![
            format!("Check the [{}] table in the catalog file", symbol),
            "Keys must be element symbols, and every common state must also be listed under 'all'"
                .to_string(),
        ],

        DesignError::UnknownSlot(label) => vec![
            format!("No slot labelled '{}' occurs in the formula", label),
            "Slot labels are case-sensitive; run with the exact labels of the formula".to_string(),
        ],
    }
}

fn io_hints(err: &io::Error) -> Vec<String> {
    use std::io::ErrorKind;

    let hints: &[&str] = match err.kind() {
        ErrorKind::NotFound => &[
            "File or directory not found",
            "Check the path spelling and ensure the file exists",
        ],
        ErrorKind::PermissionDenied => &[
            "Permission denied accessing the file",
            "Check file permissions with `ls -la`",
        ],
        ErrorKind::InvalidData => &["The catalog file is not valid UTF-8 text"],
        ErrorKind::BrokenPipe => &["Output pipe was closed before all results were written"],
        ErrorKind::WriteZero => &[
            "Failed to write data (disk full?)",
            "Check available disk space",
        ],
        _ => &[],
    };

    hints.iter().map(|h| h.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use stoich_forge::{DesignConfig, generate_compositions_by_oxidation};

    #[test]
    fn formula_errors_point_at_position() {
        let err = generate_compositions_by_oxidation("A$", &DesignConfig::default())
            .context("Enumeration failed")
            .unwrap_err();
        let hints = collect_hints(&err);
        assert_eq!(hints[0], "Parsing stopped at character 1");
    }

    #[test]
    fn io_errors_are_found_through_context() {
        let err = std::fs::read_to_string("/nonexistent/sforge/catalog.toml")
            .context("Failed to read catalog file")
            .unwrap_err();
        let hints = collect_hints(&err);
        assert_eq!(hints[0], "File or directory not found");
    }

    #[test]
    fn plain_errors_have_no_hints() {
        assert!(collect_hints(&anyhow::anyhow!("something else")).is_empty());
    }
}
