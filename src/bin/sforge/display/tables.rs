use std::io::{self, Write};

use stoich_forge::{AbstractFormula, DesignConfig, ElementCatalog, SearchStats};

use crate::util::text::{join_signed, truncate};

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

pub fn print_search_summary(
    formula: &AbstractFormula,
    config: &DesignConfig,
    stats: &SearchStats,
    distinct: usize,
) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let slots = formula
        .slots()
        .iter()
        .map(|slot| format!("{}×{}", slot.label, slot.count))
        .collect::<Vec<_>>()
        .join(" ");

    let mut rows = vec![
        ("Formula", formula.to_string()),
        ("Slots", slots),
        ("Target oxidation", format!("{:+}", config.total_oxidation_state)),
        (
            "State set",
            if config.only_common_oxidation_states {
                "common".to_string()
            } else {
                "all".to_string()
            },
        ),
    ];

    if !config.constraints.is_empty() {
        let labels = config.constraints.labels().collect::<Vec<_>>().join(", ");
        rows.push(("Constrained", labels));
    }

    rows.push(("Compositions", distinct.to_string()));
    rows.push(("Branches", stats.branches.to_string()));
    rows.push(("Pruned", stats.pruned.to_string()));

    let _ = writeln!(out);
    print_kv_table(&mut out, "Search Summary", &rows);
}

pub fn print_catalog_summary(catalog: &ElementCatalog) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let with_common = catalog
        .entries()
        .filter(|(_, states)| !states.common.is_empty())
        .count();

    let range = |only_common| {
        catalog
            .oxidation_range(only_common)
            .map(|(lo, hi)| join_signed(&[lo, hi], " … "))
            .unwrap_or_else(|| "-".to_string())
    };

    let rows = vec![
        ("Elements", catalog.len().to_string()),
        ("With common", with_common.to_string()),
        ("Range (all)", range(false)),
        ("Range (common)", range(true)),
    ];

    let _ = writeln!(out);
    print_kv_table(&mut out, "Catalog Summary", &rows);
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let _ = writeln!(
        out,
        "{}┌─ {} ─┐",
        INDENT,
        truncate(title, SAFE_TABLE_WIDTH - 6)
    );
    let _ = writeln!(
        out,
        "{}┌{k_line}┬{v_line}┐",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<key_w$} │ {:>val_w$} │",
        INDENT,
        "Metric",
        "Value",
        key_w = key_w,
        val_w = val_w
    );
    let _ = writeln!(
        out,
        "{}├{k_line}┼{v_line}┤",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{}│ {:<key_w$} │ {:>val_w$} │",
            INDENT,
            truncate(key, key_w),
            truncate(val, val_w),
            key_w = key_w,
            val_w = val_w
        );
    }

    let _ = writeln!(
        out,
        "{}└{k_line}┴{v_line}┘",
        INDENT,
        k_line = "─".repeat(key_w + 2),
        v_line = "─".repeat(val_w + 2)
    );
}
