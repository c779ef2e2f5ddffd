//! Plain-text output for `explorer list` and `explorer show`.

use std::io::{self, Write};

use explorer_core::{Catalog, Entry, FilteredCatalog};

/// Write every section of `view` with its entries indented beneath it.
pub fn write_list(
    out: &mut impl Write,
    view: &FilteredCatalog,
    hide_empty: bool,
) -> io::Result<()> {
    let name_width = view
        .entries()
        .map(|e| e.name().chars().count())
        .max()
        .unwrap_or(0);

    for section in view.sections() {
        if hide_empty && section.is_empty() {
            continue;
        }
        writeln!(out, "{} ({})", section.title(), section.len())?;
        for entry in section.entries() {
            writeln!(out, "  {:<name_width$}  {}", entry.name(), entry.description())?;
        }
    }

    if !view.is_unfiltered() && view.is_empty() {
        writeln!(out, "No matches for {:?}", view.query().as_str())?;
    }
    Ok(())
}

/// Write one entry as `key: value` lines.
pub fn write_entry(out: &mut impl Write, catalog: &Catalog, entry: &Entry) -> io::Result<()> {
    let section = catalog
        .sections()
        .iter()
        .find(|s| s.entries().iter().any(|e| e.name() == entry.name()))
        .map(|s| s.title())
        .unwrap_or("");

    writeln!(out, "{}", entry.name())?;
    writeln!(out, "  section:     {section}")?;
    writeln!(out, "  description: {}", entry.description())?;
    writeln!(out, "  icon:        {}", entry.icon_key())?;
    writeln!(out, "  reference:   {}", entry.reference_url())?;
    Ok(())
}
