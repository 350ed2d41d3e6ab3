//! Right-aligned status lines on stderr, e.g. `   Generated include/gem_deps.h`.

use std::io::{self, Write};

use console::Style;

/// Width the label is right-aligned to.
const LABEL_WIDTH: usize = 12;

fn write_status(out: &mut impl Write, style: &Style, label: &str, message: &str) -> io::Result<()> {
    writeln!(out, "{:>LABEL_WIDTH$} {message}", style.apply_to(label))
}

fn emit(style: Style, label: &str, message: &str) {
    let _ = write_status(&mut io::stderr().lock(), &style, label, message);
}

/// Progress of an operation, bold green label.
pub fn status(label: &str, message: &str) {
    emit(Style::new().green().bold(), label, message);
}

/// A warning the run continues past, bold yellow label.
pub fn status_warn(label: &str, message: &str) {
    emit(Style::new().yellow().bold(), label, message);
}
