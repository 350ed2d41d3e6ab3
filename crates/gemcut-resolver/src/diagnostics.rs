//! Append-only sink for soft warnings raised during resolution.

use std::fmt;

use serde::Serialize;

/// Where a policy came from: the configuration key and which policy it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin<'a> {
    /// Declaration site, e.g. `build.host`.
    pub context: &'a str,
    /// `bundle` or `drop`.
    pub label: &'a str,
}

impl<'a> Origin<'a> {
    pub fn bundle(context: &'a str) -> Self {
        Self {
            context,
            label: "bundle",
        }
    }

    pub fn drop(context: &'a str) -> Self {
        Self {
            context,
            label: "drop",
        }
    }
}

/// A drop list named a gem that is not in the table; the name was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedDrop {
    pub name: String,
    pub label: String,
    pub context: String,
}

impl fmt::Display for UnresolvedDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: unknown gem '{}' in {} list, skipped",
            self.context, self.name, self.label
        )
    }
}

/// Warnings collected across resolutions. The resolver only appends.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<UnresolvedDrop>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: UnresolvedDrop) {
        tracing::warn!(
            gem = %warning.name,
            label = %warning.label,
            context = %warning.context,
            "unknown gem in drop list, skipped"
        );
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[UnresolvedDrop] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.warnings.is_empty() {
            return write!(f, "No warnings.");
        }
        writeln!(f, "Warnings ({}):", self.warnings.len())?;
        for w in &self.warnings {
            writeln!(f, "  {w}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sink() {
        let d = Diagnostics::new();
        assert!(d.is_empty());
        assert_eq!(d.len(), 0);
        assert_eq!(d.to_string(), "No warnings.");
    }

    #[test]
    fn sink_with_warning() {
        let mut d = Diagnostics::new();
        d.warn(UnresolvedDrop {
            name: "mruby-io".to_string(),
            label: "drop".to_string(),
            context: "build.host".to_string(),
        });
        assert_eq!(d.len(), 1);
        let s = d.to_string();
        assert!(s.contains("Warnings (1):"));
        assert!(s.contains("build.host: unknown gem 'mruby-io' in drop list, skipped"));
    }
}
