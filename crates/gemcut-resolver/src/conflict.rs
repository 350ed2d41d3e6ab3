//! Disjointness check between a build's pass and drop sets.

use gemcut_core::gem::GemTable;
use gemcut_util::errors::GemcutError;

use crate::set::ResolvedSet;

/// Names of the gems present in both sets, sorted.
pub fn conflicting_names(a: &ResolvedSet, b: &ResolvedSet, table: &GemTable) -> Vec<String> {
    let mut names: Vec<String> = a
        .intersection(b)
        .iter()
        .map(|idx| table.name(idx).to_string())
        .collect();
    names.sort();
    names
}

/// Fail with [`GemcutError::Conflict`] if `a` and `b` share any gem.
pub fn check_disjoint(
    a: &ResolvedSet,
    b: &ResolvedSet,
    table: &GemTable,
    message: &str,
    context: &str,
) -> Result<(), GemcutError> {
    let names = conflicting_names(a, b, table);
    if names.is_empty() {
        return Ok(());
    }
    Err(GemcutError::Conflict {
        message: message.to_string(),
        names,
        context: context.to_string(),
    })
}
