//! Pass list: the forward-closed set of gems a build includes.

use gemcut_core::gem::GemTable;
use gemcut_core::policy::PolicyValue;
use gemcut_util::errors::GemcutError;

use crate::diagnostics::Origin;
use crate::normalize::{normalize, Mode, Normalized};
use crate::set::{worklist_closure, ResolvedSet};

/// Resolve a bundle policy into the gems to include.
///
/// `All` yields every gem outside `common_drop`. An explicit list is closed
/// over dependencies and is never filtered by `common_drop`; overlaps are left
/// for the conflict check. An unknown name aborts with
/// [`GemcutError::UnknownBundleGem`].
pub fn resolve_pass_list(
    policy: &PolicyValue,
    table: &GemTable,
    common_drop: &ResolvedSet,
    origin: Origin<'_>,
) -> Result<ResolvedSet, GemcutError> {
    let seeds = match normalize(policy, table) {
        Normalized::Mode(Mode::All) => {
            return Ok(ResolvedSet::all_except(table.len(), common_drop));
        }
        Normalized::Mode(Mode::None) => return Ok(ResolvedSet::empty()),
        Normalized::Seeds { seeds, missing } => {
            if let Some(name) = missing.first() {
                return Err(GemcutError::UnknownBundleGem {
                    name: (*name).to_string(),
                    label: origin.label.to_string(),
                    context: origin.context.to_string(),
                });
            }
            seeds
        }
    };

    let pass = worklist_closure(&seeds, table.len(), move |idx| {
        table.dependencies_of(idx).iter().copied()
    });
    tracing::debug!(
        context = origin.context,
        seeds = seeds.len(),
        closed = pass.len(),
        "closed pass list over dependencies"
    );
    Ok(pass)
}
