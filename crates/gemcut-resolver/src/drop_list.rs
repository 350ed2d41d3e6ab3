//! Drop list: the reverse-closed set of gems a build excludes.

use gemcut_core::gem::GemTable;
use gemcut_core::policy::PolicyValue;

use crate::diagnostics::{Diagnostics, Origin, UnresolvedDrop};
use crate::normalize::{normalize, Mode, Normalized};
use crate::set::{worklist_closure, ResolvedSet};

/// Resolve a drop policy into the gems to exclude.
///
/// `All` yields every gem outside `bundle`. An explicit list is closed over
/// dependents: dropping a gem drops everything that transitively requires it.
/// Unknown names are reported to `diagnostics` and skipped.
pub fn resolve_drop_list(
    policy: &PolicyValue,
    table: &GemTable,
    bundle: &ResolvedSet,
    origin: Origin<'_>,
    diagnostics: &mut Diagnostics,
) -> ResolvedSet {
    let seeds = match normalize(policy, table) {
        Normalized::Mode(Mode::All) => return ResolvedSet::all_except(table.len(), bundle),
        Normalized::Mode(Mode::None) => return ResolvedSet::empty(),
        Normalized::Seeds { seeds, missing } => {
            for name in missing {
                diagnostics.warn(UnresolvedDrop {
                    name: name.to_string(),
                    label: origin.label.to_string(),
                    context: origin.context.to_string(),
                });
            }
            seeds
        }
    };

    let drop = worklist_closure(&seeds, table.len(), move |idx| table.dependents_of(idx));
    tracing::debug!(
        context = origin.context,
        seeds = seeds.len(),
        closed = drop.len(),
        "closed drop list over dependents"
    );
    drop
}
