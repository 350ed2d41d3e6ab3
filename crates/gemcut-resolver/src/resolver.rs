//! Per-build resolution: drop, pass, conflict check and bitmap, in a fixed order.

use std::collections::BTreeMap;

use gemcut_core::gem::GemTable;
use gemcut_core::manifest::{BuildPolicies, Manifest};
use gemcut_util::errors::GemcutError;
use serde::Serialize;

use crate::bitmap::Bitmap;
use crate::conflict::check_disjoint;
use crate::diagnostics::{Diagnostics, Origin};
use crate::drop_list::resolve_drop_list;
use crate::pass_list::resolve_pass_list;
use crate::set::ResolvedSet;

/// Message attached to pass/drop overlaps.
pub const CONFLICT_MESSAGE: &str = "gems are both bundled and dropped";

/// The output of resolving one build model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelResolution {
    pub pass: ResolvedSet,
    pub drop: ResolvedSet,
    /// Pass set packed for the host build.
    pub bitmap: Bitmap,
}

/// Resolve one build's policies against `table`.
///
/// Evaluation order:
/// 1. unless `drop` is `All`, the drop list is resolved against an empty
///    bundle and becomes the common drop;
/// 2. the pass list is resolved with that common drop;
/// 3. an `All` drop is resolved against the pass set;
/// 4. the two sets must be disjoint.
pub fn resolve_model(
    table: &GemTable,
    policies: &BuildPolicies,
    context: &str,
    diagnostics: &mut Diagnostics,
) -> Result<ModelResolution, GemcutError> {
    let drop_origin = Origin::drop(context);
    let drop_is_all = policies.drop.is_all();

    let common_drop = if drop_is_all {
        ResolvedSet::empty()
    } else {
        resolve_drop_list(
            &policies.drop,
            table,
            &ResolvedSet::empty(),
            drop_origin,
            diagnostics,
        )
    };

    let pass = resolve_pass_list(
        &policies.bundle,
        table,
        &common_drop,
        Origin::bundle(context),
    )?;

    let drop = if drop_is_all {
        resolve_drop_list(&policies.drop, table, &pass, drop_origin, diagnostics)
    } else {
        common_drop
    };

    check_disjoint(&pass, &drop, table, CONFLICT_MESSAGE, context)?;

    let bitmap = Bitmap::encode(&pass, table.len());
    tracing::info!(
        context,
        pass = pass.len(),
        drop = drop.len(),
        gems = table.len(),
        "resolved build"
    );

    Ok(ModelResolution { pass, drop, bitmap })
}

/// Diagnostic context for a `[build.<name>]` section.
pub fn build_context(name: &str) -> String {
    format!("build.{name}")
}

/// The output of resolving every build in a manifest.
pub struct ManifestResolution {
    pub table: GemTable,
    /// One entry per build, ordered by name. A failed build does not stop the others.
    pub builds: BTreeMap<String, Result<ModelResolution, GemcutError>>,
}

impl ManifestResolution {
    pub fn failures(&self) -> impl Iterator<Item = (&str, &GemcutError)> {
        self.builds
            .iter()
            .filter_map(|(name, r)| r.as_ref().err().map(|e| (name.as_str(), e)))
    }
}

/// Build the gem table once and resolve each build with `[defaults]` applied.
pub fn resolve_manifest(
    manifest: &Manifest,
    diagnostics: &mut Diagnostics,
) -> Result<ManifestResolution, GemcutError> {
    let table = manifest.gem_table()?;
    let builds = manifest
        .effective_builds()
        .into_iter()
        .map(|(name, policies)| {
            let result = resolve_model(&table, &policies, &build_context(&name), diagnostics);
            (name, result)
        })
        .collect();
    Ok(ManifestResolution { table, builds })
}
