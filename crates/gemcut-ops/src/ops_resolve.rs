//! Operation: resolve the bundle/drop policies of every build.

use std::collections::BTreeMap;
use std::path::Path;

use gemcut_core::gem::GemTable;
use gemcut_resolver::bitmap::Word;
use gemcut_resolver::diagnostics::Diagnostics;
use gemcut_resolver::resolver::{
    build_context, resolve_manifest, resolve_model, ManifestResolution, ModelResolution,
};
use gemcut_util::errors::GemcutError;
use gemcut_util::status::status;
use serde::Serialize;

use crate::{load_manifest, print_warnings};

/// Options for `gemcut resolve`.
#[derive(Debug, Default)]
pub struct ResolveOptions {
    /// Only report this build.
    pub build: Option<String>,
    /// Emit JSON instead of text.
    pub json: bool,
}

/// JSON view of one resolved build.
#[derive(Debug, Serialize)]
pub struct BuildReport<'t> {
    pub pass: Vec<&'t str>,
    pub drop: Vec<&'t str>,
    pub bitmap: &'t [Word],
}

impl<'t> BuildReport<'t> {
    pub fn new(table: &'t GemTable, resolution: &'t ModelResolution) -> Self {
        Self {
            pass: resolution.pass.names(table),
            drop: resolution.drop.names(table),
            bitmap: resolution.bitmap.words(),
        }
    }
}

/// Text block for one resolved build.
pub fn render_build(name: &str, table: &GemTable, resolution: &ModelResolution) -> String {
    let list = |names: Vec<&str>| {
        if names.is_empty() {
            "(none)".to_string()
        } else {
            names.join(", ")
        }
    };
    let words: Vec<String> = resolution
        .bitmap
        .words()
        .iter()
        .map(|w| format!("0x{w:08x}"))
        .collect();

    let mut out = format!("[build.{name}]\n");
    out.push_str(&format!("  pass:   {}\n", list(resolution.pass.names(table))));
    out.push_str(&format!("  drop:   {}\n", list(resolution.drop.names(table))));
    out.push_str(&format!("  bitmap: [{}]\n", words.join(", ")));
    out
}

/// Resolve every build, or only `opts.build`, and print the outcome.
///
/// All builds are resolved even if one fails; the first failure is returned.
pub fn resolve(manifest_path: &Path, opts: &ResolveOptions) -> miette::Result<()> {
    let manifest = load_manifest(manifest_path)?;

    let mut diagnostics = Diagnostics::new();
    let (table, builds) = match &opts.build {
        // Only the named build, so other builds add no warnings.
        Some(build) => {
            let Some(policies) = manifest.build(build) else {
                return Err(GemcutError::Manifest {
                    message: format!("No build named '{build}' in Gemcut.toml"),
                }
                .into());
            };
            let table = manifest.gem_table()?;
            let result = resolve_model(&table, &policies, &build_context(build), &mut diagnostics);
            (table, BTreeMap::from([(build.clone(), result)]))
        }
        None => {
            let ManifestResolution { table, builds } =
                resolve_manifest(&manifest, &mut diagnostics)?;
            (table, builds)
        }
    };
    print_warnings(&diagnostics);

    let mut resolved: Vec<(String, ModelResolution)> = Vec::new();
    let mut errors: Vec<GemcutError> = Vec::new();

    for (name, result) in builds {
        match result {
            Ok(model) => resolved.push((name, model)),
            Err(e) => {
                tracing::debug!(build = %name, error = %e, "build failed to resolve");
                errors.push(e);
            }
        }
    }

    if opts.json {
        let json: BTreeMap<&str, BuildReport<'_>> = resolved
            .iter()
            .map(|(name, model)| (name.as_str(), BuildReport::new(&table, model)))
            .collect();
        let text = serde_json::to_string_pretty(&json).map_err(|e| GemcutError::Generic {
            message: format!("Failed to serialize report: {e}"),
        })?;
        println!("{text}");
    } else {
        for (name, model) in &resolved {
            print!("{}", render_build(name, &table, model));
            status(
                "Resolved",
                &format!("build.{name} ({} of {} gems)", model.pass.len(), table.len()),
            );
        }
    }

    let mut errors = errors.into_iter();
    match errors.next() {
        Some(first) => {
            for rest in errors {
                eprintln!("error: {rest}");
            }
            Err(first.into())
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemcut_core::gem::GemEntry;
    use gemcut_core::manifest::BuildPolicies;
    use gemcut_core::policy::PolicyValue;

    fn resolved() -> (GemTable, ModelResolution) {
        let table = GemTable::new(vec![
            GemEntry::new("mruby-print", vec![]),
            GemEntry::new("mruby-sprintf", vec![]),
            GemEntry::new("mruby-math", vec![0]),
        ])
        .unwrap();
        let mut diag = Diagnostics::new();
        let r = resolve_model(
            &table,
            &BuildPolicies::new(PolicyValue::explicit(["mruby-math"]), PolicyValue::None),
            "build.host",
            &mut diag,
        )
        .unwrap();
        (table, r)
    }

    #[test]
    fn text_report() {
        let (table, r) = resolved();
        assert_eq!(
            render_build("host", &table, &r),
            "[build.host]\n  pass:   mruby-print, mruby-math\n  drop:   (none)\n  bitmap: [0x00000005]\n"
        );
    }

    #[test]
    fn json_report() {
        let (table, r) = resolved();
        let json = serde_json::to_value(BuildReport::new(&table, &r)).unwrap();
        assert_eq!(json["pass"], serde_json::json!(["mruby-print", "mruby-math"]));
        assert_eq!(json["drop"], serde_json::json!([]));
        assert_eq!(json["bitmap"], serde_json::json!([5]));
    }
}
