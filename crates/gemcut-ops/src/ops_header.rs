//! Operation: generate the C header the host build compiles against.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use gemcut_core::gem::GemTable;
use gemcut_core::SELF_GEM;
use gemcut_resolver::bitmap::WORD_BITS;
use gemcut_resolver::diagnostics::Diagnostics;
use gemcut_resolver::resolver::ModelResolution;
use gemcut_util::errors::GemcutError;
use gemcut_util::status::status;

use crate::{load_manifest, print_warnings, resolve_build};

/// Options for `gemcut header`.
#[derive(Debug, Default)]
pub struct HeaderOptions {
    pub build: String,
    /// Write here instead of stdout.
    pub output: Option<PathBuf>,
}

/// Quote `s` as a C string literal.
fn c_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for b in s.bytes() {
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            // Three octal digits, so a following digit never joins the escape.
            _ => {
                let _ = write!(out, "\\{b:03o}");
            }
        }
    }
    out.push('"');
    out
}

/// Render the gem table and available bitmap of a resolved build as C.
///
/// Every gem in the table gets an `mgems_list` entry; `available` is set for
/// members of the pass set.
pub fn render_header(context: &str, table: &GemTable, resolution: &ModelResolution) -> String {
    let words = resolution.bitmap.words();
    // C arrays cannot be empty.
    let units = words.len().max(1);
    let self_id = table
        .lookup(SELF_GEM)
        .map(|i| i as i64)
        .unwrap_or(-1);

    let mut out = String::new();
    let context = context.replace("*/", "* /");
    let _ = writeln!(out, "/* Generated by gemcut for {context}. Do not edit. */");
    out.push_str("#ifndef MRUBY_GEMCUT_DEPS_H\n#define MRUBY_GEMCUT_DEPS_H 1\n\n");
    out.push_str("#include <stdint.h>\n\n");
    let _ = writeln!(out, "#define MGEMS_POPULATION {}", table.len());
    let _ = writeln!(out, "#define MGEMS_UNIT_BITS {WORD_BITS}");
    let _ = writeln!(out, "#define MGEMS_BITMAP_UNITS {units}");
    let _ = writeln!(out, "#define MRUBY_GEMCUT_ID {self_id}");
    out.push_str("\ntypedef uint32_t bitmap_unit;\n\n");

    for entry in table.entries() {
        let _ = writeln!(out, "void mrb_{}_gem_init(mrb_state *mrb);", entry.cname);
        let _ = writeln!(out, "void mrb_{}_gem_final(mrb_state *mrb);", entry.cname);
    }
    if !table.is_empty() {
        out.push('\n');
    }

    for (idx, entry) in table.entries().iter().enumerate() {
        if entry.deps.is_empty() {
            continue;
        }
        let deps: Vec<String> = entry.deps.iter().map(|d| d.to_string()).collect();
        let _ = writeln!(
            out,
            "static const uint16_t mgems_deps_{idx}[] = {{ {} }};",
            deps.join(", ")
        );
    }

    if table.is_empty() {
        // C arrays cannot be empty; lookups are bounded by MGEMS_POPULATION.
        out.push_str("\nstatic const struct mgem_spec mgems_list[1] = {\n");
        out.push_str("  { NULL, NULL, NULL, 0, 0, NULL },\n");
    } else {
        out.push_str("\nstatic const struct mgem_spec mgems_list[MGEMS_POPULATION] = {\n");
    }
    for (idx, entry) in table.entries().iter().enumerate() {
        let deps = if entry.deps.is_empty() {
            "NULL".to_string()
        } else {
            format!("mgems_deps_{idx}")
        };
        let _ = writeln!(
            out,
            "  {{ {}, mrb_{cname}_gem_init, mrb_{cname}_gem_final, {}, {}, {deps} }},",
            c_string_literal(&entry.name),
            u8::from(resolution.pass.contains(idx)),
            entry.deps.len(),
            cname = entry.cname,
        );
    }
    out.push_str("};\n\n");

    let mut unit_values: Vec<String> = words.iter().map(|w| format!("0x{w:08x}")).collect();
    if unit_values.is_empty() {
        unit_values.push("0x00000000".to_string());
    }
    let _ = writeln!(
        out,
        "static const bitmap_unit mgems_available[MGEMS_BITMAP_UNITS] = {{ {} }};",
        unit_values.join(", ")
    );
    out.push_str("\n#endif /* MRUBY_GEMCUT_DEPS_H */\n");
    out
}

/// Resolve one build and write its header.
pub fn header(manifest_path: &Path, opts: &HeaderOptions) -> miette::Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let mut diagnostics = Diagnostics::new();
    let (table, resolution) = resolve_build(&manifest, &opts.build, &mut diagnostics)?;
    print_warnings(&diagnostics);

    let context = format!("build.{}", opts.build);
    let text = render_header(&context, &table, &resolution);

    match &opts.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(GemcutError::Io)?;
            }
            std::fs::write(path, text).map_err(GemcutError::Io)?;
            status("Generated", &path.display().to_string());
        }
        None => print!("{text}"),
    }

    Ok(())
}
