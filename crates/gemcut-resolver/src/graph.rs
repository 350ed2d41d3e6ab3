//! Text rendering of gem dependency trees.

use std::collections::HashSet;

use gemcut_core::gem::GemTable;

use crate::set::ResolvedSet;

/// Render the gems of `pass` as dependency trees.
///
/// Roots are the members no other member depends on; when every member sits
/// on a cycle, all members are roots. A gem whose dependencies were already
/// shown is marked `(*)` and not expanded again, which also stops cycles.
pub fn render_tree(table: &GemTable, pass: &ResolvedSet, max_depth: Option<usize>) -> String {
    let mut output = String::new();

    let mut roots: Vec<usize> = pass
        .iter()
        .filter(|&idx| !table.dependents_of(idx).iter().any(|&d| pass.contains(d)))
        .collect();
    if roots.is_empty() {
        roots = pass.iter().collect();
    }

    let mut shown = HashSet::new();
    let count = roots.len();
    for (i, idx) in roots.into_iter().enumerate() {
        let is_last = i == count - 1;
        print_subtree(table, &mut output, idx, "", is_last, 1, max_depth, &mut shown);
    }

    output
}

#[allow(clippy::too_many_arguments)]
fn print_subtree(
    table: &GemTable,
    output: &mut String,
    idx: usize,
    prefix: &str,
    is_last: bool,
    depth: usize,
    max_depth: Option<usize>,
    shown: &mut HashSet<usize>,
) {
    let connector = if is_last { "└── " } else { "├── " };
    let deps = table.dependencies_of(idx);
    let at_limit = max_depth.is_some_and(|max| depth >= max);

    if !at_limit && !deps.is_empty() && !shown.insert(idx) {
        output.push_str(&format!("{prefix}{connector}{} (*)\n", table.name(idx)));
        return;
    }
    output.push_str(&format!("{prefix}{connector}{}\n", table.name(idx)));
    if at_limit {
        return;
    }

    let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
    let count = deps.len();
    for (i, &child) in deps.iter().enumerate() {
        let is_last = i == count - 1;
        print_subtree(
            table,
            output,
            child,
            &child_prefix,
            is_last,
            depth + 1,
            max_depth,
            shown,
        );
    }
}

/// Render everything that transitively depends on `name`.
///
/// Returns `None` if the gem is not in the table.
pub fn render_inverted_tree(table: &GemTable, name: &str) -> Option<String> {
    let idx = table.lookup(name)?;
    let mut output = format!("{}\n", table.name(idx));

    let mut shown = HashSet::new();
    shown.insert(idx);

    let dependents = table.dependents_of(idx);
    let count = dependents.len();
    for (i, dep_idx) in dependents.into_iter().enumerate() {
        let is_last = i == count - 1;
        print_inverted_subtree(table, &mut output, dep_idx, "", is_last, &mut shown);
    }

    Some(output)
}

fn print_inverted_subtree(
    table: &GemTable,
    output: &mut String,
    idx: usize,
    prefix: &str,
    is_last: bool,
    shown: &mut HashSet<usize>,
) {
    let connector = if is_last { "└── " } else { "├── " };
    let dependents = table.dependents_of(idx);

    if !dependents.is_empty() && !shown.insert(idx) {
        output.push_str(&format!("{prefix}{connector}{} (*)\n", table.name(idx)));
        return;
    }
    output.push_str(&format!("{prefix}{connector}{}\n", table.name(idx)));

    let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
    let count = dependents.len();
    for (i, dep_idx) in dependents.into_iter().enumerate() {
        let is_last = i == count - 1;
        print_inverted_subtree(table, output, dep_idx, &child_prefix, is_last, shown);
    }
}
