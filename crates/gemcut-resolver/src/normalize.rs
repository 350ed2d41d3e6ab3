//! Policy normalization: one shape for the resolvers to dispatch on.

use std::collections::BTreeSet;

use gemcut_core::gem::GemTable;
use gemcut_core::policy::PolicyValue;

/// Blanket resolution that needs no name lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    All,
    None,
}

/// A policy reduced to either a blanket mode or closure seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized<'p> {
    Mode(Mode),
    /// Resolved seed indices plus the names the table does not know.
    /// Both are deduplicated and in name order.
    Seeds {
        seeds: Vec<usize>,
        missing: Vec<&'p str>,
    },
}

/// Reduce `policy` against `table`.
///
/// `Unspecified` becomes an empty seed list; only `Explicit` touches the name index.
pub fn normalize<'p>(policy: &'p PolicyValue, table: &GemTable) -> Normalized<'p> {
    match policy {
        PolicyValue::All => Normalized::Mode(Mode::All),
        PolicyValue::None => Normalized::Mode(Mode::None),
        PolicyValue::Unspecified => Normalized::Seeds {
            seeds: Vec::new(),
            missing: Vec::new(),
        },
        PolicyValue::Explicit(names) => {
            let unique: BTreeSet<&str> = names.iter().map(String::as_str).collect();
            let mut seeds = Vec::with_capacity(unique.len());
            let mut missing = Vec::new();
            for name in unique {
                match table.lookup(name) {
                    Some(idx) => seeds.push(idx),
                    None => missing.push(name),
                }
            }
            Normalized::Seeds { seeds, missing }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemcut_core::gem::GemEntry;

    fn table() -> GemTable {
        GemTable::new(vec![
            GemEntry::new("mruby-print", vec![]),
            GemEntry::new("mruby-math", vec![0]),
        ])
        .unwrap()
    }

    #[test]
    fn blanket_shapes_skip_lookup() {
        let t = table();
        assert_eq!(normalize(&PolicyValue::All, &t), Normalized::Mode(Mode::All));
        assert_eq!(normalize(&PolicyValue::None, &t), Normalized::Mode(Mode::None));
    }

    #[test]
    fn unspecified_is_empty_seed_list() {
        assert_eq!(
            normalize(&PolicyValue::Unspecified, &table()),
            Normalized::Seeds {
                seeds: vec![],
                missing: vec![]
            }
        );
    }

    #[test]
    fn explicit_dedups_and_splits_missing() {
        let policy = PolicyValue::explicit(["mruby-math", "mruby-io", "mruby-math", "mruby-print"]);
        assert_eq!(
            normalize(&policy, &table()),
            Normalized::Seeds {
                seeds: vec![1, 0],
                missing: vec!["mruby-io"]
            }
        );
    }
}
