//! Sorted, deduplicated gem index sets and the shared worklist closure.

use std::collections::VecDeque;

use gemcut_core::gem::GemTable;
use serde::Serialize;

/// Gem indices in ascending order without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResolvedSet(Vec<usize>);

impl ResolvedSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Every index in `0..len` that is not in `excluded`.
    pub fn all_except(len: usize, excluded: &ResolvedSet) -> Self {
        Self((0..len).filter(|i| !excluded.contains(*i)).collect())
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, idx: usize) -> bool {
        self.0.binary_search(&idx).is_ok()
    }

    /// Members present in both sets.
    pub fn intersection(&self, other: &ResolvedSet) -> ResolvedSet {
        let (mut a, mut b) = (self.0.iter().peekable(), other.0.iter().peekable());
        let mut out = Vec::new();
        while let (Some(&&x), Some(&&y)) = (a.peek(), b.peek()) {
            match x.cmp(&y) {
                std::cmp::Ordering::Less => {
                    a.next();
                }
                std::cmp::Ordering::Greater => {
                    b.next();
                }
                std::cmp::Ordering::Equal => {
                    out.push(x);
                    a.next();
                    b.next();
                }
            }
        }
        Self(out)
    }

    /// Gem names of the members, in index order.
    pub fn names<'t>(&self, table: &'t GemTable) -> Vec<&'t str> {
        self.iter().map(|i| table.name(i)).collect()
    }
}

impl FromIterator<usize> for ResolvedSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut v: Vec<usize> = iter.into_iter().collect();
        v.sort_unstable();
        v.dedup();
        Self(v)
    }
}

impl<'a> IntoIterator for &'a ResolvedSet {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}

/// Expand `seeds` along the edges produced by `step` until nothing new turns up.
///
/// An index is queued at most once: `seen` covers both the accumulated set
/// and the pending queue, so cycles terminate.
pub(crate) fn worklist_closure<F, I>(seeds: &[usize], universe: usize, mut step: F) -> ResolvedSet
where
    F: FnMut(usize) -> I,
    I: IntoIterator<Item = usize>,
{
    let mut seen = vec![false; universe];
    let mut queue = VecDeque::with_capacity(seeds.len());
    for &seed in seeds {
        if !seen[seed] {
            seen[seed] = true;
            queue.push_back(seed);
        }
    }

    let mut accumulated = Vec::new();
    while let Some(idx) = queue.pop_front() {
        accumulated.push(idx);
        for next in step(idx) {
            if !seen[next] {
                seen[next] = true;
                queue.push_back(next);
            }
        }
    }

    accumulated.into_iter().collect()
}
