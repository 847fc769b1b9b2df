// SPDX-License-Identifier: MIT

//! Change detection over program listings.

use crate::models::Program;
use std::collections::BTreeSet;

/// Return the programs whose id has not been seen before, sorted by id
/// ascending.
///
/// Pure set difference: the result is deterministic regardless of the
/// order of `current`, and contains no duplicates. An empty `current`
/// yields an empty result.
pub fn new_programs(known: &BTreeSet<String>, current: &[Program]) -> Vec<Program> {
    let mut fresh: Vec<Program> = current
        .iter()
        .filter(|p| !known.contains(&p.id))
        .cloned()
        .collect();
    fresh.sort_by(|a, b| a.id.cmp(&b.id));
    fresh.dedup_by(|a, b| a.id == b.id);
    fresh
}
