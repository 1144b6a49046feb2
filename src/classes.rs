//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shared character-set resolution for `IN` nodes, used by the sampler,
//! counter, and enumerator alike so the three evaluators never disagree on
//! what a class contains.
//!
//! The union is recomputed on every call rather than cached per node: class
//! members are LITERAL/RANGE/CATEGORY leaves, so the union is cheap (a
//! handful of chars at most, since CATEGORY's own table is already a cached
//! lookup in [`crate::alphabet::ResolvedAlphabet`]), and skipping a
//! per-node cache avoids giving the otherwise-immutable `Opcode` tree any
//! interior mutability. See DESIGN.md.

use std::collections::BTreeSet;

use crate::alphabet::ResolvedAlphabet;
use crate::ast::Opcode;

/// The sorted, deduplicated union of an `IN` node's members, honoring
/// `negated`.
pub(crate) fn in_set(
    items: &[Opcode],
    negated: bool,
    alphabet: &ResolvedAlphabet,
) -> Vec<char> {
    let mut union: BTreeSet<char> = BTreeSet::new();
    for item in items {
        match item {
            Opcode::Literal(c) => {
                union.insert(*c);
            }
            Opcode::Range(lo, hi) => {
                for c in (*lo as u32..=*hi as u32).filter_map(char::from_u32) {
                    union.insert(c);
                }
            }
            Opcode::Category(cat) => {
                union.extend(alphabet.category(*cat).iter().copied());
            }
            // The parser never produces any other opcode as a class
            // member, but the type doesn't statically forbid it, so fall
            // back to "contributes nothing" rather than panicking.
            _ => {}
        }
    }

    if !negated {
        union.into_iter().collect()
    } else {
        alphabet
            .printable()
            .iter()
            .copied()
            .filter(|c| !union.contains(c))
            .collect()
    }
}

/// `printable \ {c}`, the set `NOT_LITERAL` draws from.
pub(crate) fn not_literal_set(c: char, alphabet: &ResolvedAlphabet) -> Vec<char> {
    alphabet
        .printable()
        .iter()
        .copied()
        .filter(|&p| p != c)
        .collect()
}
