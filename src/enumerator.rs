//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Walks the AST to produce a lazy, deterministically-ordered sequence of
//! every distinct matching string.
//!
//! Concatenation is a Cartesian product with the left child as the outer
//! loop. We build it by folding sibling nodes together with
//! `Iterator::flat_map` rather than hand-rolling a custom `Iterator` state
//! machine, since `flat_map` already gives us "recreate the inner iterator
//! fresh for every outer item" for free — exactly what letting a later
//! `GROUPREF` observe a `SUBPATTERN`'s current assignment requires.

use std::cell::RefCell;
use std::collections::HashMap;
use std::iter;
use std::rc::Rc;

use crate::alphabet::ResolvedAlphabet;
use crate::ast::Opcode;
use crate::classes::{in_set, not_literal_set};

type Groups = Rc<RefCell<HashMap<u32, String>>>;

/// Enumerates every distinct string `ast` can produce, in a fixed
/// deterministic order. `limit` overrides the effective cap an unbounded
/// `MAX_REPEAT`/`MIN_REPEAT` uses in place of `max_repeat`.
pub(crate) fn enumerate<'a>(
    ast: &'a Opcode,
    alphabet: &'a ResolvedAlphabet,
    limit: u32,
) -> Box<dyn Iterator<Item = String> + 'a> {
    let groups: Groups = Rc::new(RefCell::new(HashMap::new()));
    enumerate_opcode(ast, alphabet, limit, groups)
}

fn enumerate_opcode<'a>(
    ast: &'a Opcode,
    alphabet: &'a ResolvedAlphabet,
    limit: u32,
    groups: Groups,
) -> Box<dyn Iterator<Item = String> + 'a> {
    match ast {
        Opcode::Literal(c) => Box::new(iter::once(c.to_string())),

        Opcode::NotLiteral(c) => {
            let set = not_literal_set(*c, alphabet);
            Box::new(set.into_iter().map(|c| c.to_string()))
        }

        Opcode::Any => Box::new(alphabet.any().iter().map(|c| c.to_string())),

        Opcode::Range(lo, hi) => {
            let lo = *lo as u32;
            let hi = *hi as u32;
            Box::new(
                (lo..=hi)
                    .filter_map(char::from_u32)
                    .map(|c| c.to_string()),
            )
        }

        Opcode::In { items, negated } => {
            let set = in_set(items, *negated, alphabet);
            Box::new(set.into_iter().map(|c| c.to_string()))
        }

        Opcode::Category(category) => {
            Box::new(alphabet.category(*category).iter().map(|c| c.to_string()))
        }

        Opcode::Branch(alts) => Box::new(alts.iter().flat_map(move |alt| {
            enumerate_opcode(alt, alphabet, limit, groups.clone())
        })),

        Opcode::Subpattern { group, body, .. } => {
            let inner = enumerate_opcode(body, alphabet, limit, groups.clone());
            match group {
                Some(number) => {
                    let number = *number;
                    Box::new(inner.map(move |value| {
                        groups.borrow_mut().insert(number, value.clone());
                        value
                    }))
                }
                None => inner,
            }
        }

        Opcode::GroupRef { group } => {
            let number = *group;
            // Read lazily: this closure only runs once `.next()` is pulled,
            // by which point any earlier sibling's SUBPATTERN assignment
            // for this combination has already been written.
            Box::new(iter::once_with(move || {
                groups.borrow().get(&number).cloned().unwrap_or_default()
            }))
        }

        Opcode::Assert(_) | Opcode::AssertNot(_) | Opcode::At(_) => {
            Box::new(iter::once(String::new()))
        }

        Opcode::Concat(parts) => enumerate_concat(parts, alphabet, limit, groups),

        Opcode::MaxRepeat { min, max, body } | Opcode::MinRepeat { min, max, body } => {
            enumerate_repeat(*min, *max, body, alphabet, limit, groups)
        }
    }
}

fn enumerate_concat<'a>(
    parts: &'a [Opcode],
    alphabet: &'a ResolvedAlphabet,
    limit: u32,
    groups: Groups,
) -> Box<dyn Iterator<Item = String> + 'a> {
    parts.iter().fold(
        Box::new(iter::once(String::new())) as Box<dyn Iterator<Item = String> + 'a>,
        move |acc, part| {
            let groups = groups.clone();
            Box::new(acc.flat_map(move |prefix| {
                enumerate_opcode(part, alphabet, limit, groups.clone())
                    .map(move |suffix| format!("{}{}", prefix, suffix))
            }))
        },
    )
}

fn enumerate_repeat<'a>(
    min: u32,
    max: Option<u32>,
    body: &'a Opcode,
    alphabet: &'a ResolvedAlphabet,
    limit: u32,
    groups: Groups,
) -> Box<dyn Iterator<Item = String> + 'a> {
    let effective_max = max.unwrap_or(limit).max(min);
    let counts: Vec<u32> = (min..=effective_max).collect();
    Box::new(counts.into_iter().flat_map(move |k| {
        let groups = groups.clone();
        (0..k).fold(
            Box::new(iter::once(String::new())) as Box<dyn Iterator<Item = String> + 'a>,
            move |acc, _| {
                let groups = groups.clone();
                Box::new(acc.flat_map(move |prefix| {
                    enumerate_opcode(body, alphabet, limit, groups.clone())
                        .map(move |suffix| format!("{}{}", prefix, suffix))
                }))
            },
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn enumerate_all(pattern: &str, limit: u32) -> Vec<String> {
        let ast = parse(pattern).unwrap();
        let alphabet = ResolvedAlphabet::resolve(None).unwrap();
        enumerate(&ast, &alphabet, limit).collect()
    }

    #[test]
    fn pairs_in_lexicographic_order() {
        assert_eq!(
            enumerate_all("[ab]{2}", 100),
            vec!["aa", "ab", "ba", "bb"]
        );
    }

    #[test]
    fn alternation_preserves_branch_order() {
        assert_eq!(enumerate_all("(yes|no)", 100), vec!["yes", "no"]);
    }

    #[test]
    fn range_is_ascending() {
        assert_eq!(enumerate_all("[0-3]", 100), vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn backreference_follows_its_group() {
        let mut all = enumerate_all("(?P<x>[ab])-(?P=x)", 100);
        all.sort();
        assert_eq!(all, vec!["a-a", "b-b"]);
    }

    #[test]
    fn duplicate_derivations_are_not_deduplicated() {
        assert_eq!(enumerate_all("(a|a)", 100), vec!["a", "a"]);
    }

    #[test]
    fn unbounded_repeat_respects_limit() {
        let all = enumerate_all("a*", 3);
        assert_eq!(all, vec!["", "a", "aa", "aaa"]);
    }
}
