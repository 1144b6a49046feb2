//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Walks the AST to compute the exact number of distinct strings it can
//! produce, or `+∞`.

use core::fmt;

use crate::alphabet::ResolvedAlphabet;
use crate::ast::Opcode;
use crate::classes::in_set;

/// Any sum or product at or above this threshold collapses to
/// [`Count::Infinite`] rather than risk overflow on pathological inputs.
const CUTOFF: u128 = 1 << 63;

/// The exact cardinality of a pattern's language: a non-negative integer,
/// or unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Finite(u128),
    Infinite,
}

impl Count {
    /// `true` if this count is known to be strictly less than `n`.
    /// [`Count::Infinite`] is never less than anything.
    pub fn is_less_than(&self, n: u128) -> bool {
        match self {
            Count::Finite(c) => *c < n,
            Count::Infinite => false,
        }
    }

    fn checked_add(self, other: Count) -> Count {
        match (self, other) {
            (Count::Finite(a), Count::Finite(b)) => match a.checked_add(b) {
                Some(sum) if sum < CUTOFF => Count::Finite(sum),
                _ => Count::Infinite,
            },
            _ => Count::Infinite,
        }
    }

    fn checked_mul(self, other: Count) -> Count {
        match (self, other) {
            (Count::Finite(0), _) | (_, Count::Finite(0)) => Count::Finite(0),
            (Count::Finite(a), Count::Finite(b)) => match a.checked_mul(b) {
                Some(product) if product < CUTOFF => Count::Finite(product),
                _ => Count::Infinite,
            },
            _ => Count::Infinite,
        }
    }

    fn checked_pow(self, exp: u32) -> Count {
        match self {
            Count::Finite(0) => Count::Finite(if exp == 0 { 1 } else { 0 }),
            Count::Finite(base) => {
                let mut acc: u128 = 1;
                for _ in 0..exp {
                    match acc.checked_mul(base) {
                        Some(v) if v < CUTOFF => acc = v,
                        _ => return Count::Infinite,
                    }
                }
                Count::Finite(acc)
            }
            Count::Infinite => {
                if exp == 0 {
                    Count::Finite(1)
                } else {
                    Count::Infinite
                }
            }
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Finite(n) => write!(f, "{}", n),
            Count::Infinite => write!(f, "+inf"),
        }
    }
}

/// Computes `count(ast)` under the given alphabet and `max_repeat` cap.
pub(crate) fn count(
    ast: &Opcode,
    alphabet: &ResolvedAlphabet,
    max_repeat: u32,
) -> Count {
    match ast {
        Opcode::Literal(_) | Opcode::GroupRef { .. } => Count::Finite(1),

        Opcode::NotLiteral(_) => {
            Count::Finite(alphabet.printable().len() as u128 - 1)
        }

        Opcode::Any => Count::Finite(alphabet.any().len() as u128),

        Opcode::Range(lo, hi) => {
            Count::Finite((*hi as u32 - *lo as u32 + 1) as u128)
        }

        Opcode::In { items, negated } => {
            Count::Finite(in_set(items, *negated, alphabet).len() as u128)
        }

        Opcode::Category(category) => {
            Count::Finite(alphabet.category(*category).len() as u128)
        }

        Opcode::Branch(alts) => alts
            .iter()
            .map(|alt| count(alt, alphabet, max_repeat))
            .fold(Count::Finite(0), Count::checked_add),

        Opcode::Subpattern { body, .. } => count(body, alphabet, max_repeat),

        Opcode::Assert(_) | Opcode::AssertNot(_) | Opcode::At(_) => {
            Count::Finite(1)
        }

        Opcode::Concat(parts) => parts
            .iter()
            .map(|part| count(part, alphabet, max_repeat))
            .fold(Count::Finite(1), Count::checked_mul),

        Opcode::MaxRepeat { min, max, body } | Opcode::MinRepeat { min, max, body } => {
            count_repeat(*min, *max, body, alphabet, max_repeat)
        }
    }
}

fn count_repeat(
    min: u32,
    max: Option<u32>,
    body: &Opcode,
    alphabet: &ResolvedAlphabet,
    max_repeat: u32,
) -> Count {
    let c = count(body, alphabet, max_repeat);
    let effective_max = max.unwrap_or(max_repeat).max(min);

    match c {
        Count::Finite(0) => Count::Finite(if min == 0 { 1 } else { 0 }),
        Count::Finite(1) if min == effective_max => Count::Finite(1),
        _ => {
            if min == 0 && effective_max == 0 {
                // The only allowed repeat count is zero.
                return Count::Finite(1);
            }
            if c == Count::Infinite {
                return Count::Infinite;
            }
            let mut total = Count::Finite(0);
            for k in min..=effective_max {
                total = total.checked_add(c.checked_pow(k));
                if total == Count::Infinite {
                    return Count::Infinite;
                }
            }
            total
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn count_of(pattern: &str) -> Count {
        let ast = parse(pattern).unwrap();
        let alphabet = ResolvedAlphabet::resolve(None).unwrap();
        count(&ast, &alphabet, 100)
    }

    #[test]
    fn binary_triple() {
        assert_eq!(count_of("[01]{3}"), Count::Finite(8));
    }

    #[test]
    fn alternation_of_literals() {
        assert_eq!(count_of("(yes|no)"), Count::Finite(2));
    }

    #[test]
    fn unbounded_plus_is_infinite() {
        assert_eq!(count_of("\\d+"), Count::Infinite);
    }

    #[test]
    fn zero_width_assertions_dont_affect_count() {
        assert_eq!(count_of("a(?=b)"), Count::Finite(1));
    }

    #[test]
    fn optional_atom_doubles_count() {
        assert_eq!(count_of("a?"), Count::Finite(2));
    }

    #[test]
    fn backreference_is_a_factor_of_one() {
        // (a|b)\1: true distinct count is 2; the documented over-estimate
        // formula also gives 2 (2 alternatives * groupref-factor 1).
        assert_eq!(count_of("(a|b)\\1"), Count::Finite(2));
    }

    #[test]
    fn exact_repeat_count() {
        assert_eq!(count_of("a{4}"), Count::Finite(1));
        assert_eq!(count_of("[ab]{4}"), Count::Finite(16));
    }

    #[test]
    fn variable_width_repeat_of_single_string_body() {
        // "", "a", "aa", "aaa": a single-rendering body still yields
        // effective_max - min + 1 distinct strings when min != max.
        assert_eq!(count_of("a{0,3}"), Count::Finite(4));
    }
}
