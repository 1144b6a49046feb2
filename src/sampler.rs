//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Walks the AST to emit one random matching string: a single recursive
//! match over the opcode variant, rendering into an output buffer eagerly
//! rather than building a lazy, shrinkable value tree.

use std::collections::HashMap;

use crate::alphabet::ResolvedAlphabet;
use crate::ast::Opcode;
use crate::classes::{in_set, not_literal_set};
use crate::rng::Rng;

/// Per-emission scratch state: cleared at the start of every top-level
/// `render()` call, never persisted across calls.
#[derive(Default)]
struct GroupTable(HashMap<u32, String>);

impl GroupTable {
    fn store(&mut self, group: u32, value: &str) {
        self.0.insert(group, value.to_string());
    }

    fn lookup(&self, group: u32) -> &str {
        self.0.get(&group).map(String::as_str).unwrap_or("")
    }
}

/// Samples one string matching `ast`.
pub(crate) fn sample(
    ast: &Opcode,
    alphabet: &ResolvedAlphabet,
    max_repeat: u32,
    rng: &mut Rng,
) -> String {
    let mut out = String::new();
    let mut groups = GroupTable::default();
    sample_into(ast, alphabet, max_repeat, rng, &mut groups, &mut out);
    out
}

fn sample_into(
    ast: &Opcode,
    alphabet: &ResolvedAlphabet,
    max_repeat: u32,
    rng: &mut Rng,
    groups: &mut GroupTable,
    out: &mut String,
) {
    match ast {
        Opcode::Literal(c) => out.push(*c),

        Opcode::NotLiteral(c) => {
            let set = not_literal_set(*c, alphabet);
            out.push(*rng.choose(&set));
        }

        Opcode::Any => {
            out.push(*rng.choose(alphabet.any()));
        }

        Opcode::Range(lo, hi) => {
            let lo = *lo as u32;
            let hi = *hi as u32;
            loop {
                let candidate = rng.uniform_inclusive(lo, hi);
                if let Some(c) = char::from_u32(candidate) {
                    out.push(c);
                    break;
                }
                // Surrogate code points aren't valid `char`s; redraw.
            }
        }

        Opcode::In { items, negated } => {
            let set = in_set(items, *negated, alphabet);
            out.push(*rng.choose(&set));
        }

        Opcode::Category(category) => {
            out.push(*rng.choose(alphabet.category(*category)));
        }

        Opcode::Branch(alts) => {
            let chosen = rng.choose(alts).clone();
            sample_into(&chosen, alphabet, max_repeat, rng, groups, out);
        }

        Opcode::Subpattern { group, name: _, body } => {
            let start = out.len();
            sample_into(body, alphabet, max_repeat, rng, groups, out);
            if let Some(group) = group {
                groups.store(*group, &out[start..]);
            }
        }

        Opcode::GroupRef { group } => {
            let text = groups.lookup(*group).to_string();
            out.push_str(&text);
        }

        Opcode::MaxRepeat { min, max, body } => {
            let k = choose_repeat_count(*min, *max, max_repeat, rng, false);
            for _ in 0..k {
                sample_into(body, alphabet, max_repeat, rng, groups, out);
            }
        }

        Opcode::MinRepeat { min, max, body } => {
            let k = choose_repeat_count(*min, *max, max_repeat, rng, true);
            for _ in 0..k {
                sample_into(body, alphabet, max_repeat, rng, groups, out);
            }
        }

        Opcode::Assert(_) | Opcode::AssertNot(_) | Opcode::At(_) => {
            // Zero-width: contributes nothing to the emitted text.
        }

        Opcode::Concat(parts) => {
            for part in parts {
                sample_into(part, alphabet, max_repeat, rng, groups, out);
            }
        }
    }
}

/// Chooses a repetition count in `[min, effective_max]`.
///
/// `lazy == true` always picks `min`, matching `MIN_REPEAT`'s bias toward
/// the shortest match. `lazy == false` (`MAX_REPEAT`) draws uniformly over
/// the whole range.
fn choose_repeat_count(
    min: u32,
    max: Option<u32>,
    max_repeat: u32,
    rng: &mut Rng,
    lazy: bool,
) -> u32 {
    let effective_max = max.unwrap_or(max_repeat).max(min);
    if lazy || effective_max == min {
        min
    } else {
        rng.uniform_inclusive(min, effective_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::rng::Seed;

    fn render(pattern: &str, max_repeat: u32, seed: u64) -> String {
        let ast = parse(pattern).unwrap();
        let alphabet = ResolvedAlphabet::resolve(None).unwrap();
        let mut rng = Rng::from_seed(Seed::Int(seed));
        sample(&ast, &alphabet, max_repeat, &mut rng)
    }

    #[test]
    fn literal_pattern_renders_itself() {
        assert_eq!(render("hello", 100, 1), "hello");
    }

    #[test]
    fn deterministic_for_fixed_seed() {
        assert_eq!(render("\\d{4}", 100, 42), render("\\d{4}", 100, 42));
    }

    #[test]
    fn repeat_length_within_bounds() {
        for seed in 0..32 {
            let s = render("\\w{1,10}", 100, seed);
            assert!(s.chars().count() >= 1 && s.chars().count() <= 10);
        }
    }

    #[test]
    fn backreference_reuses_group_text() {
        for seed in 0..16 {
            let s = render("(?P<x>[ab])-(?P=x)", 100, seed);
            assert!(s == "a-a" || s == "b-b", "got {:?}", s);
        }
    }

    #[test]
    fn unmatched_groupref_emits_empty() {
        // A backreference to a group inside a branch that wasn't taken has
        // nothing stored for it, so it contributes nothing.
        let s = render("(\\1|(a))", 100, 0);
        assert!(s.is_empty() || s == "a");
    }

    #[test]
    fn assertions_contribute_nothing() {
        assert_eq!(render("a(?=b)", 100, 0), "a");
        assert_eq!(render("a(?!b)", 100, 0), "a");
    }
}
