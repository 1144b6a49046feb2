//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The opcode tree that the parser produces and the three evaluators
//! (sampler, counter, enumerator) interpret independently.
//!
//! This tree is deliberately *not* `regex_syntax::hir::Hir`: the parser is
//! self-hosted and must not inherit a host regex library's opcode stream.

use core::fmt;

/// One of the six character categories a shorthand class resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Word,
    NotWord,
    Digit,
    NotDigit,
    Space,
    NotSpace,
}

/// An anchor or zero-width boundary assertion. These contribute no
/// characters to any emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    StartText,
    EndText,
    WordBoundary,
    NotWordBoundary,
}

/// A node of the regex AST.
///
/// Most variants correspond directly to a construct in the supported
/// regex subset, with one addition: [`Opcode::Concat`], a plain sequential
/// container for "this node followed by that node". Sequencing has to live
/// *somewhere* in a recursive-descent AST; this makes it an explicit node
/// rather than special-casing sibling lists.
#[derive(Debug, Clone)]
pub enum Opcode {
    /// `LITERAL c` — emits `c`.
    Literal(char),
    /// `NOT_LITERAL c` — emits any printable code point other than `c`.
    NotLiteral(char),
    /// `ANY` — emits any printable code point except `'\n'`.
    Any,
    /// `RANGE [lo, hi]` — emits one code point in the inclusive range.
    Range(char, char),
    /// `IN` — a character class; emits one member of the union of `items`
    /// (or, if `negated`, one member of the printable set minus that
    /// union).
    In { items: Vec<Opcode>, negated: bool },
    /// `CATEGORY` — resolves to an alphabet-dependent set.
    Category(Category),
    /// `BRANCH` — alternation; emits a match of exactly one alternative.
    Branch(Vec<Opcode>),
    /// `SUBPATTERN` — a (possibly capturing, possibly named) group.
    Subpattern {
        group: Option<u32>,
        name: Option<Box<str>>,
        body: Box<Opcode>,
    },
    /// `GROUPREF` — re-emits the text last captured by group `group`.
    GroupRef { group: u32 },
    /// `MAX_REPEAT(min, max, sub)` — greedy repetition.
    MaxRepeat {
        min: u32,
        max: Option<u32>,
        body: Box<Opcode>,
    },
    /// `MIN_REPEAT(min, max, sub)` — lazy repetition; same cardinality as
    /// `MaxRepeat`, sampler biases toward `min`.
    MinRepeat {
        min: u32,
        max: Option<u32>,
        body: Box<Opcode>,
    },
    /// `ASSERT` — positive lookahead. Contributes nothing to output.
    Assert(Box<Opcode>),
    /// `ASSERT_NOT` — negative lookahead. Contributes nothing.
    AssertNot(Box<Opcode>),
    /// `AT` — an anchor. Contributes nothing.
    At(Anchor),
    /// Sequential composition of zero or more children, left to right.
    Concat(Vec<Opcode>),
}

impl Opcode {
    /// An empty match: the identity element for concatenation.
    pub(crate) fn empty() -> Opcode {
        Opcode::Concat(Vec::new())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Word => "word",
            Category::NotWord => "not_word",
            Category::Digit => "digit",
            Category::NotDigit => "not_digit",
            Category::Space => "space",
            Category::NotSpace => "not_space",
        };
        f.write_str(s)
    }
}
