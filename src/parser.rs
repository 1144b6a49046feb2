//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A hand-written recursive-descent parser that turns a regex source
//! string directly into the [`crate::ast::Opcode`] tree. It does not go
//! through `regex-syntax` or any other host regex engine's own AST/HIR;
//! `regex` remains available only as a dev-dependency, used in this
//! crate's tests to cross-check generated values against `regex::Regex`.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::ast::{Anchor, Category, Opcode};
use crate::error::{PatternError, Result};

/// Parses `source` into the root AST node.
///
/// Fails with [`crate::Error::Pattern`] if `source` cannot be parsed under
/// the supported subset: lookbehind, conditional patterns `(?(id)...)`,
/// atomic groups, and possessive quantifiers are rejected, as are inline
/// mode flags and any other unsupported `(?...)` construct.
pub fn parse(source: &str) -> Result<Opcode> {
    let mut p = Parser::new(source);
    let ast = p.parse_alternation()?;
    if let Some((offset, c)) = p.chars.peek().copied() {
        return Err(p.err(offset, format!("unexpected trailing character {:?}", c)));
    }
    Ok(ast)
}

struct Parser<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    /// Number of capturing groups seen so far (numbered left-to-right by
    /// opening paren, matching the usual regex convention).
    group_count: u32,
    /// Named groups, resolved as they're opened so that `(?P=name)` and
    /// forward uses within the same pattern can look them up.
    names: HashMap<String, u32>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Parser {
            source,
            chars: source.char_indices().peekable(),
            group_count: 0,
            names: HashMap::new(),
        }
    }

    fn err(&self, offset: usize, message: impl Into<String>) -> crate::Error {
        PatternError::new(self.source, offset, message).into()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn peek_offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(i, _)| i)
            .unwrap_or(self.source.len())
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn eat(&mut self, expect: char) -> bool {
        if self.peek_char() == Some(expect) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expect: char) -> Result<()> {
        let offset = self.peek_offset();
        if self.eat(expect) {
            Ok(())
        } else {
            Err(self.err(offset, format!("expected {:?}", expect)))
        }
    }

    // alternation := concat ('|' concat)*
    fn parse_alternation(&mut self) -> Result<Opcode> {
        let mut alts = vec![self.parse_concat()?];
        while self.eat('|') {
            alts.push(self.parse_concat()?);
        }
        Ok(if alts.len() == 1 {
            alts.pop().unwrap()
        } else {
            Opcode::Branch(alts)
        })
    }

    // concat := quantified*, stopping at '|' or ')' or end-of-input
    fn parse_concat(&mut self) -> Result<Opcode> {
        let mut parts = Vec::new();
        loop {
            match self.peek_char() {
                None | Some('|') | Some(')') => break,
                _ => parts.push(self.parse_quantified()?),
            }
        }
        Ok(match parts.len() {
            0 => Opcode::empty(),
            1 => parts.pop().unwrap(),
            _ => Opcode::Concat(parts),
        })
    }

    // quantified := atom quantifier?
    fn parse_quantified(&mut self) -> Result<Opcode> {
        let atom = self.parse_atom()?;
        self.parse_quantifier(atom)
    }

    fn parse_quantifier(&mut self, atom: Opcode) -> Result<Opcode> {
        let offset = self.peek_offset();
        let bounds = match self.peek_char() {
            Some('*') => {
                self.bump();
                Some((0, None))
            }
            Some('+') => {
                self.bump();
                Some((1, None))
            }
            Some('?') => {
                self.bump();
                Some((0, Some(1)))
            }
            Some('{') => self.try_parse_brace_quantifier(offset)?,
            _ => None,
        };
        let Some((min, max)) = bounds else {
            return Ok(atom);
        };
        if let Some(max) = max {
            if max < min {
                return Err(self.err(
                    offset,
                    format!("quantifier max {} is less than min {}", max, min),
                ));
            }
        }
        let lazy = self.eat('?');
        if self.peek_char() == Some('+') {
            return Err(self.err(
                self.peek_offset(),
                "possessive quantifiers are not supported",
            ));
        }
        let body = Box::new(atom);
        Ok(if lazy {
            Opcode::MinRepeat { min, max, body }
        } else {
            Opcode::MaxRepeat { min, max, body }
        })
    }

    /// Attempts to parse `{n}`, `{n,}` or `{n,m}` starting at the current
    /// `{`. A `{` that doesn't form a valid bound is treated as a literal
    /// (matching the common regex convention), so this returns `Ok(None)`
    /// without consuming input rather than erroring.
    fn try_parse_brace_quantifier(
        &mut self,
        start: usize,
    ) -> Result<Option<(u32, Option<u32>)>> {
        let mut lookahead = self.chars.clone();
        lookahead.next(); // consume '{'

        let mut digits1 = String::new();
        while let Some(&(_, c)) = lookahead.peek() {
            if c.is_ascii_digit() {
                digits1.push(c);
                lookahead.next();
            } else {
                break;
            }
        }

        let min = if digits1.is_empty() {
            None
        } else {
            Some(digits1.parse::<u32>().map_err(|_| {
                self.err(start, "repetition count overflowed u32")
            })?)
        };

        let mut has_comma = false;
        let mut digits2 = String::new();
        if lookahead.peek().map(|&(_, c)| c) == Some(',') {
            has_comma = true;
            lookahead.next();
            while let Some(&(_, c)) = lookahead.peek() {
                if c.is_ascii_digit() {
                    digits2.push(c);
                    lookahead.next();
                } else {
                    break;
                }
            }
        }

        if min.is_none() && !has_comma {
            // Neither `{n` nor `{,` — not a quantifier at all.
            return Ok(None);
        }
        if lookahead.peek().map(|&(_, c)| c) != Some('}') {
            return Ok(None);
        }
        lookahead.next(); // consume '}'

        // Commit: replay the lookahead onto the real cursor.
        self.chars = lookahead;

        let min = min.unwrap_or(0);
        let max = if !has_comma {
            Some(min)
        } else if digits2.is_empty() {
            None
        } else {
            Some(digits2.parse::<u32>().map_err(|_| {
                self.err(start, "repetition count overflowed u32")
            })?)
        };
        Ok(Some((min, max)))
    }

    fn parse_atom(&mut self) -> Result<Opcode> {
        let offset = self.peek_offset();
        match self.bump() {
            None => Err(self.err(offset, "unexpected end of pattern")),
            Some((_, '.')) => Ok(Opcode::Any),
            Some((_, '^')) => Ok(Opcode::At(Anchor::StartText)),
            Some((_, '$')) => Ok(Opcode::At(Anchor::EndText)),
            Some((_, '(')) => self.parse_group(offset),
            Some((_, '[')) => self.parse_class(offset),
            Some((_, '\\')) => self.parse_escape(offset),
            Some((_, c)) if c == '*' || c == '+' || c == '?' => Err(self.err(
                offset,
                format!("quantifier {:?} with nothing to repeat", c),
            )),
            Some((_, c)) => Ok(Opcode::Literal(c)),
        }
    }

    fn parse_group(&mut self, open_offset: usize) -> Result<Opcode> {
        if self.eat('?') {
            return self.parse_special_group(open_offset);
        }
        self.group_count += 1;
        let number = self.group_count;
        let body = self.parse_alternation()?;
        self.expect(')')?;
        Ok(Opcode::Subpattern {
            group: Some(number),
            name: None,
            body: Box::new(body),
        })
    }

    fn parse_special_group(&mut self, open_offset: usize) -> Result<Opcode> {
        match self.peek_char() {
            Some(':') => {
                self.bump();
                let body = self.parse_alternation()?;
                self.expect(')')?;
                Ok(Opcode::Subpattern {
                    group: None,
                    name: None,
                    body: Box::new(body),
                })
            }
            Some('=') => {
                self.bump();
                let body = self.parse_alternation()?;
                self.expect(')')?;
                Ok(Opcode::Assert(Box::new(body)))
            }
            Some('!') => {
                self.bump();
                let body = self.parse_alternation()?;
                self.expect(')')?;
                Ok(Opcode::AssertNot(Box::new(body)))
            }
            Some('P') => {
                self.bump();
                match self.peek_char() {
                    Some('<') => {
                        self.bump();
                        let name = self.parse_group_name()?;
                        self.expect('>')?;
                        self.group_count += 1;
                        let number = self.group_count;
                        self.names.insert(name.clone(), number);
                        let body = self.parse_alternation()?;
                        self.expect(')')?;
                        Ok(Opcode::Subpattern {
                            group: Some(number),
                            name: Some(name.into_boxed_str()),
                            body: Box::new(body),
                        })
                    }
                    Some('=') => {
                        self.bump();
                        let name = self.parse_group_name()?;
                        self.expect(')')?;
                        let number = *self.names.get(&name).ok_or_else(|| {
                            self.err(
                                open_offset,
                                format!("unknown group name {:?}", name),
                            )
                        })?;
                        Ok(Opcode::GroupRef { group: number })
                    }
                    _ => Err(self.err(
                        open_offset,
                        "expected '<' or '=' after '(?P'",
                    )),
                }
            }
            Some('<') => Err(self.err(
                open_offset,
                "lookbehind assertions are not supported",
            )),
            Some('(') => Err(self.err(
                open_offset,
                "conditional patterns are not supported",
            )),
            Some('>') => Err(self.err(
                open_offset,
                "atomic groups are not supported",
            )),
            _ => Err(self.err(
                open_offset,
                "unsupported or unrecognized '(?...)' group syntax",
            )),
        }
    }

    fn parse_group_name(&mut self) -> Result<String> {
        let offset = self.peek_offset();
        let mut name = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if name.is_empty() {
            return Err(self.err(offset, "expected a group name"));
        }
        Ok(name)
    }

    fn parse_escape(&mut self, backslash_offset: usize) -> Result<Opcode> {
        let offset = self.peek_offset();
        let (_, c) = self
            .bump()
            .ok_or_else(|| self.err(offset, "dangling backslash"))?;
        match c {
            'd' => Ok(Opcode::Category(Category::Digit)),
            'D' => Ok(Opcode::Category(Category::NotDigit)),
            'w' => Ok(Opcode::Category(Category::Word)),
            'W' => Ok(Opcode::Category(Category::NotWord)),
            's' => Ok(Opcode::Category(Category::Space)),
            'S' => Ok(Opcode::Category(Category::NotSpace)),
            'b' => Ok(Opcode::At(Anchor::WordBoundary)),
            'B' => Ok(Opcode::At(Anchor::NotWordBoundary)),
            'n' => Ok(Opcode::Literal('\n')),
            't' => Ok(Opcode::Literal('\t')),
            'r' => Ok(Opcode::Literal('\r')),
            'f' => Ok(Opcode::Literal('\x0C')),
            'v' => Ok(Opcode::Literal('\x0B')),
            '0' => Ok(Opcode::Literal('\0')),
            '1'..='9' => {
                let mut digits = String::new();
                digits.push(c);
                if let Some(d2) = self.peek_char() {
                    if d2.is_ascii_digit() {
                        digits.push(d2);
                        self.bump();
                    }
                }
                let number: u32 = digits.parse().unwrap();
                Ok(Opcode::GroupRef { group: number })
            }
            c if c.is_ascii_alphanumeric() => Err(self.err(
                backslash_offset,
                format!("unsupported escape \\{}", c),
            )),
            c => Ok(Opcode::Literal(c)),
        }
    }

    // Character class contents, after the opening '['.
    fn parse_class(&mut self, open_offset: usize) -> Result<Opcode> {
        let negated = self.eat('^');
        let mut items = Vec::new();
        let mut first = true;
        loop {
            match self.peek_char() {
                None => {
                    return Err(self.err(open_offset, "unterminated character class"))
                }
                Some(']') if !first => {
                    self.bump();
                    break;
                }
                _ => {
                    let member = self.parse_class_member(first)?;
                    items.push(member);
                }
            }
            first = false;
        }
        if items.is_empty() {
            return Err(self.err(open_offset, "empty character class"));
        }
        Ok(Opcode::In { items, negated })
    }

    fn parse_class_char(&mut self) -> Result<char> {
        let offset = self.peek_offset();
        match self.bump() {
            None => Err(self.err(offset, "unterminated character class")),
            Some((_, '\\')) => {
                let (_, c) = self
                    .bump()
                    .ok_or_else(|| self.err(offset, "dangling backslash"))?;
                Ok(match c {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    'f' => '\x0C',
                    'v' => '\x0B',
                    '0' => '\0',
                    other => other,
                })
            }
            Some((_, c)) => Ok(c),
        }
    }

    fn parse_class_member(&mut self, first: bool) -> Result<Opcode> {
        // Shorthand classes are valid class members in their own right,
        // alongside plain literals and ranges.
        if self.peek_char() == Some('\\') {
            let mut lookahead = self.chars.clone();
            lookahead.next();
            if let Some(&(_, next)) = lookahead.peek() {
                let category = match next {
                    'd' => Some(Category::Digit),
                    'D' => Some(Category::NotDigit),
                    'w' => Some(Category::Word),
                    'W' => Some(Category::NotWord),
                    's' => Some(Category::Space),
                    'S' => Some(Category::NotSpace),
                    _ => None,
                };
                if let Some(category) = category {
                    self.chars = lookahead;
                    self.bump();
                    return Ok(Opcode::Category(category));
                }
            }
        }

        let _ = first; // `]` handling already applied by the caller
        let lo = self.parse_class_char()?;
        if self.peek_char() == Some('-') {
            let mut lookahead = self.chars.clone();
            lookahead.next();
            if lookahead.peek().map(|&(_, c)| c) != Some(']')
                && lookahead.peek().is_some()
            {
                self.bump(); // consume '-'
                let hi = self.parse_class_char()?;
                return Ok(Opcode::Range(lo, hi));
            }
        }
        Ok(Opcode::Literal(lo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(pattern: &str) -> Opcode {
        parse(pattern).unwrap_or_else(|e| panic!("{} failed to parse: {}", pattern, e))
    }

    fn err(pattern: &str) {
        assert!(parse(pattern).is_err(), "{} unexpectedly parsed", pattern);
    }

    #[test]
    fn literals_and_concat() {
        match ok("abc") {
            Opcode::Concat(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected Concat, got {:?}", other),
        }
    }

    #[test]
    fn alternation() {
        match ok("a|b|c") {
            Opcode::Branch(alts) => assert_eq!(alts.len(), 3),
            other => panic!("expected Branch, got {:?}", other),
        }
    }

    #[test]
    fn quantifiers() {
        ok("a*");
        ok("a+");
        ok("a?");
        ok("a{3}");
        ok("a{2,5}");
        ok("a{2,}");
        ok("a*?");
        ok("a{2,5}?");
    }

    #[test]
    fn quantifier_bounds_validated() {
        err("a{5,2}");
    }

    #[test]
    fn char_classes() {
        ok("[abc]");
        ok("[a-z]");
        ok("[^a-z]");
        ok("[\\d\\s-]");
        err("[abc");
        err("[]");
    }

    #[test]
    fn groups_and_backreferences() {
        ok("(a)(b)\\1\\2");
        ok("(?P<x>a)(?P=x)");
        err("(?P=unknown)");
    }

    #[test]
    fn lookahead_supported_lookbehind_rejected() {
        ok("a(?=b)");
        ok("a(?!b)");
        err("a(?<=b)");
        err("a(?<!b)");
    }

    #[test]
    fn unsupported_constructs_rejected() {
        err("(?(1)a|b)");
        err("(?>a)");
        err("a*+");
        err("a++");
    }

    #[test]
    fn anchors_parse() {
        ok("^abc$");
        ok("a\\bb\\Bc");
    }

    #[test]
    fn non_capturing_groups() {
        match ok("(?:ab)+") {
            Opcode::MaxRepeat { .. } => {}
            other => panic!("expected MaxRepeat, got {:?}", other),
        }
    }
}
