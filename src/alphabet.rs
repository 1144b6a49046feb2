//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turns an optional alphabet string into resolved character sets for
//! `\w`, `\W`, `\d`, `\D`, `\s`, `\S`, `.` and negated classes.

use std::collections::BTreeSet;

use crate::ast::Category;
use crate::error::{Error, PatternError, Result};

lazy_static::lazy_static! {
    /// The built-in default alphabet: the Latin letters, resolved once and
    /// shared by every generator constructed without an explicit alphabet
    /// and without a process-config override.
    static ref DEFAULT_LETTERS: Vec<char> =
        ('a'..='z').chain('A'..='Z').collect();
}

const DIGITS: &str = "0123456789";
const WHITESPACE: &str = " \t\n\r\x0B\x0C";
// The standard ASCII punctuation set. `word` unions `_` in again below even
// though `printable` already carries it via this set; harmless, since set
// union is idempotent.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// The character sets every [`crate::StringGen`] consults while sampling,
/// counting, or enumerating.
#[derive(Debug, Clone)]
pub struct ResolvedAlphabet {
    word: Vec<char>,
    not_word: Vec<char>,
    digit: Vec<char>,
    not_digit: Vec<char>,
    space: Vec<char>,
    not_space: Vec<char>,
    printable: Vec<char>,
    any: Vec<char>,
}

impl ResolvedAlphabet {
    /// Resolves the category tables for an optional alphabet string.
    ///
    /// `alphabet = None` uses the built-in Latin-letters default. `Some("")`
    /// or an alphabet consisting only of whitespace fails with
    /// [`Error::Pattern`].
    pub fn resolve(alphabet: Option<&str>) -> Result<ResolvedAlphabet> {
        let letters: Vec<char> = match alphabet {
            None => DEFAULT_LETTERS.clone(),
            Some(a) => {
                if a.trim().is_empty() {
                    return Err(Error::Pattern(PatternError::new(
                        a,
                        0,
                        "alphabet must not be empty or whitespace-only",
                    )));
                }
                a.chars().collect()
            }
        };

        let digits: BTreeSet<char> = DIGITS.chars().collect();
        let whitespace: BTreeSet<char> = WHITESPACE.chars().collect();
        let punctuation: BTreeSet<char> = PUNCTUATION.chars().collect();

        let mut word: BTreeSet<char> = letters.iter().copied().collect();
        word.extend(digits.iter().copied());
        word.insert('_');

        let mut printable = word.clone();
        printable.extend(punctuation.iter().copied());
        printable.extend(whitespace.iter().copied());

        let not_word: Vec<char> =
            printable.difference(&word).copied().collect();
        let not_digit: Vec<char> =
            printable.difference(&digits).copied().collect();
        let not_space: Vec<char> =
            printable.difference(&whitespace).copied().collect();
        let any: Vec<char> = printable
            .iter()
            .copied()
            .filter(|&c| c != '\n')
            .collect();

        Ok(ResolvedAlphabet {
            word: word.into_iter().collect(),
            not_word,
            digit: digits.into_iter().collect(),
            not_digit,
            space: whitespace.into_iter().collect(),
            not_space,
            printable: printable.into_iter().collect(),
            any,
        })
    }

    /// The resolved members of a shorthand category, sorted by code point.
    pub fn category(&self, category: Category) -> &[char] {
        match category {
            Category::Word => &self.word,
            Category::NotWord => &self.not_word,
            Category::Digit => &self.digit,
            Category::NotDigit => &self.not_digit,
            Category::Space => &self.space,
            Category::NotSpace => &self.not_space,
        }
    }

    /// The full printable set that `.`, `\W`, `\D`, `\S` and negated
    /// classes are carved out of.
    pub fn printable(&self) -> &[char] {
        &self.printable
    }

    /// `printable \ {'\n'}`, the set `ANY` draws from.
    pub fn any(&self) -> &[char] {
        &self.any
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_alphabet_is_latin() {
        let a = ResolvedAlphabet::resolve(None).unwrap();
        assert!(a.category(Category::Word).contains(&'a'));
        assert!(a.category(Category::Word).contains(&'Z'));
        assert!(a.category(Category::Word).contains(&'_'));
        assert!(!a.category(Category::Word).contains(&'!'));
    }

    #[test]
    fn custom_alphabet_rewires_word() {
        let a = ResolvedAlphabet::resolve(Some("\u{03B1}\u{03B2}\u{03B3}\u{03B4}\u{03B5}")).unwrap();
        assert!(a.category(Category::Word).contains(&'\u{03B1}'));
        assert!(!a.category(Category::Word).contains(&'a'));
        // \d is not affected by the alphabet.
        assert!(a.category(Category::Digit).contains(&'5'));
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        assert!(ResolvedAlphabet::resolve(Some("")).is_err());
        assert!(ResolvedAlphabet::resolve(Some("   ")).is_err());
    }

    #[test]
    fn digits_are_subset_of_word_subset_of_printable() {
        let a = ResolvedAlphabet::resolve(None).unwrap();
        for c in a.category(Category::Digit) {
            assert!(a.category(Category::Word).contains(c));
        }
        for c in a.category(Category::Word) {
            assert!(a.printable().contains(c));
        }
    }

    #[test]
    fn categories_are_never_empty() {
        let a = ResolvedAlphabet::resolve(None).unwrap();
        for cat in [
            Category::Word,
            Category::NotWord,
            Category::Digit,
            Category::NotDigit,
            Category::Space,
            Category::NotSpace,
        ] {
            assert!(!a.category(cat).is_empty());
        }
        assert!(!a.any().is_empty());
    }
}
