//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The generator façade: ties the alphabet resolver, parser, random engine,
//! sampler, counter, and enumerator into one value type.
//!
//! `StringGen` is a concrete struct rather than a generic wrapper: it only
//! ever produces `String`.

use std::collections::HashSet;
use std::fmt;
use std::ops::Add;
use std::sync::OnceLock;

use crate::alphabet::ResolvedAlphabet;
use crate::ast::Opcode;
use crate::config;
use crate::counter::{self, Count};
use crate::enumerator;
use crate::error::{Error, Result};
use crate::parser::parse;
use crate::rng::{Rng, RngAlgorithm, Seed};
use crate::sampler::sample;

/// The built-in `max_repeat` default, used when neither the constructor
/// nor the process config supplies one.
const DEFAULT_MAX_REPEAT: u32 = 100;

/// `render_set`'s default `max_iter`.
pub const DEFAULT_MAX_ITER: usize = 100_000;

/// A single compiled pattern: parsed AST, resolved alphabet, `max_repeat`
/// cap, and a private random engine.
///
/// `StringGen` is `!Sync` by construction — every mutating operation takes
/// `&mut self`, so the compiler, not a runtime lock, enforces single-writer
/// access.
pub struct StringGen {
    src: Box<str>,
    ast: Opcode,
    alphabet: ResolvedAlphabet,
    max_repeat: u32,
    rng: Rng,
    count: OnceLock<Count>,
}

impl StringGen {
    /// Parses `pattern` and builds a generator using only built-in and
    /// process-config defaults. Shorthand for
    /// `StringGenBuilder::new(pattern).build()`.
    pub fn new(pattern: impl Into<String>) -> Result<StringGen> {
        StringGenBuilder::new(pattern).build()
    }

    /// Starts a [`StringGenBuilder`] for callers that need an explicit
    /// alphabet, `max_repeat`, or seed.
    pub fn builder(pattern: impl Into<String>) -> StringGenBuilder {
        StringGenBuilder::new(pattern)
    }

    fn from_parts(
        src: Box<str>,
        ast: Opcode,
        alphabet: ResolvedAlphabet,
        max_repeat: u32,
        rng: Rng,
    ) -> StringGen {
        StringGen {
            src,
            ast,
            alphabet,
            max_repeat,
            rng,
            count: OnceLock::new(),
        }
    }

    /// The pattern source this generator was built from.
    pub fn pattern(&self) -> &str {
        &self.src
    }

    /// The effective `max_repeat` cap this generator was built with.
    pub fn max_repeat(&self) -> u32 {
        self.max_repeat
    }

    /// Replaces the random engine's state in place. Subsequent draws
    /// replay deterministically from `seed`, as if this generator had been
    /// constructed with it originally.
    pub fn reseed(&mut self, seed: impl Into<Seed>) {
        self.rng.reseed(seed.into());
    }

    /// One random matching string.
    pub fn render(&mut self) -> String {
        sample(&self.ast, &self.alphabet, self.max_repeat, &mut self.rng)
    }

    /// An eager list of `n` samples, possibly with duplicates.
    pub fn render_list(&mut self, n: usize) -> Vec<String> {
        (0..n).map(|_| self.render()).collect()
    }

    /// A lazy sequence of exactly `n` samples. Each pulled item draws from
    /// this generator's engine, so pulling from the returned [`Stream`]
    /// advances the same state a `render()` call would.
    pub fn stream(&mut self, n: usize) -> Stream<'_> {
        Stream {
            gen: self,
            remaining: n,
        }
    }

    /// A perpetual stream of samples; never terminates on its own.
    pub fn iter(&mut self) -> Iter<'_> {
        Iter { gen: self }
    }

    /// An eager collection of `n` distinct samples, drawing at most
    /// [`DEFAULT_MAX_ITER`] samples before giving up.
    pub fn render_set(&mut self, n: usize) -> Result<HashSet<String>> {
        self.render_set_with(n, DEFAULT_MAX_ITER)
    }

    /// `render_set` with an explicit `max_iter`.
    ///
    /// If `count() < n`, fails immediately with [`Error::InvalidArgument`]
    /// — an upper bound below `n` proves `n` distinct samples don't exist,
    /// so no sample is drawn. Otherwise samples repeatedly, discarding
    /// duplicates, until `n` distinct strings are collected or `max_iter`
    /// samples have been drawn; the latter fails with
    /// [`Error::MaxIterationsReached`].
    pub fn render_set_with(
        &mut self,
        n: usize,
        max_iter: usize,
    ) -> Result<HashSet<String>> {
        let upper_bound = self.count();
        if upper_bound.is_less_than(n as u128) {
            return Err(Error::InvalidArgument {
                what: "n",
                reason: format!(
                    "requested {} distinct samples but this pattern can \
                     produce at most {}",
                    n, upper_bound
                ),
            });
        }

        let mut set = HashSet::with_capacity(n);
        let mut drawn = 0usize;
        while set.len() < n {
            if drawn >= max_iter {
                log::warn!(
                    "render_set gave up after {} iterations with {}/{} \
                     distinct samples collected",
                    max_iter,
                    set.len(),
                    n
                );
                return Err(Error::MaxIterationsReached {
                    requested: n,
                    collected: set.len(),
                    max_iter,
                });
            }
            set.insert(self.render());
            drawn += 1;
        }
        Ok(set)
    }

    /// The exact number of distinct strings this pattern can produce,
    /// memoized after the first call.
    pub fn count(&self) -> Count {
        *self
            .count
            .get_or_init(|| counter::count(&self.ast, &self.alphabet, self.max_repeat))
    }

    /// A lazy, deterministically-ordered sequence of every distinct
    /// matching string. `limit` overrides this generator's `max_repeat` as
    /// the cap an unbounded quantifier enumerates up to; `None` uses
    /// `max_repeat`.
    pub fn enumerate(&self, limit: Option<u32>) -> Box<dyn Iterator<Item = String> + '_> {
        let limit = limit.unwrap_or(self.max_repeat);
        enumerator::enumerate(&self.ast, &self.alphabet, limit)
    }
}

impl fmt::Debug for StringGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringGen")
            .field("src", &self.src)
            .field("max_repeat", &self.max_repeat)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for StringGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.src)
    }
}

impl PartialEq for StringGen {
    fn eq(&self, other: &Self) -> bool {
        self.src == other.src
    }
}

impl Eq for StringGen {}

/// Concatenation: a new generator whose source is `a`'s with a trailing
/// `$` stripped, followed by `b`'s with a leading `^` stripped, reparsed.
/// A pattern error in either source propagates from the reparse.
///
/// The result inherits `a`'s resolved alphabet and `max_repeat`; its seed
/// is drawn fresh from entropy, since no single side's seed is privileged
/// (see DESIGN.md).
impl Add<&StringGen> for &StringGen {
    type Output = Result<StringGen>;

    fn add(self, rhs: &StringGen) -> Result<StringGen> {
        let left = self.src.trim_end_matches('$');
        let right = rhs.src.trim_start_matches('^');
        let combined = format!("{}{}", left, right);
        let ast = parse(&combined)?;
        Ok(StringGen::from_parts(
            combined.into_boxed_str(),
            ast,
            self.alphabet.clone(),
            self.max_repeat,
            Rng::from_entropy(),
        ))
    }
}

/// A lazy sequence of exactly `n` samples, returned by [`StringGen::stream`].
pub struct Stream<'a> {
    gen: &'a mut StringGen,
    remaining: usize,
}

impl Iterator for Stream<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.gen.render())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

/// A perpetual sequence of samples, returned by [`StringGen::iter`].
pub struct Iter<'a> {
    gen: &'a mut StringGen,
}

impl Iterator for Iter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.gen.render())
    }
}

/// Builds a [`StringGen`], resolving a three-level precedence: constructor
/// argument > process config snapshot (taken at `build()` time) > built-in
/// default.
pub struct StringGenBuilder {
    src: String,
    alphabet: Option<String>,
    max_repeat: Option<u32>,
    seed: Option<Seed>,
    algorithm: RngAlgorithm,
}

impl StringGenBuilder {
    pub fn new(pattern: impl Into<String>) -> StringGenBuilder {
        StringGenBuilder {
            src: pattern.into(),
            alphabet: None,
            max_repeat: None,
            seed: None,
            algorithm: RngAlgorithm::default(),
        }
    }

    /// Overrides the built-in/process-config alphabet for this generator.
    pub fn alphabet(mut self, alphabet: impl Into<String>) -> StringGenBuilder {
        self.alphabet = Some(alphabet.into());
        self
    }

    /// Overrides the built-in/process-config `max_repeat` for this
    /// generator.
    pub fn max_repeat(mut self, max_repeat: u32) -> StringGenBuilder {
        self.max_repeat = Some(max_repeat);
        self
    }

    /// Seeds this generator's random engine. Without a seed, the engine
    /// draws from process entropy and is not reproducible across runs.
    pub fn seed(mut self, seed: impl Into<Seed>) -> StringGenBuilder {
        self.seed = Some(seed.into());
        self
    }

    /// Selects the PRNG family backing this generator's engine. Only
    /// matters when combined with [`StringGenBuilder::seed`]; entropy-seeded
    /// generators always use the default algorithm.
    pub fn algorithm(mut self, algorithm: RngAlgorithm) -> StringGenBuilder {
        self.algorithm = algorithm;
        self
    }

    /// Parses the pattern and resolves the alphabet, failing with
    /// [`Error::Pattern`] if either step rejects its input.
    pub fn build(self) -> Result<StringGen> {
        let ast = parse(&self.src)?;

        let snapshot = config::snapshot();
        let alphabet_src = self.alphabet.or(snapshot.alphabet);
        let alphabet = ResolvedAlphabet::resolve(alphabet_src.as_deref())?;
        let max_repeat = self
            .max_repeat
            .or(snapshot.max_repeat)
            .unwrap_or(DEFAULT_MAX_REPEAT);

        log::debug!(
            "built StringGen for {:?} (max_repeat = {})",
            self.src,
            max_repeat
        );

        let rng = match self.seed {
            Some(seed) => Rng::from_seed_with(seed, self.algorithm),
            None => Rng::from_entropy_with(self.algorithm),
        };

        Ok(StringGen::from_parts(
            self.src.into_boxed_str(),
            ast,
            alphabet,
            max_repeat,
            rng,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Seed;
    use std::sync::Mutex as StdMutex;

    static TEST_LOCK: StdMutex<()> = StdMutex::new(());

    #[test]
    fn render_matches_fixed_pattern() {
        let mut gen = StringGen::new("hello").unwrap();
        assert_eq!(gen.render(), "hello");
    }

    #[test]
    fn same_seed_renders_identically() {
        let mut a = StringGen::builder("\\d{4}").seed(42u64).build().unwrap();
        let mut b = StringGen::builder("\\d{4}").seed(42u64).build().unwrap();
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn render_list_has_requested_length() {
        let mut gen = StringGen::builder("a").seed(Seed::Int(0)).build().unwrap();
        assert_eq!(gen.render_list(5).len(), 5);
    }

    #[test]
    fn stream_yields_exactly_n() {
        let mut gen = StringGen::builder("a").seed(Seed::Int(0)).build().unwrap();
        assert_eq!(gen.stream(7).count(), 7);
    }

    #[test]
    fn render_set_below_count_fails() {
        let mut gen = StringGen::new("[ab]").unwrap();
        assert!(gen.render_set(5).is_err());
    }

    #[test]
    fn render_set_within_count_succeeds() {
        let mut gen = StringGen::new("[abcd]").unwrap();
        let set = gen.render_set(4).unwrap();
        assert_eq!(set.len(), 4);
        let mut values: Vec<_> = set.into_iter().collect();
        values.sort();
        assert_eq!(values, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn enumerate_matches_count_for_small_patterns() {
        let gen = StringGen::new("[ab]{2}").unwrap();
        assert_eq!(gen.enumerate(None).count(), 4);
        assert_eq!(gen.count(), Count::Finite(4));
    }

    #[test]
    fn concatenation_strips_boundary_anchors() {
        let a = StringGen::new("foo$").unwrap();
        let b = StringGen::new("^bar").unwrap();
        let combined = (&a + &b).unwrap();
        assert_eq!(combined.pattern(), "foobar");
    }

    #[test]
    fn equality_and_display_are_keyed_on_source() {
        let a = StringGen::new("abc").unwrap();
        let b = StringGen::new("abc").unwrap();
        assert_eq!(a, b);
        assert_eq!(format!("{}", a), "abc");
    }

    #[test]
    fn constructor_argument_overrides_process_config() {
        let _guard = TEST_LOCK.lock().unwrap();
        config::reset();
        config::configure(config::ProcessConfigUpdate::new().max_repeat(3)).unwrap();
        let gen = StringGen::builder("a*").max_repeat(50).build().unwrap();
        assert_eq!(gen.max_repeat(), 50);
        config::reset();
    }

    #[test]
    fn process_config_overrides_built_in_default() {
        let _guard = TEST_LOCK.lock().unwrap();
        config::reset();
        config::configure(config::ProcessConfigUpdate::new().max_repeat(3)).unwrap();
        let gen = StringGen::new("a*").unwrap();
        assert_eq!(gen.max_repeat(), 3);
        config::reset();
    }
}
