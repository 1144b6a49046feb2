//-
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end scenarios exercising each operation's documented behavior,
//! one test per case.

use assert_matches::assert_matches;
use stringgen::StringGen;

#[test]
fn scenario_2_pair_enumeration_is_exhaustive_and_ordered() {
    let gen = StringGen::new("[ab]{2}").unwrap();
    let all: Vec<String> = gen.enumerate(None).collect();
    assert_eq!(all, vec!["aa", "ab", "ba", "bb"]);
}

#[test]
fn scenario_3_alternation_enumeration_preserves_branch_order() {
    let gen = StringGen::new("(yes|no)").unwrap();
    let all: Vec<String> = gen.enumerate(None).collect();
    assert_eq!(all, vec!["yes", "no"]);
}

#[test]
fn scenario_4_render_set_beyond_count_is_rejected() {
    let mut gen = StringGen::new("[ab]").unwrap();
    assert!(gen.render_set(5).is_err());
}

#[test]
fn scenario_5_same_seed_renders_byte_for_byte_identically() {
    let mut a = StringGen::builder(r"\d{4}").seed(42u64).build().unwrap();
    let mut b = StringGen::builder(r"\d{4}").seed(42u64).build().unwrap();
    assert_eq!(a.render(), b.render());
}

#[test]
fn scenario_6_custom_alphabet_constrains_word_class() {
    let mut gen = StringGen::builder(r"\w{10}")
        .alphabet("αβγδε")
        .build()
        .unwrap();
    let allowed: Vec<char> = "αβγδε0123456789_".chars().collect();
    let s = gen.render();
    assert!(s.chars().all(|c| allowed.contains(&c)));
}

#[test]
fn scenario_7_render_length_stays_within_max_repeat() {
    let mut gen = StringGen::builder(r"\w+").max_repeat(10).build().unwrap();
    let len = gen.render().chars().count();
    assert!((1..=10).contains(&len));
}

#[test]
fn scenario_9_backreference_render_is_one_of_two_values() {
    let mut gen = StringGen::new(r"(?P<x>[ab])-(?P=x)").unwrap();
    let s = gen.render();
    assert!(s == "a-a" || s == "b-b");
}

#[test]
fn invariant_1_render_length_is_within_the_patterns_bounds() {
    let mut gen = StringGen::builder(r"a{2,5}").build().unwrap();
    for _ in 0..30 {
        let len = gen.render().chars().count();
        assert!((2..=5).contains(&len));
    }
}

#[test]
fn invariant_5_render_set_at_count_succeeds_exactly() {
    let mut gen = StringGen::new("[abcd]").unwrap();
    let set = gen.render_set(4).unwrap();
    assert_eq!(set.len(), 4);
}

#[test]
fn invariant_6_render_set_beyond_count_fails_before_sampling() {
    let mut gen = StringGen::new("[abcd]").unwrap();
    let err = gen.render_set(5).unwrap_err();
    assert_matches!(err, stringgen::Error::InvalidArgument { .. });
}

#[test]
fn invariant_7_concatenation_length_is_additive_under_matching_seeds() {
    let a = StringGen::builder("abc$").seed(7u64).build().unwrap();
    let b = StringGen::builder("^def").seed(7u64).build().unwrap();
    let mut combined = (&a + &b).unwrap();
    assert_eq!(combined.pattern(), "abcdef");
    assert_eq!(combined.render(), "abcdef");
}
