mod common;
use common::eval;

use lyra::runtime::{ArrayMemory, Memory};
use lyra::stdlib;

fn s(text: &str) -> Memory {
    Memory::from(text)
}

#[test]
fn arguments_are_coerced_from_any_kind() {
    assert_eq!(stdlib::str::length(&Memory::Float(1.5)), Memory::Int(3));
    assert_eq!(stdlib::str::length(&Memory::TRUE), Memory::Int(1));
    assert_eq!(stdlib::str::length(&Memory::NULL), Memory::Int(0));
    assert_eq!(stdlib::str::pos(&Memory::Int(12345), &Memory::Int(3), None), Memory::Int(2));
    assert_eq!(stdlib::str::sub(&s("abcdef"), &s("2"), Some(&Memory::Float(4.9))), s("cd"));
}

#[test]
fn split_then_join_restores_the_string() {
    let parts = stdlib::str::split(&s("a:b:c"), &s(":"), None);
    assert_eq!(parts.to_array().unwrap().len(), 3);
    assert_eq!(stdlib::str::join(&parts, &s(":"), None), s("a:b:c"));
}

#[test]
fn join_accepts_evaluated_arrays() {
    let list = eval("['x' => 1, 2, 'three']");
    assert_eq!(stdlib::str::join(&list, &s(","), None), s("1,2,three"));
    assert_eq!(stdlib::str::join(&list, &s(","), Some(&Memory::Int(1))), s("1"));
}

#[test]
fn join_through_a_reference() {
    let list = Memory::reference(Memory::from(ArrayMemory::from_values([s("p"), s("q")])));
    assert_eq!(stdlib::str::join(&list, &s("+"), None), s("p+q"));
}

#[test]
fn search_functions_agree() {
    let text = s("one two one");
    assert_eq!(stdlib::str::pos(&text, &s("one"), None), Memory::Int(0));
    assert_eq!(stdlib::str::last_pos(&text, &s("one"), None), Memory::Int(8));
    assert_eq!(stdlib::str::pos(&text, &s("one"), Some(&Memory::Int(1))), Memory::Int(8));
    assert_eq!(stdlib::str::pos_ignore_case(&text, &s("TWO"), None), Memory::Int(4));
    assert_eq!(stdlib::str::last_pos_ignore_case(&text, &s("ONE"), Some(&Memory::Int(7))), Memory::Int(0));
}

#[test]
fn compare_sign_matches_relational_operators() {
    for (a, b) in [("apple", "banana"), ("same", "same"), ("zeta", "alpha"), ("ab", "abc")] {
        let cmp = stdlib::str::compare(&s(a), &s(b)).to_integer();
        assert_eq!(cmp.signum(), (a.cmp(b) as i64).signum(), "{a} vs {b}");
    }
}

#[test]
fn case_insensitive_equality() {
    assert_eq!(stdlib::str::equals_ignore_case(&s("HeLLo"), &s("hello")), Memory::TRUE);
    assert_eq!(stdlib::str::compare_ignore_case(&s("ABC"), &s("abd")), Memory::Int(-1));
}

#[test]
fn transformations() {
    assert_eq!(stdlib::str::upper(&s("straße")), s("STRASSE"));
    assert_eq!(stdlib::str::reverse(&s("racecar")), s("racecar"));
    assert_eq!(stdlib::str::replace(&s("1-2-3"), &s("-"), &Memory::Int(0)), s("10203"));
    assert_eq!(stdlib::str::repeat(&s("=-"), &s("2")), s("=-=-"));
    assert_eq!(stdlib::str::repeat(&s("x"), &Memory::Int(-3)), Memory::FALSE);
    assert_eq!(stdlib::str::trim(&s("\t padded \0"), None), s("padded"));
    assert_eq!(stdlib::str::trim_left(&s("--x--"), Some(&s("-"))), s("x--"));
}

#[test]
fn repeat_refuses_oversized_results() {
    assert_eq!(stdlib::str::repeat(&s("ab"), &Memory::Int(i64::MAX)), Memory::FALSE);
    let limit = stdlib::str::MAX_REPEAT_BYTES as i64;
    assert_eq!(stdlib::str::repeat(&s("ab"), &Memory::Int(limit / 2 + 1)), Memory::FALSE);
    assert_eq!(stdlib::str::repeat(&s(""), &Memory::Int(i64::MAX)), s(""));
    assert_eq!(stdlib::str::length(&stdlib::str::repeat(&s("xyz"), &Memory::Int(1000))), Memory::Int(3000));
}

#[test]
fn shuffle_keeps_every_character() {
    let original = "héllo wörld";
    let shuffled = stdlib::str::shuffle(&s(original)).to_string();
    let mut expected: Vec<char> = original.chars().collect();
    let mut actual: Vec<char> = shuffled.chars().collect();
    expected.sort_unstable();
    actual.sort_unstable();
    assert_eq!(actual, expected);
}

#[test]
fn charset_round_trip() {
    for charset in ["UTF-8", "UTF-16", "UTF-16LE", "UTF-16BE"] {
        let bytes = stdlib::str::encode(&s("héllo wörld"), &s(charset));
        assert!(bytes.is_string() || matches!(bytes, Memory::Binary(_)), "{charset}");
        assert_eq!(stdlib::str::decode(&bytes, &s(charset)), s("héllo wörld"), "{charset}");
    }
}

#[test]
fn number_detection() {
    assert_eq!(stdlib::str::is_number(&s("2024")), Memory::TRUE);
    assert_eq!(stdlib::str::is_number(&s("+7")), Memory::TRUE);
    assert_eq!(stdlib::str::is_number(&s(" 7")), Memory::FALSE);
    assert_eq!(stdlib::str::is_number(&s("0x1A")), Memory::FALSE);
}
