/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_register::{
    Atomic,
    AtomicAdd,
    AtomicString,
    SpinSlot,
};
use std::sync::Arc;
use std::thread;

#[test]
fn test_new_and_load() {
    let name = AtomicString::new("hello");
    assert_eq!(name.load().as_str(), "hello");
}

#[test]
fn test_default_is_empty() {
    let name: AtomicString = AtomicString::default();
    assert!(name.load().is_empty());
}

#[test]
fn test_from() {
    assert_eq!(AtomicString::from("a").load().as_str(), "a");
    assert_eq!(AtomicString::from(String::from("b")).load().as_str(), "b");
}

#[test]
fn test_store_and_swap() {
    let name = AtomicString::new("one");
    name.store("two");
    assert_eq!(name.swap(String::from("three")).as_str(), "two");
    assert_eq!(name.load().as_str(), "three");
}

#[test]
fn test_compare_and_swap_matches_content() {
    let name = AtomicString::new(String::from("abc"));
    let expected = String::from("abc");
    assert!(name.compare_and_swap(&expected, "def"));
    assert!(!name.compare_and_swap("abc", "ghi"));
    assert_eq!(name.load().as_str(), "def");
}

#[test]
fn test_swap_then_compare_and_swap_twice() {
    let name = AtomicString::new("4");
    assert_eq!(name.swap("5").as_str(), "4");
    assert!(name.compare_and_swap("5", "6"));
    assert!(!name.compare_and_swap("5", "6"));
    assert_eq!(name.load().as_str(), "6");
}

#[test]
fn test_add_concatenates() {
    let name = AtomicString::new("foo");
    assert_eq!(name.add("bar").as_str(), "foobar");
    assert_eq!(
        AtomicAdd::add(&name, Arc::new(String::from("!"))).as_str(),
        "foobar!"
    );
}

#[test]
fn test_trait_compare_and_swap() {
    fn replace<T: Atomic<Value = Arc<String>>>(atomic: &T, from: &str, to: &str) -> bool {
        atomic.compare_and_swap(Arc::new(from.to_owned()), Arc::new(to.to_owned()))
    }
    let name = AtomicString::new("x");
    assert!(replace(&name, "x", "y"));
    assert!(!replace(&name, "x", "z"));
    assert_eq!(name.to_string(), "y");
}

#[test]
fn test_debug_display() {
    let name = AtomicString::new("value");
    assert_eq!(format!("{}", name), "value");
    assert!(format!("{:?}", name).contains("value"));
}

#[test]
fn test_spin_strategy() {
    let name = AtomicString::<SpinSlot>::with_strategy("a");
    assert_eq!(name.add("b").as_str(), "ab");
    assert!(name.compare_and_swap("ab", "c"));
    assert_eq!(name.load().as_str(), "c");
}

#[test]
fn test_concurrent_compare_and_swap_single_winner() {
    let name = Arc::new(AtomicString::new("start"));
    let handles: Vec<_> = (0..16)
        .map(|i| {
            let name = name.clone();
            thread::spawn(move || name.compare_and_swap("start", format!("winner-{i}")))
        })
        .collect();
    let wins = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|won| *won)
        .count();
    assert_eq!(wins, 1);
    assert!(name.load().starts_with("winner-"));
}
