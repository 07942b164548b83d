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
    AtomicValue,
    SpinSlot,
};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, PartialEq, Default)]
struct Config {
    name: String,
    version: u32,
}

impl Config {
    fn new(name: &str, version: u32) -> Self {
        Self {
            name: name.to_owned(),
            version,
        }
    }
}

#[test]
fn test_new_and_load() {
    let atomic = AtomicValue::new(Config::new("a", 1));
    assert_eq!(*atomic.load(), Config::new("a", 1));
}

#[test]
fn test_default() {
    let atomic: AtomicValue<Config> = AtomicValue::default();
    assert_eq!(*atomic.load(), Config::default());
}

#[test]
fn test_from_arc_keeps_reference() {
    let shared = Arc::new(Config::new("a", 1));
    let atomic = AtomicValue::from_arc(shared.clone());
    assert!(Arc::ptr_eq(&atomic.load(), &shared));
}

#[test]
fn test_store_and_swap() {
    let atomic = AtomicValue::new(Config::new("a", 1));
    atomic.store(Arc::new(Config::new("b", 2)));
    let old = atomic.swap(Arc::new(Config::new("c", 3)));
    assert_eq!(old.name, "b");
    assert_eq!(atomic.load().name, "c");
}

#[test]
fn test_compare_and_swap_defaults_to_identity() {
    let atomic = AtomicValue::new(Config::new("a", 1));
    let equal_copy = Config::new("a", 1);
    assert!(!atomic.compare_and_swap(&equal_copy, Arc::new(Config::new("b", 2))));

    let current = atomic.load();
    assert!(atomic.compare_and_swap(&current, Arc::new(Config::new("b", 2))));
    assert!(!atomic.compare_and_swap(&current, Arc::new(Config::new("c", 3))));
    assert_eq!(atomic.load().name, "b");
}

#[test]
fn test_compare_and_swap_with_equality() {
    let atomic = AtomicValue::new(Config::new("a", 1)).with_equality(|a, b| a == b);
    assert!(atomic.compare_and_swap(&Config::new("a", 1), Arc::new(Config::new("b", 2))));
    assert!(!atomic.compare_and_swap(&Config::new("a", 1), Arc::new(Config::new("c", 3))));
}

#[test]
fn test_compare_and_swap_by() {
    let atomic = AtomicValue::new(Config::new("a", 1));
    assert!(atomic.compare_and_swap_by(|c| c.version == 1, Arc::new(Config::new("b", 2))));
    assert!(!atomic.compare_and_swap_by(|c| c.version == 1, Arc::new(Config::new("c", 3))));
    assert_eq!(atomic.load().version, 2);
}

#[test]
fn test_add_with_combine() {
    let atomic = AtomicValue::new(vec![1, 2]).with_combine(|current: &Vec<i32>, delta: &Vec<i32>| {
        current.iter().chain(delta).copied().collect()
    });
    assert_eq!(*atomic.add(&vec![3]), vec![1, 2, 3]);
    assert_eq!(*AtomicAdd::add(&atomic, Arc::new(vec![4])), vec![1, 2, 3, 4]);
}

#[test]
#[should_panic(expected = "combine function")]
fn test_add_without_combine_panics() {
    let atomic = AtomicValue::new(1u64);
    atomic.add(&1);
}

#[test]
fn test_fetch_update_and_update_and_get() {
    let atomic = AtomicValue::new(Config::new("a", 1));
    let old = atomic.fetch_update(|c| Config::new(&c.name, c.version + 1));
    assert_eq!(old.version, 1);
    let new = atomic.update_and_get(|c| Config::new("z", c.version * 10));
    assert_eq!(*new, Config::new("z", 20));
}

#[test]
fn test_through_trait() {
    fn roll<T: Atomic<Value = Arc<u32>>>(atomic: &T) -> bool {
        let current = atomic.load();
        atomic.compare_and_swap(current.clone(), Arc::new(*current + 1))
    }
    let atomic = AtomicValue::new(1u32);
    assert!(roll(&atomic));
    assert_eq!(*atomic.load(), 2);
}

#[test]
fn test_spin_strategy() {
    let atomic = AtomicValue::<u32, SpinSlot>::with_strategy(Arc::new(5));
    let current = atomic.load();
    assert!(atomic.compare_and_swap(&current, Arc::new(6)));
    assert_eq!(*atomic.swap(Arc::new(7)), 6);
    assert_eq!(*atomic.update_and_get(|x| x + 1), 8);
}

#[test]
fn test_debug() {
    let atomic = AtomicValue::new(Config::new("dbg", 9));
    assert!(format!("{:?}", atomic).contains("dbg"));
}

#[test]
fn test_concurrent_update_and_get() {
    let atomic = Arc::new(AtomicValue::new(0u64));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let atomic = atomic.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    atomic.update_and_get(|x| x + 1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(*atomic.load(), 4_000);
}
