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
    AtomicBool,
    AtomicBytes,
    AtomicF32,
    AtomicI64,
    AtomicPointer,
    AtomicString,
    AtomicU16,
    AtomicValue,
};
use std::fmt::Debug;
use std::sync::Arc;

// Runs the shared five-operation scenario against any register.
fn exercise<T>(atomic: &T, a: T::Value, b: T::Value, c: T::Value)
where
    T: Atomic,
    T::Value: Clone + PartialEq + Debug,
{
    atomic.store(a.clone());
    assert_eq!(atomic.load(), a);
    assert_eq!(atomic.swap(b.clone()), a);
    assert!(atomic.compare_and_swap(b.clone(), c.clone()));
    assert!(!atomic.compare_and_swap(b, a));
    assert_eq!(atomic.load(), c);
}

#[test]
fn test_atomic_trait_scalars() {
    exercise(&AtomicBool::new(false), true, false, true);
    exercise(&AtomicU16::new(0), 4, 5, 6);
    exercise(&AtomicI64::new(0), -4, 5, -6);
    exercise(&AtomicF32::new(0.0), 0.5, 1.5, 2.5);
}

#[test]
fn test_atomic_trait_pointer() {
    let mut x = 0u8;
    let mut y = 0u8;
    let mut z = 0u8;
    exercise(
        &AtomicPointer::<u8>::null(),
        &mut x as *mut u8,
        &mut y as *mut u8,
        &mut z as *mut u8,
    );
}

#[test]
fn test_atomic_trait_buffers() {
    exercise(
        &AtomicBytes::new(Vec::new()),
        Arc::new(vec![1]),
        Arc::new(vec![2]),
        Arc::new(vec![3]),
    );
    exercise(
        &AtomicString::new(""),
        Arc::new(String::from("a")),
        Arc::new(String::from("b")),
        Arc::new(String::from("c")),
    );
}

#[test]
fn test_atomic_trait_value_with_equality() {
    let atomic = AtomicValue::new(0i32).with_equality(|a, b| a == b);
    exercise(&atomic, Arc::new(4), Arc::new(5), Arc::new(6));
}

// Folds the deltas through the generic add.
fn fold_all<T: AtomicAdd>(atomic: &T, deltas: Vec<T::Value>) -> T::Value {
    for delta in deltas {
        atomic.add(delta);
    }
    atomic.load()
}

#[test]
fn test_atomic_add_trait() {
    assert_eq!(fold_all(&AtomicI64::new(1), vec![2, 3]), 6);
    assert!(!fold_all(&AtomicBool::new(true), vec![true, false]));
    assert_eq!(fold_all(&AtomicF32::new(0.0), vec![0.25, 0.75]), 1.0);
    assert_eq!(
        fold_all(
            &AtomicString::new("a"),
            vec![Arc::new(String::from("b")), Arc::new(String::from("c"))]
        )
        .as_str(),
        "abc"
    );
    assert_eq!(
        fold_all(&AtomicBytes::new(vec![1]), vec![Arc::new(vec![2, 3])]).as_slice(),
        &[1, 2, 3]
    );
}

#[test]
fn test_atomic_add_trait_value() {
    let atomic = AtomicValue::new(2u32).with_combine(|a, b| a * b);
    assert_eq!(*fold_all(&atomic, vec![Arc::new(3), Arc::new(4)]), 24);
}

#[test]
fn test_trait_objects() {
    let registers: Vec<Box<dyn Atomic<Value = i64>>> =
        vec![Box::new(AtomicI64::new(1)), Box::new(AtomicI64::new(2))];
    for register in &registers {
        register.store(10);
        assert_eq!(register.load(), 10);
    }
}
