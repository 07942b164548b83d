/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # Dynamic Value Example
//!
//! Demonstrates slot-backed registers: strings, byte buffers, and values
//! whose type is fixed by the first store.

use prism3_register::{
    AtomicBytes,
    AtomicString,
    Payload,
    SpinSlot,
    Value,
};
use std::sync::Arc;
use std::thread;

fn main() {
    println!("=== Dynamic Value Example ===\n");

    // Example 1: First store fixes the type
    println!("1. First Store:");
    let value = Value::empty();
    println!("   Before any store: {:?}", value.state());
    let installed = value.compare_and_swap(&Payload::new(0i32), Payload::new(4i32));
    println!("   First compare_and_swap returned {}", installed);
    println!("   ...but the value is now {:?}", value.load_as::<i32>());
    match value.try_store(Payload::new("four")) {
        Ok(()) => println!("   Stored a &str"),
        Err(err) => println!("   Rejected: {}", err),
    }

    // Example 2: First-store race
    println!("\n2. First-store Race:");
    let value = Arc::new(Value::<SpinSlot>::default());
    let handles: Vec<_> = ["left", "right"]
        .into_iter()
        .map(|name| {
            let value = value.clone();
            thread::spawn(move || {
                let won = value.compare_and_swap(
                    &Payload::new(String::new()),
                    Payload::new(name.to_string()),
                );
                println!("   {} reported {}", name, won);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    println!("   Stored: {:?}", value.load_as::<String>());

    // Example 3: Combine policies
    println!("\n3. Combine Policies:");
    let total = Value::new(Payload::new(0u64)).with_combine(|current, delta| {
        let a = current.and_then(|c| c.downcast_ref::<u64>()).copied().unwrap_or_default();
        let b = delta.downcast_ref::<u64>().copied().unwrap_or_default();
        Payload::new(a + b)
    });
    for n in 1..=4u64 {
        total.add(&Payload::new(n));
    }
    println!("   1 + 2 + 3 + 4 = {:?}", total.load_as::<u64>());

    // Example 4: Content equality for strings and bytes
    println!("\n4. Content Equality:");
    let name = AtomicString::new("draft");
    name.add("-1");
    let expected = String::from("draft-1");
    println!(
        "   compare_and_swap(\"draft-1\", \"final\"): {}",
        name.compare_and_swap(&expected, "final")
    );
    println!("   name = {}", name);

    let bytes = AtomicBytes::new(vec![1, 2, 3]);
    println!(
        "   bytes compare_and_swap with a fresh [1, 2, 3]: {}",
        bytes.compare_and_swap(&[1, 2, 3], vec![9])
    );
    println!("   bytes = {:?}", bytes.load());

    println!("\n=== Example completed ===");
}
