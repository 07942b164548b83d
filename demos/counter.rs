/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # Atomic Counter Example
//!
//! Demonstrates using integer registers as thread-safe counters.

use prism3_register::AtomicI32;
use std::sync::Arc;
use std::thread;

fn main() {
    println!("=== Atomic Counter Example ===\n");

    // Example 1: Basic counter operations
    println!("1. Basic Counter Operations:");
    let counter = AtomicI32::new(0);
    println!("   Initial value: {}", counter);

    counter.add(1);
    println!("   After add(1): {}", counter);

    counter.add(5);
    println!("   After add(5): {}", counter);

    counter.sub(1);
    println!("   After sub(1): {}", counter);

    // Example 2: Multi-threaded counter
    println!("\n2. Multi-threaded Counter:");
    let counter = Arc::new(AtomicI32::new(0));
    let num_threads = 16;
    let adds_per_thread = 1024;

    let mut handles = vec![];
    for i in 0..num_threads {
        let counter = counter.clone();
        let handle = thread::spawn(move || {
            for _ in 0..adds_per_thread {
                counter.add(1);
            }
            println!("   Thread {} completed", i);
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    println!(
        "   Final count: {} (expected: {})",
        counter.load(),
        num_threads * adds_per_thread
    );

    // Example 3: Swap and compare-and-swap
    println!("\n3. Swap and Compare-and-Swap:");
    let counter = AtomicI32::new(4);
    println!("   swap(5) returned {}", counter.swap(5));
    println!("   compare_and_swap(5, 6): {}", counter.compare_and_swap(5, 6));
    println!("   compare_and_swap(5, 6): {}", counter.compare_and_swap(5, 6));
    println!("   value is now {}", counter);

    // Example 4: Functional updates
    println!("\n4. Functional Updates:");
    let counter = AtomicI32::new(5);
    let old = counter.fetch_update(|x| x * 2);
    println!("   After doubling - old: {}, new: {}", old, counter);

    let new = counter.update_and_get(|x| x + 10);
    println!("   After adding 10 - new: {}", new);

    // Example 5: Wrap-around
    println!("\n5. Wrap-around:");
    let counter = AtomicI32::new(i32::MAX);
    println!("   i32::MAX + 1 = {}", counter.add(1));

    println!("\n=== Example completed ===");
}
