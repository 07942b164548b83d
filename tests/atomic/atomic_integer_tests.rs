/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

test_atomic_integer!(AtomicI8, i8, atomic_i8);
test_atomic_integer!(AtomicU8, u8, atomic_u8);
test_atomic_integer!(AtomicI16, i16, atomic_i16);
test_atomic_integer!(AtomicU16, u16, atomic_u16);
test_atomic_integer!(AtomicI32, i32, atomic_i32);
test_atomic_integer!(AtomicU32, u32, atomic_u32);
test_atomic_integer!(AtomicI64, i64, atomic_i64);
test_atomic_integer!(AtomicU64, u64, atomic_u64);
test_atomic_integer!(AtomicIsize, isize, atomic_isize);
test_atomic_integer!(AtomicUsize, usize, atomic_usize);
