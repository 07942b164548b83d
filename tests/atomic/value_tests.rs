/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

/// Generates the dynamic value suite for one slot strategy.
macro_rules! test_value_strategy {
    ($slot:ty, $test_mod:ident) => {
        mod $test_mod {
            use prism3_register::{
                Payload,
                RegisterError,
                SlotState,
                TypeTag,
                Value,
            };

            type Register = Value<$slot>;

            fn int_sum(current: Option<&Payload>, delta: &Payload) -> Payload {
                let a = current.and_then(|c| c.downcast_ref::<i32>()).copied().unwrap_or_default();
                let b = delta.downcast_ref::<i32>().copied().unwrap_or_default();
                Payload::new(a + b)
            }

            #[test]
            fn test_empty_register() {
                let value = Register::default();
                assert!(value.load().is_none());
                assert!(value.load_as::<i32>().is_none());
                assert_eq!(value.state(), SlotState::Empty);
            }

            #[test]
            fn test_store_fixes_type() {
                let value = Register::default();
                value.store(Payload::new(4i32));
                assert_eq!(value.state(), SlotState::Typed(TypeTag::of::<i32>()));
                assert_eq!(value.load_as::<i32>().as_deref(), Some(&4));
                assert!(value.load_as::<u32>().is_none());
            }

            #[test]
            fn test_with_strategy_publishes_initial() {
                let value = Register::with_strategy(Payload::new(String::from("init")));
                assert_eq!(value.load_as::<String>().as_deref().map(String::as_str), Some("init"));
            }

            #[test]
            fn test_first_compare_and_swap_reports_false() {
                let value = Register::default();
                let desired = Payload::new(1i32);
                assert!(!value.compare_and_swap(&Payload::new(0i32), desired.clone()));
                assert!(value.load().unwrap().ptr_eq(&desired));
            }

            #[test]
            fn test_swap_and_compare_and_swap_sequence() {
                let value = Register::with_strategy(Payload::new(4i32));
                let old = value.swap(Payload::new(5i32)).unwrap();
                assert_eq!(old.downcast_ref::<i32>(), Some(&4));

                let current = value.load().unwrap();
                assert!(value.compare_and_swap(&current, Payload::new(6i32)));
                assert!(!value.compare_and_swap(&current, Payload::new(6i32)));
                assert_eq!(value.load_as::<i32>().as_deref(), Some(&6));
            }

            #[test]
            fn test_identity_equality_rejects_equal_copy() {
                let value = Register::with_strategy(Payload::new(5i32));
                assert!(!value.compare_and_swap(&Payload::new(5i32), Payload::new(6i32)));
                assert_eq!(value.load_as::<i32>().as_deref(), Some(&5));
            }

            #[test]
            fn test_custom_equality() {
                let value = Register::with_strategy(Payload::new(5i32)).with_equality(|a, b| {
                    a.downcast_ref::<i32>() == b.downcast_ref::<i32>()
                });
                assert!(value.compare_and_swap(&Payload::new(5i32), Payload::new(6i32)));
                assert!(!value.compare_and_swap(&Payload::new(5i32), Payload::new(7i32)));
                assert_eq!(value.load_as::<i32>().as_deref(), Some(&6));
            }

            #[test]
            fn test_swap_on_empty_publishes() {
                let value = Register::default();
                assert!(value.swap(Payload::new(1i32)).is_none());
                let old = value.swap(Payload::new(2i32)).unwrap();
                assert_eq!(old.downcast_ref::<i32>(), Some(&1));
            }

            #[test]
            fn test_add_with_combine() {
                let value = Register::with_strategy(Payload::new(10i32)).with_combine(int_sum);
                let new = value.add(&Payload::new(5i32));
                assert_eq!(new.downcast_ref::<i32>(), Some(&15));
                assert_eq!(value.load_as::<i32>().as_deref(), Some(&15));
            }

            #[test]
            fn test_add_on_empty_publishes_delta() {
                let value = Register::default().with_combine(int_sum);
                let delta = Payload::new(3i32);
                assert_eq!(value.add(&delta).downcast_ref::<i32>(), Some(&3));
                assert_eq!(value.add(&Payload::new(4i32)).downcast_ref::<i32>(), Some(&7));
            }

            #[test]
            fn test_add_on_empty_runs_combine_without_current() {
                let value = Register::default().with_combine(|current, delta| {
                    let mut out: Vec<i32> =
                        current.and_then(|c| c.downcast_ref::<Vec<i32>>()).cloned().unwrap_or_default();
                    let delta = delta.downcast_ref::<Vec<i32>>().cloned().unwrap_or_default();
                    out.extend(delta.iter().map(|d| d * 10));
                    Payload::new(out)
                });
                let first = value.add(&Payload::new(vec![1]));
                assert_eq!(first.downcast_ref::<Vec<i32>>(), Some(&vec![10]));
                assert_eq!(value.state(), SlotState::Typed(TypeTag::of::<Vec<i32>>()));
                let second = value.add(&Payload::new(vec![2]));
                assert_eq!(second.downcast_ref::<Vec<i32>>(), Some(&vec![10, 20]));
            }

            #[test]
            fn test_try_add_without_combine() {
                let value = Register::with_strategy(Payload::new(1i32));
                assert_eq!(
                    value.try_add(&Payload::new(1i32)).unwrap_err(),
                    RegisterError::MissingCombine
                );
            }

            #[test]
            #[should_panic(expected = "combine function")]
            fn test_add_without_combine_panics() {
                let value = Register::with_strategy(Payload::new(1i32));
                value.add(&Payload::new(1i32));
            }

            #[test]
            fn test_try_store_type_mismatch() {
                let value = Register::with_strategy(Payload::new(String::from("text")));
                let err = value.try_store(Payload::new(1i32)).unwrap_err();
                assert!(matches!(err, RegisterError::TypeMismatch { supplied: "i32", .. }));
                assert_eq!(value.load_as::<String>().as_deref().map(String::as_str), Some("text"));
            }

            #[test]
            fn test_try_swap_and_compare_and_swap_type_mismatch() {
                let value = Register::with_strategy(Payload::new(1u8));
                let current = value.load().unwrap();
                assert!(value.try_swap(Payload::new(1u16)).is_err());
                assert!(value.try_compare_and_swap(&current, Payload::new(1u16)).is_err());
                assert!(value
                    .try_compare_and_swap(&Payload::new(1u16), Payload::new(2u8))
                    .is_err());
                assert!(value.try_compare_and_swap(&current, Payload::new(2u8)).unwrap());
            }

            #[test]
            fn test_try_add_combined_type_mismatch() {
                let value = Register::with_strategy(Payload::new(1i32))
                    .with_combine(|_, _| Payload::new(String::new()));
                assert!(matches!(
                    value.try_add(&Payload::new(1i32)),
                    Err(RegisterError::TypeMismatch { .. })
                ));
            }

            #[test]
            #[should_panic(expected = "type mismatch")]
            fn test_store_type_mismatch_panics() {
                let value = Register::with_strategy(Payload::new(String::from("text")));
                value.store(Payload::new(1i32));
            }

            #[test]
            #[should_panic(expected = "type mismatch")]
            fn test_compare_and_swap_type_mismatch_panics() {
                let value = Register::with_strategy(Payload::new(1i32));
                let current = value.load().unwrap();
                value.compare_and_swap(&current, Payload::new(1i64));
            }

            #[test]
            fn test_debug() {
                let value = Register::default().with_combine(int_sum);
                let text = format!("{:?}", value);
                assert!(text.contains("combine: true"));
            }
        }
    };
}

test_value_strategy!(prism3_register::LockFreeSlot, lock_free);
test_value_strategy!(prism3_register::SpinSlot, spin);

#[test]
fn test_default_strategy_constructors() {
    use prism3_register::{
        Payload,
        Value,
    };

    let value = Value::new(Payload::new(1i32));
    assert_eq!(value.load_as::<i32>().as_deref(), Some(&1));
    let value = Value::empty();
    assert!(value.load().is_none());
    let value = Value::from(Payload::new(2i32));
    assert_eq!(value.load_as::<i32>().as_deref(), Some(&2));
}
