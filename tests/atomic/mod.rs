/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/


mod atomic_integer_tests;
mod atomic_string_tests;
mod atomic_value_tests;
mod trait_tests;
mod value_tests;
