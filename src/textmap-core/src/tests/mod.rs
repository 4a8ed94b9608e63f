//! Behavioural tests for textmap-core

#[cfg(test)]
pub mod replace_tests;
