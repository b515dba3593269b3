//! Property-based tests

mod dedup_proptest;
