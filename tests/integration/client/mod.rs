//! Client-side integration tests

mod aggregation_test;
mod cache_test;
mod gallery_test;
