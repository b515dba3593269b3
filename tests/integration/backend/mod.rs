//! Backend HTTP integration tests

mod email_test;
mod images_test;
