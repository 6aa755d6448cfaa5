//! Tests for the account service

mod service_tests;
