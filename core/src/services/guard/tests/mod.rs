//! Tests for the guard chain
