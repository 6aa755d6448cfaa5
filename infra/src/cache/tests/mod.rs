//! Tests for cache module
