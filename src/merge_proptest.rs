//! Property-based tests for operation partitioning and class naming.
//!
//! These tests use proptest to generate random operation sets and file names
//! and verify that the partitioning and naming invariants hold for all of them.
