//! Shared fixtures for dataflow analysis tests.
