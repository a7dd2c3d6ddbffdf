//! Crate-level tests that span several modules.
