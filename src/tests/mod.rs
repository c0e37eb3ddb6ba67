//! Test suite for the block rendering framework
//!
//! This module organizes tests into logical groups: settings resolution,
//! form building, service/registry behavior, the full render pipeline, and
//! property-based invariants.

#[cfg(test)]
mod form_tests;
#[cfg(test)]
mod service_tests;
