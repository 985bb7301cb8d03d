//! Coverage report formatters for CI integration.

mod lcov;

pub use lcov::LcovFormatter;
