//! Library exports for sessionboot, shared between the binary and tests.

pub mod autologin;
pub mod cache;
pub mod client;
pub mod config;
pub mod identity;
pub mod models;
pub mod startup;
pub mod state;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
