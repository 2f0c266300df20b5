#![allow(dead_code)]

#[cfg(unix)]
pub mod fake_runtime;
pub mod test_helpers;
