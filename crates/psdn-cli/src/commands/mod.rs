pub mod check;
pub mod error;
pub mod lower;
pub mod run_common;
pub mod unit_loader;
