#[macro_use]
extern crate log;
extern crate env_logger;

#[macro_use]
extern crate more_asserts;

#[macro_use]
pub mod utils;

pub mod config;
pub mod loader;

pub mod vm;
