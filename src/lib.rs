pub mod config;
pub mod errors;
pub mod filter_cmd;
pub mod scheduler;
pub mod spec;
pub mod state;
mod volumebind;

#[cfg(test)]
mod test_helpers;

pub use volumebind::{volumebind, volumebind_with_args, Cli};
