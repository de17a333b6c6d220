pub mod monitor;
pub mod registry;
