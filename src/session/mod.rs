pub mod interface;
pub mod registry;
