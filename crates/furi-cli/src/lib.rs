pub mod commands;
pub mod resource_source;
