pub mod config;
pub mod descriptor;
pub mod extract;
pub mod loader;
pub mod meta;
pub mod model;
