pub mod domain;
pub mod infrastructure;
pub mod screens;
pub mod utils;
