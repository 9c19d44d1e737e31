pub mod config;
pub mod direct;
pub mod simulate;
