pub mod algorithm;
pub mod common;
pub mod config;
pub mod error;
pub mod map;
pub mod ranking;
pub mod render;
pub mod stat;
