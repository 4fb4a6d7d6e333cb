// src/core/mod.rs
pub mod distance;
pub mod engine;
pub mod pool;
pub mod prescription;
pub mod types;
