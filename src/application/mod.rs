pub mod engine;
pub mod selector;
