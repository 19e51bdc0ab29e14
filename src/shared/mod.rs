pub mod errors;

// Shared by both hosts (tracing core is WASM-compatible)
pub mod logging;
