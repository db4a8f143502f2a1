pub mod email;
pub mod jwt;
pub mod tracing;
