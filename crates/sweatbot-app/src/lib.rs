// Application and presentation layers, exposed as a library so the binary
// and the integration tests share one wiring.

pub mod application;
pub mod presentation;
