// Kiln - production build orchestrator
// Library surface shared by the binary and integration tests

pub mod cli;
pub mod core;
pub mod infrastructure;
pub mod utils;
