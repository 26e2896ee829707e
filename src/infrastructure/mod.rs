// Infrastructure layer
pub mod file_system;
pub mod pipeline;
pub mod process;

pub use file_system::*;
pub use pipeline::*;
pub use process::*;
