// Core domain layer
pub mod classifier;
pub mod environment;
pub mod interfaces;
pub mod invoker;
pub mod models;
pub mod options;
pub mod reporter;
pub mod services;
pub mod signals;

pub use classifier::*;
pub use environment::*;
pub use interfaces::*;
pub use invoker::*;
pub use models::*;
pub use options::*;
pub use reporter::*;
pub use services::*;
pub use signals::*;
