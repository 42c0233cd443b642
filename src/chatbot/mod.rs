pub mod categories;
pub mod types;
pub mod service;

pub use categories::*;
pub use types::*;
pub use service::*;
