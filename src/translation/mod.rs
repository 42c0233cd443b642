pub mod languages;
pub mod interface;
pub mod evaluation;
pub mod service;

pub use languages::*;
pub use interface::*;
pub use evaluation::*;
pub use service::*;
