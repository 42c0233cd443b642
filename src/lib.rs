pub mod cli;
pub mod config;
pub mod error;
pub mod response;
pub mod state;
pub mod routes;
pub mod llm;
pub mod translation;
pub mod chatbot;
pub mod contract;

pub use routes::app;
pub use state::AppState;
