mod error;
mod server;
pub mod services;
pub mod state;

pub use error::ApiError;
pub use server::{router, run};
