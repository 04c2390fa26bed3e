pub mod user_data_service;
pub mod gemini_service;
pub mod custom_search_service;

pub use user_data_service::*;
