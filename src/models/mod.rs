pub mod recipe;
pub mod user;

pub use recipe::*;
pub use user::*;
