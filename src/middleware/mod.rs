pub mod user_context;

pub use user_context::{CurrentUser, UserContext, USER_ID_HEADER};
