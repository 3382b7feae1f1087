pub mod get_user;

pub(crate) use get_user::find_user_by_email;
pub use get_user::find_user_by_id;
