pub mod list;

pub use list::{ListUsersQuery, DEFAULT_USERS_PAGE_SIZE, MAX_USERS_PAGE_SIZE};
