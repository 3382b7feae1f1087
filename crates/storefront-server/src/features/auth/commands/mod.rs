pub mod login;
pub mod register;

pub use login::{LoginCommand, LoginError};
pub use register::{RegisterUserCommand, RegisterUserError};
