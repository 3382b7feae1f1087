pub mod register;

pub use register::{AdminCreated, RegisterAdminCommand, RegisterAdminError};
