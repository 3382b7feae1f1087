pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateProductCommand, ProductCreated};
pub use update::UpdateProductCommand;
