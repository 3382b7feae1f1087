pub mod create;
pub mod delete;
pub mod update;

pub use create::CreateCategoryCommand;
pub use update::UpdateCategoryCommand;
