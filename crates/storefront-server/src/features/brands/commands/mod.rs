pub mod create;
pub mod delete;
pub mod update;

pub use create::CreateBrandCommand;
pub use update::UpdateBrandCommand;
