pub mod create;
pub mod delete;
pub mod update;

pub use create::CreatePostCommand;
pub use update::UpdatePostCommand;
