pub mod create;
pub mod delete;
pub mod update;

pub use create::CreateServiceCommand;
pub use update::UpdateServiceCommand;
