pub mod create;
pub mod delete;
pub mod update;

pub use create::CreateTractorCommand;
pub use update::UpdateTractorCommand;
