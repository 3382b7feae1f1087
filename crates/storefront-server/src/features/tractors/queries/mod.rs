pub mod get;
pub mod list;

pub use list::ListTractorsQuery;
