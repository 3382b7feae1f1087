pub mod list;

pub use list::ListServicesQuery;
