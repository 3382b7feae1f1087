pub mod list;

pub use list::ListPostsQuery;
