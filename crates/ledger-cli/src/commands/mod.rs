pub mod batch;
pub mod check_tag;
pub mod decide;
pub mod dispatch;
pub mod draft;
pub mod filter;
pub mod schema;
pub mod shared;
pub mod submit;
