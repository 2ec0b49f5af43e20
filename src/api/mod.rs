pub mod extract;
pub mod params;

pub use extract::{JsonBody, PathParam, QueryParams};
pub use params::{non_empty, parse_positive, PageQuery};
