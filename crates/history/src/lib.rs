pub mod schema;
pub mod normalize;
pub mod query;
pub mod validate;
pub mod store;

pub use schema::*;
pub use normalize::*;
pub use query::*;
pub use validate::*;
pub use store::*;
