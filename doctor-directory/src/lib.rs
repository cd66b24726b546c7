//! Doctor directory core: the record store, the query state and its location
//! codec, the filter/sort and suggestion engines, and the session that keeps
//! them consistent.

mod client;
pub mod domain;
mod engine;
mod location;
mod query_params;
mod session;
mod store;
mod suggest;

pub use client::*;
pub use domain::*;
pub use engine::*;
pub use location::*;
pub use query_params::*;
pub use session::*;
pub use store::*;
pub use suggest::*;
