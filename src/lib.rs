//! Parley query core
//!
//! Compiles the `filter` / `orderBy` / `limit` / `offset` arguments of the
//! chat GraphQL API into document-store query arguments. Resolvers build a
//! [`query::QueryBuilder`] from their arguments and hand the resulting
//! [`query::CompiledQuery`] to the storage layer.

pub mod config;
pub mod graphql;
pub mod query;
pub mod telemetry;

pub use config::Config;
pub use query::{CompileOptions, CompiledQuery, FilterError, QueryBuilder};
