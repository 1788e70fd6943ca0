//! Filter / order compiler
//!
//! Compiles the `filter`, `orderBy`, `limit` and `offset` arguments of a
//! list query into the document store's native query arguments:
//! - `filter`: suffix-encoded keys (`age_gte`, `name_regex`, `OR`, ...) into
//!   a predicate document that always excludes soft-deleted records
//! - `orderBy`: a `<field>_<ASC|DESC>` token into a one-key sort spec
//! - `limit` / `offset`: into `take` / `skip`
//!
//! ```rust,ignore
//! use crate::query::{CompileOptions, QueryBuilder};
//!
//! let query = QueryBuilder::new(CompileOptions::default())
//!     .filter(args.filter)
//!     .order_by(args.order_by)
//!     .paginate(PageArgs::new(args.limit, args.offset))
//!     .build()?;
//! ```
//!
//! Both compilers are pure and can be shared across request tasks.

mod builder;
mod document;
mod error;
pub mod filter;
pub mod identifier;
mod operator;
pub mod order;
pub mod sanitize;
mod value;

pub use builder::{CompiledQuery, QueryBuilder};
pub use document::{Bson, Document};
pub use error::FilterError;
pub use filter::{
    CompileOptions, FilterCompiler, HAS_TARGET_FIELD, SOFT_DELETE_FIELD, soft_delete_clause,
};
pub use identifier::{ObjectId, looks_like_identifier, to_native_identifier};
pub use operator::{FilterKey, LogicalGroup, Operator, parse_key};
pub use order::{OrderCompiler, SortDirection, SortSpec};
pub use sanitize::escape_pattern_metachars;
pub use value::{FilterExpression, FilterValue, coerce_value};
