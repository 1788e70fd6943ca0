//! Errors raised when a caller breaks the filter/order argument contract

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// `_in`, `_nin` and `_all` operate on lists
    #[error("filter key `{key}` expects a list value")]
    ExpectedList { key: String },

    /// `_obj` operates on a nested mapping
    #[error("filter key `{key}` expects an object value")]
    ExpectedObject { key: String },

    /// Pattern operators take a single text-like value
    #[error("filter key `{key}` expects a scalar value")]
    ExpectedScalar { key: String },

    /// `_id` keys take a 24-character hexadecimal identifier
    #[error("filter key `{key}` expects a document identifier")]
    InvalidIdentifier { key: String },

    /// `AND` / `OR` take a list of nested filters
    #[error("logical group `{key}` expects a list of filter objects")]
    ExpectedGroupList { key: String },

    #[error("raw pattern filter `{key}` is not enabled for this query")]
    RawPatternDisabled { key: String },

    #[error("invalid order `{token}`: expected <field>_ASC or <field>_DESC")]
    InvalidOrder { token: String },
}
