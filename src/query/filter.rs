//! Filter compiler
//!
//! Translates a client-supplied [`FilterExpression`] into a predicate
//! [`Document`] in the store's operator language:
//!
//! ```text
//! { AND: [{ gender_eq: "male" }, { fullName_regex: "^A" }] }
//!   =>
//! { $and: [{ gender: { $eq: "male" } },
//!          { fullName: { contains: "^A", mode: "insensitive" } }],
//!   deletedAt: { isSet: false } }
//! ```
//!
//! Keys are folded into one accumulator with [`Document::merge`], so a later
//! key overwrites an earlier one only on the same field and operator. The
//! soft-delete clause is merged last and cannot be removed by the caller.

use super::document::{Bson, Document};
use super::error::FilterError;
use super::operator::{FilterKey, LogicalGroup, Operator, parse_key};
use super::sanitize::{all_tokens_pattern, substring_pattern};
use super::value::{FilterExpression, FilterValue, coerce_identifier, coerce_value, plain_value};

/// Field holding the deletion timestamp of soft-deleted records
pub const SOFT_DELETE_FIELD: &str = "deletedAt";

/// Array field tested by every `_has` key, whatever its prefix
pub const HAS_TARGET_FIELD: &str = "memberIds";

/// Per-call compilation switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Allow `_dregex` keys to send an unescaped caller pattern to the store.
    pub allow_raw_patterns: bool,
    /// Page size used when the caller gives no limit
    pub default_limit: i64,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            allow_raw_patterns: false,
            default_limit: 10,
        }
    }
}

impl CompileOptions {
    pub fn with_raw_patterns(mut self, allow: bool) -> Self {
        self.allow_raw_patterns = allow;
        self
    }
}

/// The clause excluding soft-deleted records.
pub fn soft_delete_clause() -> Document {
    Document::single(SOFT_DELETE_FIELD, Document::single("isSet", false))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterCompiler {
    options: CompileOptions,
}

impl FilterCompiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Compile a filter into a predicate that always excludes soft-deleted
    /// records. An absent or empty filter yields only that clause.
    pub fn compile(&self, filter: Option<&FilterExpression>) -> Result<Document, FilterError> {
        let predicate = match filter {
            Some(expr) => self.compile_expression(expr)?,
            None => Document::new(),
        };
        Ok(predicate.merged(soft_delete_clause()))
    }

    /// Compile one mapping without the soft-delete clause.
    fn compile_expression(&self, expr: &FilterExpression) -> Result<Document, FilterError> {
        expr.iter().try_fold(Document::new(), |acc, (key, value)| {
            Ok(match self.compile_entry(key, value)? {
                Some(clause) => acc.merged(clause),
                None => acc,
            })
        })
    }

    fn compile_entry(
        &self,
        key: &str,
        value: &FilterValue,
    ) -> Result<Option<Document>, FilterError> {
        if value.is_blank() {
            tracing::trace!(key = %key, "Skipping blank filter value");
            return Ok(None);
        }

        let clause = match parse_key(key) {
            FilterKey::Group(group) => self.compile_group(key, group, value)?,
            FilterKey::Field { field, operator: None } => {
                tracing::trace!(key = %key, "No operator suffix, compiling as equality");
                Document::single(field, coerce_value(field, value))
            }
            FilterKey::Field {
                field,
                operator: Some(operator),
            } => self.compile_operator(key, field, operator, value)?,
        };

        Ok(Some(clause))
    }

    fn compile_group(
        &self,
        key: &str,
        group: LogicalGroup,
        value: &FilterValue,
    ) -> Result<Document, FilterError> {
        let expected = || FilterError::ExpectedGroupList {
            key: key.to_string(),
        };

        let branches = value
            .as_list()
            .ok_or_else(expected)?
            .iter()
            .map(|item| {
                let nested = item.as_object().ok_or_else(expected)?;
                self.compile_expression(nested).map(Bson::Document)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Document::single(group.native_name(), Bson::Array(branches)))
    }

    fn compile_operator(
        &self,
        key: &str,
        field: &str,
        operator: Operator,
        value: &FilterValue,
    ) -> Result<Document, FilterError> {
        let condition = match operator {
            Operator::Reference => {
                return Ok(Document::single(field, coerce_identifier(key, value)?));
            }

            Operator::Eq
            | Operator::Ne
            | Operator::Lte
            | Operator::Gte
            | Operator::Lt
            | Operator::Gt => Document::single(
                operator.native_name().unwrap_or_default(),
                coerce_value(field, value),
            ),

            Operator::In | Operator::NotIn => {
                let items = expect_list(key, value)?;
                let coerced = items.iter().map(|item| coerce_value(field, item)).collect();
                Document::single(operator.native_name().unwrap_or_default(), Bson::Array(coerced))
            }

            Operator::All => {
                let items = expect_list(key, value)?;
                let plain = items.iter().map(plain_value).collect();
                Document::single(operator.native_name().unwrap_or_default(), Bson::Array(plain))
            }

            Operator::Contains => {
                Document::single("$regex", substring_pattern(&expect_text(key, value)?))
            }

            Operator::ContainsInsensitive => Document::new()
                .with("contains", expect_text(key, value)?)
                .with("mode", "insensitive"),

            Operator::RawPatternInsensitive => {
                if !self.options.allow_raw_patterns {
                    tracing::warn!(key = %key, "Rejected raw pattern filter");
                    return Err(FilterError::RawPatternDisabled {
                        key: key.to_string(),
                    });
                }
                Document::new()
                    .with("$regex", expect_text(key, value)?)
                    .with("$options", "i")
            }

            Operator::AllTokensInsensitive => Document::new()
                .with("$regex", all_tokens_pattern(&expect_text(key, value)?))
                .with("$options", "i"),

            Operator::Range => {
                let entries = value.as_object().ok_or_else(|| FilterError::ExpectedObject {
                    key: key.to_string(),
                })?;
                entries
                    .iter()
                    .map(|(entry_key, entry_value)| {
                        let op = entry_key
                            .rsplit_once('_')
                            .map_or(entry_key.as_str(), |(_, op)| op);
                        (format!("${op}"), coerce_value(field, entry_value))
                    })
                    .collect()
            }

            Operator::Has => {
                if field != HAS_TARGET_FIELD {
                    tracing::debug!(
                        key = %key,
                        member_field = HAS_TARGET_FIELD,
                        "Membership filter always targets the member list"
                    );
                }
                return Ok(Document::single(
                    HAS_TARGET_FIELD,
                    Document::single("has", plain_value(value)),
                ));
            }
        };

        Ok(Document::single(field, condition))
    }
}

fn expect_list<'v>(key: &str, value: &'v FilterValue) -> Result<&'v [FilterValue], FilterError> {
    value.as_list().ok_or_else(|| FilterError::ExpectedList {
        key: key.to_string(),
    })
}

fn expect_text(key: &str, value: &FilterValue) -> Result<String, FilterError> {
    value.as_text().ok_or_else(|| FilterError::ExpectedScalar {
        key: key.to_string(),
    })
}
