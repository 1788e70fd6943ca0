//! Compiled query builder
//!
//! Combines the filter, order and pagination arguments of a list query into
//! one [`CompiledQuery`] the storage layer can execute as a single call.

use serde::Serialize;

use super::document::Document;
use super::error::FilterError;
use super::filter::{CompileOptions, FilterCompiler};
use super::order::{OrderCompiler, SortSpec};
use super::value::FilterExpression;
use crate::graphql::{IntoFilterExpression, OrderToken, PageArgs};

/// Self-contained arguments for one storage query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledQuery {
    #[serde(rename = "where")]
    pub predicate: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<SortSpec>,
    pub skip: i64,
    pub take: i64,
}

/// Fluent builder over the filter and order compilers.
///
/// Arguments are only recorded until [`QueryBuilder::build`], which runs
/// both compilers and returns the first contract violation, if any.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    options: CompileOptions,
    filter: Option<FilterExpression>,
    order: Option<String>,
    page: PageArgs,
    error: Option<FilterError>,
}

impl QueryBuilder {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Set the filter from any supported argument type.
    pub fn filter<F: IntoFilterExpression>(mut self, filter: Option<F>) -> Self {
        match filter.map(F::into_filter_expression).transpose() {
            Ok(expr) => self.filter = expr,
            Err(err) => self.fail(err),
        }
        self
    }

    /// Set the order from a typed order enum.
    pub fn order_by<O: OrderToken>(mut self, order: Option<O>) -> Self {
        self.order = order.map(|o| o.token().to_string());
        self
    }

    /// Set the order from a raw `<field>_<ASC|DESC>` token.
    pub fn order_token(mut self, token: Option<&str>) -> Self {
        self.order = token.map(str::to_string);
        self
    }

    /// Apply offset pagination.
    pub fn paginate(mut self, page: PageArgs) -> Self {
        self.page = page;
        self
    }

    fn fail(&mut self, err: FilterError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Compile everything into a [`CompiledQuery`].
    pub fn build(self) -> Result<CompiledQuery, FilterError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let predicate = FilterCompiler::new(self.options).compile(self.filter.as_ref())?;
        let order_by = OrderCompiler.compile(self.order.as_deref())?;

        let query = CompiledQuery {
            predicate,
            order_by,
            skip: self.page.skip(),
            take: self.page.take(self.options.default_limit),
        };

        tracing::debug!(
            predicate = %query.predicate.to_json(),
            order_by = ?query.order_by,
            skip = query.skip,
            take = query.take,
            "Compiled list query"
        );

        Ok(query)
    }
}
