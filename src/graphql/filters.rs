//! GraphQL filter and order arguments for the chat entities
//!
//! Filter inputs keep the suffix-encoded field names clients already send
//! (`username_regex`, `memberIds_has`, ...) and convert into a
//! [`FilterExpression`] for the filter compiler. Order enums carry the raw
//! `<field>_<ASC|DESC>` token for the order compiler.

use async_graphql::{ID, InputObject};

use crate::query::{FilterError, FilterExpression, FilterValue};

/// Conversion of a filter argument into the compiler's input model.
pub trait IntoFilterExpression {
    fn into_filter_expression(self) -> Result<FilterExpression, FilterError>;
}

impl IntoFilterExpression for FilterExpression {
    fn into_filter_expression(self) -> Result<FilterExpression, FilterError> {
        Ok(self)
    }
}

/// Untyped `JSON` filter argument; it must be an object or null.
impl IntoFilterExpression for async_graphql::Json<serde_json::Value> {
    fn into_filter_expression(self) -> Result<FilterExpression, FilterError> {
        FilterExpression::from_json(self.0)
    }
}

/// Order enumerants that map onto an order token.
pub trait OrderToken {
    fn token(&self) -> &'static str;
}

/// Define a `createdAt_ASC` / `createdAt_DESC` order enum for an entity.
///
/// Usage:
/// ```ignore
/// define_order_enum!(UserOrder);
/// ```
#[macro_export]
macro_rules! define_order_enum {
    ($name:ident) => {
        #[derive(async_graphql::Enum, Copy, Clone, Debug, Eq, PartialEq)]
        pub enum $name {
            #[graphql(name = "createdAt_ASC")]
            CreatedAtAsc,
            #[graphql(name = "createdAt_DESC")]
            CreatedAtDesc,
        }

        impl $crate::graphql::filters::OrderToken for $name {
            fn token(&self) -> &'static str {
                match self {
                    $name::CreatedAtAsc => "createdAt_ASC",
                    $name::CreatedAtDesc => "createdAt_DESC",
                }
            }
        }
    };
}

define_order_enum!(UserOrder);
define_order_enum!(GroupOrder);
define_order_enum!(MessageOrder);
define_order_enum!(ConversationOrder);

fn push_opt(expr: &mut FilterExpression, key: &str, value: Option<impl Into<FilterValue>>) {
    if let Some(value) = value {
        expr.insert(key, value);
    }
}

fn id_value(id: ID) -> FilterValue {
    FilterValue::String(id.0)
}

// ============================================================================
// Entity filters
// ============================================================================

#[derive(InputObject, Default, Clone, Debug)]
#[graphql(name = "UserFilter")]
pub struct UserFilter {
    pub id: Option<ID>,
    /// Case-insensitive substring of the username
    #[graphql(name = "username_regex")]
    pub username_regex: Option<String>,
    /// Case-insensitive substring of the full name
    #[graphql(name = "fullName_regex")]
    pub full_name_regex: Option<String>,
}

impl IntoFilterExpression for UserFilter {
    fn into_filter_expression(self) -> Result<FilterExpression, FilterError> {
        let mut expr = FilterExpression::new();
        push_opt(&mut expr, "id", self.id.map(id_value));
        push_opt(&mut expr, "username_regex", self.username_regex);
        push_opt(&mut expr, "fullName_regex", self.full_name_regex);
        Ok(expr)
    }
}

#[derive(InputObject, Clone, Debug)]
#[graphql(name = "GroupFilter")]
pub struct GroupFilter {
    pub id: Option<ID>,
    #[graphql(name = "name_regex")]
    pub name_regex: Option<String>,
    #[graphql(name = "description_regex")]
    pub description_regex: Option<String>,
    /// Only groups that list this user among their members
    #[graphql(name = "memberIds_has")]
    pub member_ids_has: ID,
}

impl IntoFilterExpression for GroupFilter {
    fn into_filter_expression(self) -> Result<FilterExpression, FilterError> {
        let mut expr = FilterExpression::new();
        push_opt(&mut expr, "id", self.id.map(id_value));
        push_opt(&mut expr, "name_regex", self.name_regex);
        push_opt(&mut expr, "description_regex", self.description_regex);
        expr.insert("memberIds_has", id_value(self.member_ids_has));
        Ok(expr)
    }
}

#[derive(InputObject, Default, Clone, Debug)]
#[graphql(name = "MessageFilter")]
pub struct MessageFilter {
    pub id: Option<ID>,
    #[graphql(name = "content_regex")]
    pub content_regex: Option<String>,
}

impl IntoFilterExpression for MessageFilter {
    fn into_filter_expression(self) -> Result<FilterExpression, FilterError> {
        let mut expr = FilterExpression::new();
        push_opt(&mut expr, "id", self.id.map(id_value));
        push_opt(&mut expr, "content_regex", self.content_regex);
        Ok(expr)
    }
}

#[derive(InputObject, Default, Clone, Debug)]
#[graphql(name = "ConversationFilter")]
pub struct ConversationFilter {
    #[graphql(name = "user1Id")]
    pub user1_id: Option<ID>,
    #[graphql(name = "user2Id")]
    pub user2_id: Option<ID>,
}

impl IntoFilterExpression for ConversationFilter {
    fn into_filter_expression(self) -> Result<FilterExpression, FilterError> {
        let mut expr = FilterExpression::new();
        push_opt(&mut expr, "user1Id", self.user1_id.map(id_value));
        push_opt(&mut expr, "user2Id", self.user2_id.map(id_value));
        Ok(expr)
    }
}
