//! GraphQL argument types for list queries

pub mod filters;
pub mod pagination;

pub use filters::{
    ConversationFilter, ConversationOrder, GroupFilter, GroupOrder, IntoFilterExpression,
    MessageFilter, MessageOrder, OrderToken, UserFilter, UserOrder,
};
pub use pagination::PageArgs;
