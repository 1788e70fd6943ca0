//! Integration tests for the filter / order compiler
//!
//! These tests drive the public API the way a resolver does:
//! - raw JSON filters and typed GraphQL filters
//! - order tokens and order enums
//! - pagination defaults

use async_graphql::{ID, Json};
use parley_query::graphql::{GroupFilter, GroupOrder, MessageFilter, PageArgs, UserFilter};
use parley_query::query::{
    CompileOptions, FilterCompiler, FilterError, FilterExpression, OrderCompiler, QueryBuilder,
};
use serde_json::{Value, json};

fn compile_json(filter: Value) -> Value {
    let expr = FilterExpression::from_json(filter).unwrap();
    FilterCompiler::default()
        .compile(Some(&expr))
        .unwrap()
        .to_json()
}

// ============================================================================
// Filter scenarios
// ============================================================================

mod filters {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_and_group_scenario() {
        assert_eq!(
            compile_json(json!({
                "AND": [{ "gender_eq": "male" }, { "fullName_regex": "^A" }]
            })),
            json!({
                "$and": [
                    { "gender": { "$eq": "male" } },
                    { "fullName": { "contains": "^A", "mode": "insensitive" } }
                ],
                "deletedAt": { "isSet": false }
            })
        );
    }

    #[test]
    fn test_or_group_matches_single_field_compilation() {
        let grouped = compile_json(json!({ "OR": [{ "a": 1 }, { "b_gte": 2 }] }));
        let branches = grouped["$or"].as_array().unwrap();
        assert_eq!(branches.len(), 2);

        for (branch, single) in branches.iter().zip([json!({ "a": 1 }), json!({ "b_gte": 2 })]) {
            let mut alone = compile_json(single);
            alone.as_object_mut().unwrap().remove("deletedAt");
            assert_eq!(branch, &alone);
        }
    }

    #[test]
    fn test_nested_groups() {
        assert_eq!(
            compile_json(json!({
                "or": [
                    { "AND": [{ "age_gte": 18 }, { "age_lt": 30 }] },
                    { "name_permute": "white mushroom" }
                ]
            })),
            json!({
                "$or": [
                    { "$and": [{ "age": { "$gte": 18 } }, { "age": { "$lt": 30 } }] },
                    { "name": { "$regex": "(?=.*white)(?=.*mushroom)", "$options": "i" } }
                ],
                "deletedAt": { "isSet": false }
            })
        );
    }

    #[test]
    fn test_reference_fields_in_groups() {
        assert_eq!(
            compile_json(json!({
                "OR": [
                    { "sender_id": "507f1f77bcf86cd799439011" },
                    { "receiver_id_in": ["507f191e810c19729de860ea", "nobody"] }
                ]
            })),
            json!({
                "$or": [
                    { "sender": { "$oid": "507f1f77bcf86cd799439011" } },
                    { "receiver_id": { "$in": [{ "$oid": "507f191e810c19729de860ea" }, "nobody"] } }
                ],
                "deletedAt": { "isSet": false }
            })
        );
    }

    #[test]
    fn test_multiple_keys_merge() {
        assert_eq!(
            compile_json(json!({
                "content_contains": "a+b",
                "createdAt_obj": { "c_gte": 100, "c_lt": 200 },
                "read_ne": "false",
                "unknown_suffix_here": "x",
                "skipped": ""
            })),
            json!({
                "content": { "$regex": r".*a\+b.*" },
                "createdAt": { "$gte": 100, "$lt": 200 },
                "read": { "$ne": false },
                "unknown_suffix_here": "x",
                "deletedAt": { "isSet": false }
            })
        );
    }

    #[test]
    fn test_soft_delete_survives_every_input() {
        for filter in [
            json!(null),
            json!({}),
            json!({ "deletedAt": null }),
            json!({ "deletedAt": "now" }),
            json!({ "deletedAt": { "isSet": true } }),
            json!({ "deletedAt_ne": 1 }),
        ] {
            let compiled = compile_json(filter.clone());
            assert_eq!(
                compiled["deletedAt"]["isSet"],
                json!(false),
                "filter {filter}"
            );
        }
    }

    #[test]
    fn test_contract_violations_fail_fast() {
        let compiler = FilterCompiler::default();
        let expr = FilterExpression::from_json(json!({ "a": 1, "tags_all": "x" })).unwrap();
        assert_eq!(
            compiler.compile(Some(&expr)),
            Err(FilterError::ExpectedList {
                key: "tags_all".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_value_shapes_are_rejected() {
        let compiler = FilterCompiler::new(CompileOptions::default().with_raw_patterns(true));
        for (filter, expected) in [
            (
                json!({ "name_contains": { "a": 1 } }),
                FilterError::ExpectedScalar { key: "name_contains".to_string() },
            ),
            (
                json!({ "name_regex": ["a", "b"] }),
                FilterError::ExpectedScalar { key: "name_regex".to_string() },
            ),
            (
                json!({ "name_dregex": ["^a"] }),
                FilterError::ExpectedScalar { key: "name_dregex".to_string() },
            ),
            (
                json!({ "name_permute": { "x": 1 } }),
                FilterError::ExpectedScalar { key: "name_permute".to_string() },
            ),
            (
                json!({ "group_id": "general" }),
                FilterError::InvalidIdentifier { key: "group_id".to_string() },
            ),
            (
                json!({ "OR": [{ "group_id": { "x": 1 } }] }),
                FilterError::InvalidIdentifier { key: "group_id".to_string() },
            ),
        ] {
            let expr = FilterExpression::from_json(filter.clone()).unwrap();
            assert_eq!(compiler.compile(Some(&expr)), Err(expected), "filter {filter}");
        }
    }

    #[test]
    fn test_raw_patterns_are_opt_in() {
        let expr = FilterExpression::from_json(json!({ "email_dregex": "^(a|b)" })).unwrap();

        let err = FilterCompiler::default().compile(Some(&expr)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "raw pattern filter `email_dregex` is not enabled for this query"
        );

        let compiled = FilterCompiler::new(CompileOptions::default().with_raw_patterns(true))
            .compile(Some(&expr))
            .unwrap();
        assert_eq!(
            compiled.to_json()["email"],
            json!({ "$regex": "^(a|b)", "$options": "i" })
        );
    }
}

// ============================================================================
// Order compiler
// ============================================================================

mod orders {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_order_tokens() {
        let spec = OrderCompiler.compile(Some("createdAt_DESC")).unwrap().unwrap();
        assert_eq!(spec.to_json(), json!({ "createdAt": "desc" }));
        assert_eq!(OrderCompiler.compile(None).unwrap(), None);
    }
}

// ============================================================================
// Resolver-level flow
// ============================================================================

mod resolver_flow {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_groups_query() {
        let query = QueryBuilder::new(CompileOptions::default())
            .filter(Some(GroupFilter {
                id: None,
                name_regex: Some("rust".to_string()),
                description_regex: None,
                member_ids_has: ID("507f1f77bcf86cd799439011".to_string()),
            }))
            .order_by(Some(GroupOrder::CreatedAtAsc))
            .paginate(PageArgs::new(None, Some(10)))
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "where": {
                    "name": { "contains": "rust", "mode": "insensitive" },
                    "memberIds": { "has": "507f1f77bcf86cd799439011" },
                    "deletedAt": { "isSet": false }
                },
                "orderBy": { "createdAt": "asc" },
                "skip": 10,
                "take": 10
            })
        );
    }

    #[test]
    fn test_typed_and_json_filters_agree() {
        let typed = QueryBuilder::default()
            .filter(Some(MessageFilter {
                id: Some(ID("m1".to_string())),
                content_regex: Some("hello".to_string()),
            }))
            .build()
            .unwrap();

        let untyped = QueryBuilder::default()
            .filter(Some(Json(json!({ "id": "m1", "content_regex": "hello" }))))
            .build()
            .unwrap();

        assert_eq!(typed, untyped);
    }

    #[test]
    fn test_users_query_without_arguments() {
        let query = QueryBuilder::default()
            .filter(None::<UserFilter>)
            .build()
            .unwrap();

        assert_eq!(query.order_by, None);
        assert_eq!(query.skip, 0);
        assert_eq!(query.take, 10);
        assert_eq!(
            query.predicate.to_json(),
            json!({ "deletedAt": { "isSet": false } })
        );
    }

    #[test]
    fn test_errors_convert_for_resolvers() {
        let err = QueryBuilder::default()
            .order_token(Some("createdAt_SIDEWAYS"))
            .build()
            .unwrap_err();
        let gql: async_graphql::Error = err.into();
        assert!(gql.message.contains("createdAt_SIDEWAYS"));
    }
}
