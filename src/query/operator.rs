//! Filter key grammar
//!
//! A filter key is either a logical group keyword or a field name carrying
//! at most one operator suffix. Suffixes are tested in table order, so the
//! more specific suffix of any overlapping pair (`_nin`/`_in`,
//! `_gte`/`_gt`, `_lte`/`_lt`) must come first.

/// Operator selected by a filter key suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `_id`: equality against a document reference
    Reference,
    Eq,
    Ne,
    Lte,
    Gte,
    Lt,
    Gt,
    NotIn,
    In,
    /// `_all`: array contains every listed value
    All,
    /// `_contains`: case-sensitive literal substring
    Contains,
    /// `_regex`: case-insensitive literal substring, despite the suffix name
    ContainsInsensitive,
    /// `_dregex`: caller-supplied pattern passed through unescaped
    RawPatternInsensitive,
    /// `_permute`: every whitespace token present, any order
    AllTokensInsensitive,
    /// `_obj`: several comparison operators on one field
    Range,
    /// `_has`: membership in the group member list
    Has,
}

const SUFFIXES: &[(&str, Operator)] = &[
    ("_id", Operator::Reference),
    ("_eq", Operator::Eq),
    ("_ne", Operator::Ne),
    ("_lte", Operator::Lte),
    ("_gte", Operator::Gte),
    ("_lt", Operator::Lt),
    ("_gt", Operator::Gt),
    ("_nin", Operator::NotIn),
    ("_in", Operator::In),
    ("_all", Operator::All),
    ("_contains", Operator::Contains),
    ("_regex", Operator::ContainsInsensitive),
    ("_dregex", Operator::RawPatternInsensitive),
    ("_permute", Operator::AllTokensInsensitive),
    ("_obj", Operator::Range),
    ("_has", Operator::Has),
];

impl Operator {
    /// Native operator name for the single-operator comparisons.
    pub fn native_name(self) -> Option<&'static str> {
        match self {
            Operator::Eq => Some("$eq"),
            Operator::Ne => Some("$ne"),
            Operator::Lte => Some("$lte"),
            Operator::Gte => Some("$gte"),
            Operator::Lt => Some("$lt"),
            Operator::Gt => Some("$gt"),
            Operator::NotIn => Some("$nin"),
            Operator::In => Some("$in"),
            Operator::All => Some("$all"),
            _ => None,
        }
    }
}

/// Logical combinator over nested filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalGroup {
    And,
    Or,
}

impl LogicalGroup {
    pub fn native_name(self) -> &'static str {
        match self {
            LogicalGroup::And => "$and",
            LogicalGroup::Or => "$or",
        }
    }
}

/// Classified filter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey<'a> {
    Group(LogicalGroup),
    Field {
        field: &'a str,
        operator: Option<Operator>,
    },
}

/// Classify a filter key. Unknown suffixes fall through to plain equality on
/// the whole key.
pub fn parse_key(key: &str) -> FilterKey<'_> {
    match key {
        "OR" | "or" => return FilterKey::Group(LogicalGroup::Or),
        "AND" | "and" => return FilterKey::Group(LogicalGroup::And),
        _ => {}
    }

    SUFFIXES
        .iter()
        .find_map(|(suffix, operator)| {
            key.strip_suffix(suffix)
                .filter(|field| !field.is_empty())
                .map(|field| FilterKey::Field {
                    field,
                    operator: Some(*operator),
                })
        })
        .unwrap_or(FilterKey::Field {
            field: key,
            operator: None,
        })
}
