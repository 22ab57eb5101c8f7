//! Declarative validation of listing query parameters.
//!
//! A [`QueryRule`] names a parameter, its default literal, the validator to
//! apply, and the slot the typed result lands in. Rules run in declaration
//! order and fail fast: the first failure produces a 400 naming the offending
//! parameter and the handler never runs, so no partially validated state is
//! ever observable downstream.

use axum::{extract::Request, middleware::Next, response::Response};
use url::form_urlencoded;

use crate::database::listing::{ListingParams, DEFAULT_SORT_KEY, SORT_COLUMNS};
use crate::error::ApiError;

#[derive(Clone, Copy, Debug)]
pub enum QueryKey {
    Page,
    Limit,
    SortBy,
    MinPrice,
    MaxPrice,
}

#[derive(Clone, Copy, Debug)]
pub enum QueryValue {
    Int(i32),
    Column(&'static str),
}

#[derive(Clone, Copy)]
pub enum Validator {
    /// Base-10 integer, strictly positive.
    PositiveInt,
    /// Key of a fixed mapping; the success value is the mapped safe
    /// representation, never the raw input.
    OneOf(&'static [(&'static str, &'static str)]),
}

impl Validator {
    fn apply(&self, value: &str) -> Result<QueryValue, String> {
        match self {
            Validator::PositiveInt => {
                let n: i32 = value
                    .parse()
                    .map_err(|_| format!("{value} must be an integer"))?;
                if n <= 0 {
                    return Err(format!("{value} must be a positive integer"));
                }
                Ok(QueryValue::Int(n))
            }
            Validator::OneOf(map) => map
                .iter()
                .find(|(key, _)| *key == value)
                .map(|(_, mapped)| QueryValue::Column(*mapped))
                .ok_or_else(|| format!("{value} is not an allowed value")),
        }
    }
}

pub struct QueryRule {
    pub param: &'static str,
    pub default: &'static str,
    pub validator: Validator,
    pub key: QueryKey,
}

/// Validation plan for GET /api/v1/announcements.
pub const LISTING_RULES: &[QueryRule] = &[
    QueryRule {
        param: "page",
        default: "1",
        validator: Validator::PositiveInt,
        key: QueryKey::Page,
    },
    QueryRule {
        param: "limit",
        default: "10",
        validator: Validator::PositiveInt,
        key: QueryKey::Limit,
    },
    QueryRule {
        param: "sort_by",
        default: DEFAULT_SORT_KEY,
        validator: Validator::OneOf(SORT_COLUMNS),
        key: QueryKey::SortBy,
    },
    QueryRule {
        param: "min_price",
        default: "1",
        validator: Validator::PositiveInt,
        key: QueryKey::MinPrice,
    },
    QueryRule {
        param: "max_price",
        default: "2147483647",
        validator: Validator::PositiveInt,
        key: QueryKey::MaxPrice,
    },
];

/// Middleware wrapping the listing handler: applies [`LISTING_RULES`] to the
/// raw query string and injects the typed [`ListingParams`] into request
/// extensions.
pub async fn validate_listing_query(
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let query = request.uri().query().unwrap_or("");
    let params = apply_rules(LISTING_RULES, query)?;

    request.extensions_mut().insert(params);
    Ok(next.run(request).await)
}

/// Run a validation plan against a raw query string.
///
/// A slot is populated if and only if its rule passed; since every failure
/// aborts the remaining rules, a returned `ListingParams` is fully validated.
pub fn apply_rules(rules: &[QueryRule], query: &str) -> Result<ListingParams, ApiError> {
    let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    let mut collected = Collected::default();

    for rule in rules {
        // First occurrence wins; an empty value counts as absent
        let raw = match pairs.iter().find(|(key, _)| key == rule.param) {
            Some((_, value)) if !value.is_empty() => value.as_str(),
            _ => rule.default,
        };

        let value = rule.validator.apply(raw).map_err(|msg| {
            ApiError::bad_request(format!("Invalid query parameter {}: {}", rule.param, msg))
        })?;
        collected.set(rule.key, value);
    }

    collected
        .finish()
        .ok_or_else(|| ApiError::internal_server_error("Listing rule set is incomplete"))
}

#[derive(Default)]
struct Collected {
    page: Option<i32>,
    limit: Option<i32>,
    sort: Option<&'static str>,
    min_price: Option<i32>,
    max_price: Option<i32>,
}

impl Collected {
    fn set(&mut self, key: QueryKey, value: QueryValue) {
        match (key, value) {
            (QueryKey::Page, QueryValue::Int(n)) => self.page = Some(n),
            (QueryKey::Limit, QueryValue::Int(n)) => self.limit = Some(n),
            (QueryKey::SortBy, QueryValue::Column(c)) => self.sort = Some(c),
            (QueryKey::MinPrice, QueryValue::Int(n)) => self.min_price = Some(n),
            (QueryKey::MaxPrice, QueryValue::Int(n)) => self.max_price = Some(n),
            _ => {}
        }
    }

    fn finish(self) -> Option<ListingParams> {
        Some(ListingParams {
            page: self.page?,
            limit: self.limit?,
            sort: self.sort?,
            min_price: self.min_price?,
            max_price: self.max_price?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_on_empty_query() {
        let params = apply_rules(LISTING_RULES, "").expect("defaults");
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.sort, "created_at DESC");
        assert_eq!(params.min_price, 1);
        assert_eq!(params.max_price, 2147483647);
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let params =
            apply_rules(LISTING_RULES, "page=2&limit=5&sort_by=price_asc&min_price=100&max_price=200")
                .expect("valid query");
        assert_eq!(params.page, 2);
        assert_eq!(params.limit, 5);
        assert_eq!(params.sort, "price ASC");
        assert_eq!(params.min_price, 100);
        assert_eq!(params.max_price, 200);
    }

    #[test]
    fn test_empty_value_falls_back_to_default() {
        let params = apply_rules(LISTING_RULES, "page=&limit=3").expect("valid query");
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 3);
    }

    #[test]
    fn test_unknown_sort_rejected_with_param_name() {
        let err = apply_rules(LISTING_RULES, "sort_by=price; DROP TABLE users").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("sort_by"));
    }

    #[test]
    fn test_non_positive_integers_rejected() {
        assert!(apply_rules(LISTING_RULES, "page=0").is_err());
        assert!(apply_rules(LISTING_RULES, "limit=-3").is_err());
        assert!(apply_rules(LISTING_RULES, "min_price=abc").is_err());
    }

    #[test]
    fn test_fail_fast_reports_first_failing_rule() {
        // page is declared before sort_by, so its failure is the one reported
        let err = apply_rules(LISTING_RULES, "page=abc&sort_by=bogus").unwrap_err();
        assert!(err.message().contains("page"));
        assert!(!err.message().contains("sort_by"));
    }
}
