//! Construction of the announcement listing query.
//!
//! The sort fragment is never taken from raw input: the whitelist validator
//! maps the `sort_by` query value through [`SORT_COLUMNS`] and only the mapped
//! side of that table ever reaches the SQL text.

/// Fixed mapping from public sort keys to SQL-safe column + direction pairs.
pub const SORT_COLUMNS: &[(&str, &str)] = &[
    ("price_asc", "price ASC"),
    ("price_desc", "price DESC"),
    ("date_asc", "created_at ASC"),
    ("date_desc", "created_at DESC"),
];

pub const DEFAULT_SORT_KEY: &str = "date_desc";

/// Look up a public sort key, returning the mapped SQL fragment.
pub fn sort_column(key: &str) -> Option<&'static str> {
    SORT_COLUMNS
        .iter()
        .find(|(public, _)| *public == key)
        .map(|(_, sql)| *sql)
}

/// Validated listing parameters, built once by the query validation pipeline
/// and passed to handlers through request extensions.
///
/// Invariants guaranteed by the pipeline: `page >= 1`, `limit >= 1`,
/// `min_price >= 1`, `max_price >= 1`, and `sort` is one of the mapped values
/// in [`SORT_COLUMNS`].
#[derive(Debug, Clone, Copy)]
pub struct ListingParams {
    pub page: i32,
    pub limit: i32,
    pub sort: &'static str,
    pub min_price: i32,
    pub max_price: i32,
}

impl ListingParams {
    /// Page 1 yields offset 0.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// SQL for one page of the listing.
    ///
    /// Binds: $1 = limit, $2 = offset, $3 = caller id (0 when anonymous),
    /// $4 = min price, $5 = max price. Ownership is computed per row in SQL;
    /// anonymous callers ($3 = 0, ids start at 1) get NULL on every row.
    pub fn select_sql(&self) -> String {
        format!(
            "SELECT users.username AS owner_username, announcements.title, announcements.text, \
             announcements.image_url, announcements.price, \
             CASE WHEN $3 > 0 THEN (announcements.user_id = $3) ELSE NULL END AS is_owner \
             FROM announcements \
             JOIN users ON announcements.user_id = users.id \
             WHERE announcements.price >= $4 AND announcements.price <= $5 \
             ORDER BY {} \
             LIMIT $1 OFFSET $2",
            self.sort
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: i32, limit: i32, sort_key: &str) -> ListingParams {
        ListingParams {
            page,
            limit,
            sort: sort_column(sort_key).expect("known sort key"),
            min_price: 1,
            max_price: i32::MAX,
        }
    }

    #[test]
    fn test_first_page_offset_is_zero() {
        assert_eq!(params(1, 10, "date_desc").offset(), 0);
    }

    #[test]
    fn test_offset_arithmetic() {
        assert_eq!(params(2, 5, "date_desc").offset(), 5);
        assert_eq!(params(3, 10, "date_desc").offset(), 20);
    }

    #[test]
    fn test_sort_column_whitelist() {
        assert_eq!(sort_column("price_asc"), Some("price ASC"));
        assert_eq!(sort_column("date_desc"), Some("created_at DESC"));
        assert_eq!(sort_column("price; DROP TABLE users"), None);
        assert_eq!(sort_column(""), None);
    }

    #[test]
    fn test_select_sql_uses_mapped_sort() {
        let sql = params(1, 10, "price_asc").select_sql();
        assert!(sql.contains("ORDER BY price ASC"));
        assert!(sql.contains("LIMIT $1 OFFSET $2"));
        assert!(sql.contains("price >= $4"));
    }
}
