//! Flattening of ratings and reviews into a [`Rating`] row.

use estrella_core::Rating;
use serde_json::{Map, Value};

use crate::semi_structured::SemiStructured;

pub const REVIEW_SEPARATOR: &str = ", ";

/// Build the rating tuple for one observation from its three semi-structured
/// cells: star breakdown, top reviews, and customer reviews.
#[must_use]
pub fn extract_rating(
    stars: &SemiStructured,
    top_reviews: &SemiStructured,
    customer_reviews: &SemiStructured,
) -> Rating {
    let stars = stars.as_mapping();
    let top = top_reviews.as_mapping();

    Rating {
        five_stars: star_count(&stars, "five_stars"),
        four_stars: star_count(&stars, "four_stars"),
        three_stars: star_count(&stars, "three_stars"),
        two_stars: star_count(&stars, "two_stars"),
        one_star: star_count(&stars, "one_star"),
        positive_review: top_review(&top, "positive"),
        negative_review: top_review(&top, "negative"),
        customer_reviews: customer_review_text(customer_reviews),
    }
}

/// Numeric bucket by key; absent or non-numeric values count as zero.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn star_count(stars: &Map<String, Value>, key: &str) -> i64 {
    match stars.get(key) {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    }
}

/// `top[side]["review"]` as text, empty when any step of the path is absent.
fn top_review(top: &Map<String, Value>, side: &str) -> String {
    top.get(side)
        .and_then(Value::as_object)
        .and_then(|entry| entry.get("review"))
        .map(flatten_text)
        .unwrap_or_default()
}

fn customer_review_text(cell: &SemiStructured) -> String {
    let reviews: Vec<String> = cell
        .records()
        .into_iter()
        .filter_map(|record| record.get("review"))
        .filter(|review| !review.is_null())
        .map(flatten_text)
        .collect();
    reviews.join(REVIEW_SEPARATOR)
}

/// Render a review value as one string. Lists are joined with
/// [`REVIEW_SEPARATOR`].
fn flatten_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(flatten_text)
            .collect::<Vec<_>>()
            .join(REVIEW_SEPARATOR),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semi_structured::parse_semi_structured;

    fn rating(stars: &str, top: &str, customers: &str) -> Rating {
        extract_rating(
            &parse_semi_structured(stars),
            &parse_semi_structured(top),
            &parse_semi_structured(customers),
        )
    }

    #[test]
    fn partial_star_mapping_defaults_missing_buckets_to_zero() {
        let r = rating("{'five_stars': 120, 'four_stars': 30}", "", "");
        assert_eq!(
            (r.five_stars, r.four_stars, r.three_stars, r.two_stars, r.one_star),
            (120, 30, 0, 0, 0)
        );
    }

    #[test]
    fn empty_list_yields_all_zero_and_empty_text() {
        let r = rating("[]", "[]", "[]");
        assert_eq!(r, Rating::default());
    }

    #[test]
    fn float_and_string_counts_are_read() {
        let r = rating(r#"{"five_stars": 7.0, "one_star": "3"}"#, "", "");
        assert_eq!(r.five_stars, 7);
        assert_eq!(r.one_star, 3);
    }

    #[test]
    fn top_reviews_extract_positive_and_negative() {
        let r = rating(
            "",
            r#"{"positive": {"review": "Great"}, "negative": {"review": "Leaky"}}"#,
            "",
        );
        assert_eq!(r.positive_review, "Great");
        assert_eq!(r.negative_review, "Leaky");
    }

    #[test]
    fn top_review_missing_side_is_empty() {
        let r = rating("", r#"{"positive": {"rating": 5}}"#, "");
        assert_eq!(r.positive_review, "");
        assert_eq!(r.negative_review, "");
    }

    #[test]
    fn top_review_list_is_joined() {
        let r = rating("", r#"{"positive": {"review": ["a", "b"]}}"#, "");
        assert_eq!(r.positive_review, "a, b");
    }

    #[test]
    fn customer_reviews_are_joined_in_order() {
        let r = rating(
            "",
            "",
            r#"[{"review": "first"}, {"rating": 1}, {"review": "second"}]"#,
        );
        assert_eq!(r.customer_reviews, "first, second");
    }

    #[test]
    fn customer_reviews_from_single_quoted_list() {
        let r = rating("", "", "[{'review': 'ok'}, {'review': 'fine'}]");
        assert_eq!(r.customer_reviews, "ok, fine");
    }

    #[test]
    fn malformed_cells_fall_back_to_defaults() {
        let r = rating("{oops", "not json", "[{");
        assert_eq!(r, Rating::default());
    }
}
