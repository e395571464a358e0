//! Integration tests for report queries and parameter bags.

use chrono::NaiveDate;
use statkit_core::{DateSpec, ParamValue, Params, Period, ReportQuery, SiteSelector, ToParams};

#[test]
fn test_same_query_always_builds_same_bag() {
    let query = ReportQuery::new(Period::Week, DateSpec::Yesterday)
        .site(4)
        .segment("country==de");

    assert_eq!(query.to_params(), query.to_params());
}

#[test]
fn test_date_range_query() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let query = ReportQuery::new(Period::Range, DateSpec::range(start, end).unwrap())
        .site(SiteSelector::All);

    let params = query.to_params();
    assert_eq!(params.get("idSite"), Some(&ParamValue::Str("all".into())));
    assert_eq!(
        params.get("date"),
        Some(&ParamValue::Str("2024-01-01,2024-01-31".into()))
    );
}

#[test]
fn test_params_collect_from_pairs() {
    let params: Params = vec![("a", 1), ("b", 2), ("a", 3)].into_iter().collect();

    assert_eq!(params.len(), 2);
    assert_eq!(params.get("a"), Some(&ParamValue::Int(3)));
}
