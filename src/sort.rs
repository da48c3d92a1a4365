/// The value ordering shared by every engine.
///
/// Grouped outputs (time series, pivot axes, selector lists) are sorted
/// explicitly through `compare_values` rather than relying on hash or
/// insertion order.
use crate::column::ColumnValue;
use std::cmp::Ordering;

/// Ascending total order over values: numbers compare numerically across
/// integer and float variants, strings lexicographically, and nulls sort last.
pub fn compare_values(a: &ColumnValue, b: &ColumnValue) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    match (a, b) {
        (ColumnValue::Int32(x), ColumnValue::Int32(y)) => x.cmp(y),
        (ColumnValue::Int64(x), ColumnValue::Int64(y)) => x.cmp(y),
        (ColumnValue::String(x), ColumnValue::String(y)) => x.cmp(y),
        (ColumnValue::Bool(x), ColumnValue::Bool(y)) => x.cmp(y),
        (x, y) => match (x.as_f64(), y.as_f64()) {
            (Some(fx), Some(fy)) => fx.total_cmp(&fy),
            // Mixed non-numeric types: fall back to a stable textual order
            _ => format!("{:?}", x).cmp(&format!("{:?}", y)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ordering_across_variants() {
        assert_eq!(compare_values(&ColumnValue::Int32(1896), &ColumnValue::Int32(1900)), Ordering::Less);
        assert_eq!(compare_values(&ColumnValue::Int32(2), &ColumnValue::Float64(1.5)), Ordering::Greater);
        assert_eq!(compare_values(&ColumnValue::Int64(7), &ColumnValue::Int32(7)), Ordering::Equal);
    }

    #[test]
    fn test_nulls_sort_last() {
        let null = ColumnValue::Null;
        let val = ColumnValue::from("Athletics");

        assert_eq!(compare_values(&null, &val), Ordering::Greater);
        assert_eq!(compare_values(&val, &null), Ordering::Less);
        assert_eq!(compare_values(&null, &ColumnValue::Null), Ordering::Equal);
    }

    #[test]
    fn test_strings_lexicographic() {
        let mut regions = vec![
            ColumnValue::from("USA"),
            ColumnValue::Null,
            ColumnValue::from("Argentina"),
            ColumnValue::from("Brazil"),
        ];
        regions.sort_by(compare_values);
        assert_eq!(
            regions,
            vec![
                ColumnValue::from("Argentina"),
                ColumnValue::from("Brazil"),
                ColumnValue::from("USA"),
                ColumnValue::Null,
            ]
        );
    }
}
