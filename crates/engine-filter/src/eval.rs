use crate::{
    condition::{FilterCondition, FilterOperator, Operand},
    error::EvalError,
    mask::Mask,
};
use model::{
    core::{data_type::DataType, value::Value},
    records::dataset::Dataset,
};
use regex::RegexBuilder;
use std::cmp::Ordering;

/// Evaluate one condition against the dataset, producing a positional mask.
///
/// A failure that concerns the whole condition (unknown column, bad regex)
/// comes back as an error; a coercion failure on a single cell only makes
/// that row false.
pub fn evaluate(condition: &FilterCondition, dataset: &Dataset) -> Result<Mask, EvalError> {
    let col = dataset
        .column_index(condition.column())
        .ok_or_else(|| EvalError::UnknownColumn(condition.column().to_string()))?;

    let rows = dataset.row_count();
    let mut mask = Mask::all_false(rows);

    match condition.operator() {
        FilterOperator::Equals | FilterOperator::NotEquals => {
            let target = scalar(condition.operand());
            let negate = condition.operator() == FilterOperator::NotEquals;
            for row in 0..rows {
                let hit = raw_equal(dataset.value(row, col), target, condition.hint());
                mask.set(row, hit != negate);
            }
        }

        FilterOperator::Contains | FilterOperator::NotContains => {
            let needle = scalar(condition.operand()).render().to_lowercase();
            let negate = condition.operator() == FilterOperator::NotContains;
            for row in 0..rows {
                let cell = dataset.value(row, col);
                let hit = !cell.is_null() && cell.render().to_lowercase().contains(&needle);
                mask.set(row, hit != negate);
            }
        }

        FilterOperator::StartsWith | FilterOperator::EndsWith => {
            let probe = scalar(condition.operand()).render();
            let prefix = condition.operator() == FilterOperator::StartsWith;
            for row in 0..rows {
                let cell = dataset.value(row, col);
                if cell.is_null() {
                    continue;
                }
                let text = cell.render();
                let hit = if prefix {
                    text.starts_with(&probe)
                } else {
                    text.ends_with(&probe)
                };
                mask.set(row, hit);
            }
        }

        FilterOperator::GreaterThan
        | FilterOperator::LessThan
        | FilterOperator::GreaterEqual
        | FilterOperator::LessEqual => {
            // A non-numeric operand makes every row false, same as a
            // non-numeric cell does for its own row.
            if let Some(target) = scalar(condition.operand()).as_f64() {
                for row in 0..rows {
                    if let Some(v) = dataset.value(row, col).as_f64() {
                        mask.set(row, ordering_hit(condition.operator(), v.partial_cmp(&target)));
                    }
                }
            }
        }

        FilterOperator::Between => {
            if let Operand::Range(low, high) = condition.operand()
                && let (Some(lo), Some(hi)) = (low.as_f64(), high.as_f64())
            {
                for row in 0..rows {
                    if let Some(v) = dataset.value(row, col).as_f64() {
                        mask.set(row, lo <= v && v <= hi);
                    }
                }
            }
        }

        FilterOperator::DateEquals | FilterOperator::DateAfter | FilterOperator::DateBefore => {
            if let Some(target) = scalar(condition.operand()).as_date() {
                for row in 0..rows {
                    if let Some(d) = dataset.value(row, col).as_date() {
                        let hit = match condition.operator() {
                            FilterOperator::DateEquals => d == target,
                            FilterOperator::DateAfter => d > target,
                            _ => d < target,
                        };
                        mask.set(row, hit);
                    }
                }
            }
        }

        FilterOperator::DateBetween => {
            if let Operand::Range(start, end) = condition.operand()
                && let (Some(lo), Some(hi)) = (start.as_date(), end.as_date())
            {
                for row in 0..rows {
                    if let Some(d) = dataset.value(row, col).as_date() {
                        mask.set(row, lo <= d && d <= hi);
                    }
                }
            }
        }

        FilterOperator::IsNull | FilterOperator::IsNotNull => {
            let negate = condition.operator() == FilterOperator::IsNotNull;
            for row in 0..rows {
                mask.set(row, dataset.value(row, col).is_null() != negate);
            }
        }

        FilterOperator::Regex => {
            let pattern = scalar(condition.operand()).render();
            let re = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| EvalError::InvalidRegex {
                    pattern: pattern.clone(),
                    source,
                })?;
            for row in 0..rows {
                let cell = dataset.value(row, col);
                mask.set(row, !cell.is_null() && re.is_match(&cell.render()));
            }
        }
    }

    Ok(mask)
}

/// Scalar operand accessor. The condition constructor has already checked
/// shape-vs-operator, so a mismatch here cannot occur; Null keeps the
/// evaluation total anyway.
fn scalar(operand: &Operand) -> &Value {
    match operand {
        Operand::Scalar(v) => v,
        _ => &Value::Null,
    }
}

/// Raw comparison for equals/not_equals. With a type hint both sides are
/// re-coerced under the hinted tag first; without one the values compare
/// as-is.
fn raw_equal(cell: &Value, target: &Value, hint: Option<DataType>) -> bool {
    match hint {
        Some(DataType::Number) => match (cell.as_f64(), target.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        Some(DataType::Date) => match (cell.as_date(), target.as_date()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        Some(DataType::Text) => !cell.is_null() && cell.render() == target.render(),
        None => cell.equal(target),
    }
}

fn ordering_hit(operator: FilterOperator, ordering: Option<Ordering>) -> bool {
    match operator {
        FilterOperator::GreaterThan => matches!(ordering, Some(Ordering::Greater)),
        FilterOperator::GreaterEqual => {
            matches!(ordering, Some(Ordering::Greater) | Some(Ordering::Equal))
        }
        FilterOperator::LessThan => matches!(ordering, Some(Ordering::Less)),
        FilterOperator::LessEqual => {
            matches!(ordering, Some(Ordering::Less) | Some(Ordering::Equal))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use model::records::dataset::Column;

    fn people() -> Dataset {
        Dataset::new(
            vec![
                Column::new("age", DataType::Number),
                Column::new("name", DataType::Text),
                Column::new("joined", DataType::Date),
            ],
            vec![
                vec![
                    Value::Int(25),
                    Value::String("Alice".into()),
                    Value::Date(NaiveDate::from_ymd_opt(2023, 1, 10).unwrap()),
                ],
                vec![
                    Value::Int(40),
                    Value::String("Bob".into()),
                    Value::Date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
                ],
                vec![Value::Int(17), Value::String("Cara".into()), Value::Null],
            ],
        )
        .unwrap()
    }

    fn cond(column: &str, operator: FilterOperator, operand: Operand) -> FilterCondition {
        FilterCondition::new(column, operator, operand).unwrap()
    }

    #[test]
    fn numeric_comparison() {
        let ds = people();
        let mask = evaluate(
            &cond("age", FilterOperator::GreaterEqual, Operand::Scalar(Value::Int(18))),
            &ds,
        )
        .unwrap();
        assert_eq!(mask.as_slice(), &[true, true, false]);
    }

    #[test]
    fn between_is_inclusive_at_both_bounds() {
        let ds = people();
        let mask = evaluate(
            &cond(
                "age",
                FilterOperator::Between,
                Operand::Range(Value::Int(17), Value::Int(25)),
            ),
            &ds,
        )
        .unwrap();
        assert_eq!(mask.as_slice(), &[true, false, true]);
    }

    #[test]
    fn contains_is_case_insensitive() {
        let ds = people();
        let mask = evaluate(
            &cond(
                "name",
                FilterOperator::Contains,
                Operand::Scalar(Value::String("AR".into())),
            ),
            &ds,
        )
        .unwrap();
        assert_eq!(mask.as_slice(), &[false, false, true]);
    }

    #[test]
    fn not_contains_matches_null_cells() {
        let ds = people();
        let mask = evaluate(
            &cond(
                "joined",
                FilterOperator::NotContains,
                Operand::Scalar(Value::String("2023".into())),
            ),
            &ds,
        )
        .unwrap();
        assert_eq!(mask.as_slice(), &[false, true, true]);
    }

    #[test]
    fn starts_with_is_case_sensitive() {
        let ds = people();
        let mask = evaluate(
            &cond(
                "name",
                FilterOperator::StartsWith,
                Operand::Scalar(Value::String("alice".into())),
            ),
            &ds,
        )
        .unwrap();
        assert_eq!(mask.count_set(), 0);

        let mask = evaluate(
            &cond(
                "name",
                FilterOperator::EndsWith,
                Operand::Scalar(Value::String("ob".into())),
            ),
            &ds,
        )
        .unwrap();
        assert_eq!(mask.as_slice(), &[false, true, false]);
    }

    #[test]
    fn date_operators_ignore_time_of_day() {
        let ds = people();
        let mask = evaluate(
            &cond(
                "joined",
                FilterOperator::DateAfter,
                Operand::Scalar(Value::String("2023-12-31".into())),
            ),
            &ds,
        )
        .unwrap();
        assert_eq!(mask.as_slice(), &[false, true, false]);
    }

    #[test]
    fn date_equals_ignores_time_of_day() {
        use chrono::{TimeZone, Utc};

        let ds = Dataset::new(
            vec![Column::new("seen", DataType::Date)],
            vec![
                vec![Value::Timestamp(
                    Utc.with_ymd_and_hms(2024, 6, 1, 18, 30, 0).unwrap(),
                )],
                vec![Value::Date(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap())],
                vec![Value::Null],
            ],
        )
        .unwrap();

        let mask = evaluate(
            &cond(
                "seen",
                FilterOperator::DateEquals,
                Operand::Scalar(Value::String("2024-06-01".into())),
            ),
            &ds,
        )
        .unwrap();
        assert_eq!(mask.as_slice(), &[true, false, false]);
    }

    #[test]
    fn date_before_is_strict() {
        let ds = people();
        let mask = evaluate(
            &cond(
                "joined",
                FilterOperator::DateBefore,
                Operand::Scalar(Value::String("2024-06-01".into())),
            ),
            &ds,
        )
        .unwrap();
        // Bob joined exactly on the probe date and is excluded
        assert_eq!(mask.as_slice(), &[true, false, false]);
    }

    #[test]
    fn null_operators_partition_rows() {
        let ds = people();
        let nulls = evaluate(&cond("joined", FilterOperator::IsNull, Operand::Empty), &ds).unwrap();
        let non_nulls =
            evaluate(&cond("joined", FilterOperator::IsNotNull, Operand::Empty), &ds).unwrap();
        assert_eq!(nulls.as_slice(), &[false, false, true]);
        for row in 0..ds.row_count() {
            assert_ne!(nulls.as_slice()[row], non_nulls.as_slice()[row]);
        }
    }

    #[test]
    fn regex_search_is_case_insensitive() {
        let ds = people();
        let mask = evaluate(
            &cond(
                "name",
                FilterOperator::Regex,
                Operand::Scalar(Value::String("^a.*e$".into())),
            ),
            &ds,
        )
        .unwrap();
        assert_eq!(mask.as_slice(), &[true, false, false]);
    }

    #[test]
    fn invalid_regex_is_an_isolated_error() {
        let ds = people();
        let err = evaluate(
            &cond(
                "name",
                FilterOperator::Regex,
                Operand::Scalar(Value::String("[unclosed".into())),
            ),
            &ds,
        )
        .unwrap_err();
        assert!(matches!(err, EvalError::InvalidRegex { .. }));
    }

    #[test]
    fn unknown_column_is_an_error() {
        let ds = people();
        let err = evaluate(
            &cond("salary", FilterOperator::IsNull, Operand::Empty),
            &ds,
        )
        .unwrap_err();
        assert!(matches!(err, EvalError::UnknownColumn(_)));
    }

    #[test]
    fn equals_respects_type_hint() {
        let ds = Dataset::new(
            vec![Column::new("code", DataType::Text)],
            vec![
                vec![Value::String("007".into())],
                vec![Value::String("7".into())],
            ],
        )
        .unwrap();

        // Raw compare: "7" != 7
        let raw = cond("code", FilterOperator::Equals, Operand::Scalar(Value::Int(7)));
        assert_eq!(evaluate(&raw, &ds).unwrap().count_set(), 0);

        // Hinted as number, both string cells coerce and match
        let hinted = raw.with_hint(DataType::Number);
        assert_eq!(evaluate(&hinted, &ds).unwrap().as_slice(), &[true, true]);
    }
}
