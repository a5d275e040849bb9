use crate::{
    condition::{Combinator, FilterCondition},
    error::EvalError,
    eval::evaluate,
    mask::Mask,
};
use model::records::dataset::Dataset;
use tracing::warn;

/// Result of an `apply` call: the filtered rows plus any per-condition
/// failures that were degraded to all-false masks along the way.
#[derive(Debug)]
pub struct FilterOutcome {
    pub dataset: Dataset,
    pub warnings: Vec<EvalError>,
}

/// Ordered conditions joined by pairwise combinators.
///
/// Invariant, restored after every mutation:
/// `combinators.len() == max(0, conditions.len() - 1)`, where
/// `combinators[i]` joins `conditions[i]` and `conditions[i + 1]`.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    conditions: Vec<FilterCondition>,
    combinators: Vec<Combinator>,
}

impl FilterSet {
    pub fn new() -> Self {
        FilterSet::default()
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn combinators(&self) -> &[Combinator] {
        &self.combinators
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Append a condition. The combinator joins it to the previous condition
    /// and is ignored for the first one.
    pub fn add_condition(&mut self, condition: FilterCondition, combinator: Combinator) {
        if !self.conditions.is_empty() {
            self.combinators.push(combinator);
        }
        self.conditions.push(condition);
    }

    /// Remove the condition at `index`, dropping exactly one combinator: the
    /// one at `index - 1` when removing past the head, otherwise the one that
    /// joined the old head to its successor.
    pub fn remove_condition(&mut self, index: usize) -> Option<FilterCondition> {
        if index >= self.conditions.len() {
            return None;
        }
        let removed = self.conditions.remove(index);
        if !self.combinators.is_empty() {
            let drop_at = if index > 0 { index - 1 } else { 0 };
            self.combinators.remove(drop_at);
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.conditions.clear();
        self.combinators.clear();
    }

    /// Reduce the per-condition masks left to right, element-wise, with no
    /// precedence and no short-circuiting, then select the surviving rows.
    /// An empty set is the identity transform.
    pub fn apply(&self, dataset: &Dataset) -> FilterOutcome {
        if self.conditions.is_empty() {
            return FilterOutcome {
                dataset: dataset.clone(),
                warnings: Vec::new(),
            };
        }

        let mut warnings = Vec::new();
        let mut result = mask_or_degrade(&self.conditions[0], dataset, &mut warnings);

        for (i, condition) in self.conditions.iter().enumerate().skip(1) {
            let mask = mask_or_degrade(condition, dataset, &mut warnings);
            match self.combinators[i - 1] {
                Combinator::And => result.and_assign(&mask),
                Combinator::Or => result.or_assign(&mask),
            }
        }

        let dataset = dataset
            .select(result.as_slice())
            .expect("mask is aligned with the dataset");
        FilterOutcome { dataset, warnings }
    }
}

fn mask_or_degrade(
    condition: &FilterCondition,
    dataset: &Dataset,
    warnings: &mut Vec<EvalError>,
) -> Mask {
    match evaluate(condition, dataset) {
        Ok(mask) => mask,
        Err(err) => {
            warn!(
                column = condition.column(),
                operator = %condition.operator(),
                "Condition degraded to all-false: {err}"
            );
            warnings.push(err);
            Mask::all_false(dataset.row_count())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{FilterOperator, Operand};
    use model::core::{data_type::DataType, value::Value};
    use model::records::dataset::Column;

    fn people() -> Dataset {
        Dataset::new(
            vec![
                Column::new("age", DataType::Number),
                Column::new("name", DataType::Text),
            ],
            vec![
                vec![Value::Int(25), Value::String("Alice".into())],
                vec![Value::Int(40), Value::String("Bob".into())],
                vec![Value::Int(17), Value::String("Cara".into())],
            ],
        )
        .unwrap()
    }

    fn age_ge(n: i64) -> FilterCondition {
        FilterCondition::new(
            "age",
            FilterOperator::GreaterEqual,
            Operand::Scalar(Value::Int(n)),
        )
        .unwrap()
    }

    fn name_contains(s: &str) -> FilterCondition {
        FilterCondition::new(
            "name",
            FilterOperator::Contains,
            Operand::Scalar(Value::String(s.into())),
        )
        .unwrap()
    }

    fn names(ds: &Dataset) -> Vec<String> {
        (0..ds.row_count()).map(|r| ds.value(r, 1).render()).collect()
    }

    #[test]
    fn empty_set_is_identity() {
        let ds = people();
        let out = FilterSet::new().apply(&ds);
        assert_eq!(out.dataset.row_count(), 3);
        assert_eq!(names(&out.dataset), names(&ds));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn and_combination_narrows() {
        let ds = people();
        let mut set = FilterSet::new();
        set.add_condition(age_ge(18), Combinator::And);
        let adults = set.apply(&ds).dataset.row_count();

        set.add_condition(name_contains("o"), Combinator::And);
        let out = set.apply(&ds);
        assert!(out.dataset.row_count() <= adults);
        assert_eq!(names(&out.dataset), vec!["Bob"]);
    }

    #[test]
    fn or_combination_widens() {
        let ds = people();
        let mut set = FilterSet::new();
        set.add_condition(age_ge(39), Combinator::And);
        let before = set.apply(&ds).dataset.row_count();

        set.add_condition(name_contains("ar"), Combinator::Or);
        let out = set.apply(&ds);
        assert!(out.dataset.row_count() >= before);
        assert_eq!(names(&out.dataset), vec!["Bob", "Cara"]);
    }

    #[test]
    fn combination_is_strictly_left_to_right() {
        // a AND b OR c evaluates as (a AND b) OR c, not a AND (b OR c)
        let ds = people();
        let mut set = FilterSet::new();
        set.add_condition(age_ge(100), Combinator::And); // nothing
        set.add_condition(name_contains("zzz"), Combinator::And); // nothing
        set.add_condition(name_contains("cara"), Combinator::Or);
        let out = set.apply(&ds);
        assert_eq!(names(&out.dataset), vec!["Cara"]);
    }

    #[test]
    fn failed_condition_degrades_without_aborting() {
        let ds = people();
        let mut set = FilterSet::new();
        set.add_condition(
            FilterCondition::new("salary", FilterOperator::IsNull, Operand::Empty).unwrap(),
            Combinator::And,
        );
        set.add_condition(name_contains("a"), Combinator::Or);

        let out = set.apply(&ds);
        assert_eq!(out.warnings.len(), 1);
        assert!(matches!(out.warnings[0], EvalError::UnknownColumn(_)));
        // The bad condition contributed all-false; OR still lets rows through
        assert_eq!(names(&out.dataset), vec!["Alice", "Cara"]);
    }

    #[test]
    fn output_order_is_a_subsequence_of_input_order() {
        let ds = people();
        let mut set = FilterSet::new();
        set.add_condition(name_contains("a"), Combinator::And);
        let out = set.apply(&ds);
        assert_eq!(names(&out.dataset), vec!["Alice", "Cara"]);
    }

    #[test]
    fn removal_keeps_the_invariant() {
        let mut set = FilterSet::new();
        set.add_condition(age_ge(1), Combinator::And);
        set.add_condition(age_ge(2), Combinator::Or);
        set.add_condition(age_ge(3), Combinator::And);
        assert_eq!(set.len(), 3);
        assert_eq!(set.combinators().len(), 2);

        // Removing the head drops the combinator that joined it forward
        set.remove_condition(0);
        assert_eq!(set.len(), 2);
        assert_eq!(set.combinators(), &[Combinator::And]);

        // Removing past the head drops the combinator at index - 1
        set.remove_condition(1);
        assert_eq!(set.len(), 1);
        assert!(set.combinators().is_empty());

        set.remove_condition(0);
        assert!(set.is_empty());
        assert!(set.combinators().is_empty());

        // Out-of-range removal is a no-op
        assert!(set.remove_condition(5).is_none());
    }

    #[test]
    fn clear_resets_both_sequences() {
        let mut set = FilterSet::new();
        set.add_condition(age_ge(1), Combinator::And);
        set.add_condition(age_ge(2), Combinator::Or);
        set.clear();
        assert!(set.is_empty());
        assert!(set.combinators().is_empty());

        let ds = people();
        assert_eq!(set.apply(&ds).dataset.row_count(), ds.row_count());
    }
}
