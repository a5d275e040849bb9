use crate::{search::quick_search, set::FilterOutcome, set::FilterSet};
use model::records::dataset::Dataset;

/// The full filtering pass: structured conditions first, quick search second.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    set: FilterSet,
    search: Option<String>,
}

impl FilterPipeline {
    pub fn new(set: FilterSet) -> Self {
        FilterPipeline { set, search: None }
    }

    pub fn with_search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    pub fn set(&self) -> &FilterSet {
        &self.set
    }

    pub fn run(&self, dataset: &Dataset) -> FilterOutcome {
        let mut outcome = self.set.apply(dataset);
        if let Some(term) = &self.search {
            outcome.dataset = quick_search(&outcome.dataset, term);
        }
        outcome
    }
}
