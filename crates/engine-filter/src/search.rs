use crate::mask::Mask;
use model::records::dataset::Dataset;

/// Free-text pass over every column: a row matches when any cell's rendered
/// string contains the term, case-insensitively. An empty term is the
/// identity transform. Null cells render empty and so never match.
pub fn quick_search(dataset: &Dataset, term: &str) -> Dataset {
    if term.is_empty() {
        return dataset.clone();
    }

    let needle = term.to_lowercase();
    let mut mask = Mask::all_false(dataset.row_count());
    for (row, cells) in dataset.rows().iter().enumerate() {
        let hit = cells
            .iter()
            .any(|cell| !cell.is_null() && cell.render().to_lowercase().contains(&needle));
        mask.set(row, hit);
    }

    dataset
        .select(mask.as_slice())
        .expect("mask is aligned with the dataset")
}
