use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::types::{Series, SeriesId};

/// Date-keyed table where any cell may be missing. Produced by `outer_join`.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseTable {
    columns: Vec<SeriesId>,
    rows: BTreeMap<NaiveDate, Vec<Option<f64>>>,
}

impl SparseTable {
    pub fn columns(&self) -> &[SeriesId] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&NaiveDate, &Vec<Option<f64>>)> {
        self.rows.iter()
    }

    pub fn missing_cells(&self) -> usize {
        self.rows
            .values()
            .map(|cells| cells.iter().filter(|c| c.is_none()).count())
            .sum()
    }
}

/// Table with every cell present. Produced by `drop_incomplete`.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseTable {
    pub columns: Vec<SeriesId>,
    pub rows: Vec<DenseRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DenseRow {
    pub date: NaiveDate,
    pub values: Vec<f64>,
}

impl DenseTable {
    pub fn column_index(&self, id: SeriesId) -> Option<usize> {
        self.columns.iter().position(|c| *c == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Union of all dates across `series`, one optional cell per series.
/// Non-finite provider values count as missing.
pub fn outer_join(series: &[Series]) -> SparseTable {
    let columns: Vec<SeriesId> = series.iter().map(|s| s.id).collect();
    let width = columns.len();
    let mut rows: BTreeMap<NaiveDate, Vec<Option<f64>>> = BTreeMap::new();

    for (col, s) in series.iter().enumerate() {
        for obs in &s.observations {
            let cells = rows.entry(obs.date).or_insert_with(|| vec![None; width]);
            cells[col] = obs.value.is_finite().then_some(obs.value);
        }
    }

    SparseTable { columns, rows }
}

/// Replace each missing cell with the last known value of its column, in date
/// order. Cells before a column's first observation stay missing.
pub fn forward_fill(table: &SparseTable) -> SparseTable {
    let mut last: Vec<Option<f64>> = vec![None; table.columns.len()];
    let rows = table
        .rows
        .iter()
        .map(|(date, cells)| {
            let filled: Vec<Option<f64>> = cells
                .iter()
                .zip(last.iter_mut())
                .map(|(cell, prev)| {
                    if cell.is_some() {
                        *prev = *cell;
                    }
                    *prev
                })
                .collect();
            (*date, filled)
        })
        .collect();

    SparseTable {
        columns: table.columns.clone(),
        rows,
    }
}

/// Keep only rows with no missing cell.
pub fn drop_incomplete(table: &SparseTable) -> DenseTable {
    let rows = table
        .rows
        .iter()
        .filter_map(|(date, cells)| {
            let values: Option<Vec<f64>> = cells.iter().copied().collect();
            values.map(|values| DenseRow { date: *date, values })
        })
        .collect();

    DenseTable {
        columns: table.columns.clone(),
        rows,
    }
}
