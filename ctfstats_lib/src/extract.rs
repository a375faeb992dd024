//! Builds model records from the raw text of a season block.
//!
//! Nothing here touches HTML. The walker in [`crate::scrape`] hands over plain
//! strings, which keeps these rules testable on their own.

use crate::model::{Ctf, Season};
use crate::parse::{parse_float, parse_int};

/// Separates the label from the year in a season block id (`rating_2021`).
pub const BLOCK_ID_SEPARATOR: char = '_';

const RANK_CELL: usize = 1;
const NAME_CELL: usize = 2;
const POINTS_CELL: usize = 3;
const RATINGS_CELL: usize = 4;

/// Raw summary text of one season block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonSummary {
    pub place: String,
    pub points: String,
    pub country_place: String,
}

/// Builds a result from one table row's cells.
///
/// Cell 0 is ignored; cells 1 to 4 hold rank, name, points and rating
/// points. Rows with fewer cells (headers, separators) and rows whose
/// numbers do not parse yield `None`. A result is never half-filled.
pub fn extract_ctf<S: AsRef<str>>(cells: &[S]) -> Option<Ctf> {
    if cells.len() <= RATINGS_CELL {
        return None;
    }
    let place = parse_int(cells[RANK_CELL].as_ref())?;
    let points = parse_float(cells[POINTS_CELL].as_ref())?;
    let ratings = parse_float(cells[RATINGS_CELL].as_ref())?;
    Some(Ctf::new(place, cells[NAME_CELL].as_ref(), points, ratings))
}

/// Reads the year out of a block id such as `rating_2021`.
///
/// Everything after the first separator must parse as an integer.
pub fn year_from_block_id(block_id: &str) -> Option<i64> {
    let (_, year) = block_id.split_once(BLOCK_ID_SEPARATOR)?;
    parse_int(year)
}

/// Builds a season from its block id, summary text and table rows.
///
/// Summary fields degrade one by one to `None`; rows that do not form a
/// complete result are skipped without leaving a gap.
pub fn extract_season(block_id: &str, summary: &SeasonSummary, rows: &[Vec<String>]) -> Season {
    let mut ctfs = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        match extract_ctf(row.as_slice()) {
            Some(ctf) => ctfs.push(ctf),
            None => tracing::debug!("{}: skipping row {}", block_id, index),
        }
    }

    Season {
        year: year_from_block_id(block_id),
        place: parse_int(&summary.place),
        points: parse_float(&summary.points),
        country_place: parse_int(&summary.country_place),
        ctfs,
    }
}
