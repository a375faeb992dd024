//! HTML traversal of CTFtime team pages.
//!
//! Walks the parsed document in order, pulls the raw text of each season
//! block, and hands it to [`crate::extract`]. Selectors are compiled once
//! into a [`PageLayout`].

use scraper::{ElementRef, Html, Selector};

use crate::extract::{extract_season, SeasonSummary};
use crate::model::Profile;

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Season tab panes on a team page, one per rating year.
pub const SEASON_BLOCK_SELECTOR: &str = ".container:nth-child(3) > div:nth-child(5) > .tab-pane";
/// Overall place: first bold value of the first paragraph.
pub const PLACE_SELECTOR: &str = "p:first-of-type > b:first-of-type";
/// Season points: last bold value of the first paragraph.
pub const POINTS_SELECTOR: &str = "p:first-of-type > b:last-of-type";
/// Country place: first bold value of the last paragraph.
pub const COUNTRY_PLACE_SELECTOR: &str = "p:last-of-type > b:first-of-type";
pub const ROW_SELECTOR: &str = "tr";
pub const CELL_SELECTOR: &str = "td";

/// Compiled selectors describing where a team page keeps its data.
#[derive(Debug, Clone)]
pub struct PageLayout {
    season_block: Selector,
    place: Selector,
    points: Selector,
    country_place: Selector,
    row: Selector,
    cell: Selector,
}

impl PageLayout {
    /// Layout of the live ctftime.org team page.
    pub fn new() -> Result<Self, ScrapeError> {
        Self::with_season_selector(SEASON_BLOCK_SELECTOR)
    }

    /// Same summary and row rules, but season blocks found with `selector`.
    pub fn with_season_selector(selector: &str) -> Result<Self, ScrapeError> {
        Ok(Self {
            season_block: compile(selector)?,
            place: compile(PLACE_SELECTOR)?,
            points: compile(POINTS_SELECTOR)?,
            country_place: compile(COUNTRY_PLACE_SELECTOR)?,
            row: compile(ROW_SELECTOR)?,
            cell: compile(CELL_SELECTOR)?,
        })
    }
}

/// Raw text of one season block, as found in the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonBlock {
    /// The block's `id` attribute; empty when the attribute is missing.
    pub id: String,
    pub summary: SeasonSummary,
    /// Trimmed `td` texts of every row, header rows included.
    pub rows: Vec<Vec<String>>,
}

/// Yields the season blocks of `document` in document order.
pub fn season_blocks<'a>(
    document: &'a Html,
    layout: &'a PageLayout,
) -> impl Iterator<Item = SeasonBlock> + 'a {
    document
        .select(&layout.season_block)
        .map(move |block| read_block(&block, layout))
}

/// Parses a team page and collects every season block into a profile.
///
/// A page without season blocks gives an empty profile.
pub fn scrape_profile(html: &str, layout: &PageLayout) -> Profile {
    let document = Html::parse_document(html);
    let mut profile = Profile::new();
    for block in season_blocks(&document, layout) {
        let season = extract_season(&block.id, &block.summary, &block.rows);
        tracing::debug!(
            block = %block.id,
            rows = block.rows.len(),
            ctfs = season.ctfs.len(),
            "parsed season block"
        );
        profile.append(season);
    }
    profile
}

fn read_block(block: &ElementRef, layout: &PageLayout) -> SeasonBlock {
    let id = block.value().attr("id").unwrap_or_default().to_string();
    let summary = SeasonSummary {
        place: first_text(block, &layout.place),
        points: first_text(block, &layout.points),
        country_place: first_text(block, &layout.country_place),
    };
    let rows = block
        .select(&layout.row)
        .map(|row| row.select(&layout.cell).map(|cell| text_of(&cell)).collect())
        .collect();
    SeasonBlock { id, summary, rows }
}

fn first_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|e| text_of(&e))
        .unwrap_or_default()
}

fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn compile(selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
