//! Output model: a team profile made of seasons made of CTF results.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One competition result within a season.
///
/// Fields are only readable from outside the crate; a `Ctf` is built once by
/// the row extractor and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ctf {
    id: Uuid,
    place: i64,
    name: String,
    points: f64,
    ratings: f64,
}

impl Ctf {
    /// Creates a result with a freshly generated identity.
    pub fn new(place: i64, name: impl Into<String>, points: f64, ratings: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            place,
            name: name.into(),
            points,
            ratings,
        }
    }

    /// Opaque handle, unique per instance. Not derived from the content.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn place(&self) -> i64 {
        self.place
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> f64 {
        self.points
    }

    pub fn ratings(&self) -> f64 {
        self.ratings
    }
}

/// One competitive year's summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    /// Global rank that year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<i64>,
    /// Total rating points that year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    /// Rank within the team's country that year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_place: Option<i64>,
    /// Results in page order.
    #[serde(default)]
    pub ctfs: Vec<Ctf>,
}

/// The complete multi-season report for one team.
///
/// Seasons keep the order in which they were appended. Appending needs
/// `&mut self`; a driver scraping several teams in parallel keeps one
/// `Profile` per team or puts it behind a lock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    seasons: Vec<Season>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a season after every season already present. No merging or
    /// deduplication by year is done.
    pub fn append(&mut self, season: Season) {
        self.seasons.push(season);
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    /// Total number of CTF results across all seasons.
    pub fn ctf_count(&self) -> usize {
        self.seasons.iter().map(|s| s.ctfs.len()).sum()
    }
}
