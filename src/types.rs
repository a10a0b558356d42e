use std::fmt;

use serde::{Deserialize, Serialize};

/// One cleaned row of the destinations table.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct DestinationRecord {
    pub name: String,
    pub cost: f64,
    pub duration_days: u32,
    pub travel_type: String,
    pub climate: String,
    pub season: String,
}

impl DestinationRecord {
    pub fn category(&self, column: Column) -> &str {
        match column {
            Column::TravelType => &self.travel_type,
            Column::Climate => &self.climate,
            Column::Season => &self.season,
        }
    }

    /// Total cost divided by trip length, rounded to two decimals with
    /// halves going to the even neighbour.
    pub fn cost_per_day(&self) -> f64 {
        (self.cost / f64::from(self.duration_days) * 100.0).round_ties_even() / 100.0
    }
}

/// Categorical columns that get integer codes.
#[repr(u8)]
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    TravelType = 1,
    Climate = 2,
    Season = 3,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::TravelType, Column::Climate, Column::Season];

    /// Header name of the column in the source CSV.
    pub fn header(self) -> &'static str {
        match self {
            Column::TravelType => "Type",
            Column::Climate => "Climate",
            Column::Season => "Season",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Column::TravelType => "travel type",
            Column::Climate => "climate",
            Column::Season => "season",
        };
        f.write_str(name)
    }
}

pub const FEATURE_DIM: usize = 5;

/// `(cost, type_code, climate_code, duration, season_code)`, raw units.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_DIM]);

impl FeatureVector {
    pub fn new(cost: f64, type_code: u32, climate_code: u32, duration: f64, season_code: u32) -> Self {
        Self([
            cost,
            f64::from(type_code),
            f64::from(climate_code),
            duration,
            f64::from(season_code),
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// What the user asked for.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Preferences {
    pub budget: f64,
    pub duration_days: u32,
    pub travel_type: String,
    pub climate: String,
    pub season: String,
}

impl Preferences {
    pub fn category(&self, column: Column) -> &str {
        match column {
            Column::TravelType => &self.travel_type,
            Column::Climate => &self.climate,
            Column::Season => &self.season,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f64,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Match {
    pub row: usize,
    pub record: DestinationRecord,
    pub distance: f64,
    pub cost_per_day: f64,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Recommendation {
    /// Nearest first.
    pub matches: Vec<Match>,
    /// Position in `matches` of the lowest cost per day.
    pub cheapest: usize,
}

impl Recommendation {
    pub fn cheapest_match(&self) -> Option<&Match> {
        self.matches.get(self.cheapest)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
