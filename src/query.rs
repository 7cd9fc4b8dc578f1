//! Query inputs: the sex selector and the (country, sex, age) triple

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sex variant of a mortality table row
///
/// Row order is fixed by the data format: combined population first,
/// then female, then male.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Total population, both sexes
    #[default]
    Combined,
    Female,
    Male,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Combined, Sex::Female, Sex::Male];

    /// Index of this variant's row in a mortality table
    pub fn row_index(self) -> usize {
        match self {
            Sex::Combined => 0,
            Sex::Female => 1,
            Sex::Male => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sex::Combined => "combined",
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sex {
    type Err = String;

    /// Accepts the short codes used in shared links ("F", "M", empty for
    /// combined) as well as the full labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "combined" | "total" => Ok(Sex::Combined),
            "f" | "female" => Ok(Sex::Female),
            "m" | "male" => Ok(Sex::Male),
            other => Err(format!("Unknown sex: {}", other)),
        }
    }
}

/// One evaluation request, held by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub country: String,
    pub sex: Sex,
    pub age: usize,
}

impl Query {
    pub fn new(country: impl Into<String>, sex: Sex, age: usize) -> Self {
        Self {
            country: country.into(),
            sex,
            age,
        }
    }
}

/// Ages offered to a user picking their current age
///
/// Runs from 1 to one below the highest supported age, or 1 to 109 when
/// the table supports no such range.
pub fn selectable_ages(max_age: usize) -> std::ops::RangeInclusive<usize> {
    if max_age > 1 {
        1..=max_age - 1
    } else {
        1..=109
    }
}
