//! Named alignment statistics.
//!
//! Postprocessing binds to statistics by name. Each [`StatKey`] maps to an
//! accessor in a fixed table, so lookups by name need no reflection and an
//! unknown name is rejected when it is parsed.

use std::fmt;
use std::str::FromStr;

use crate::alignment::Alignment;
use crate::error::SwError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatKey {
    Score,
    Length,
    NumMatches,
    NumMismatches,
    NGaps,
    NumGapRuns,
    MinGapLength,
    MaxGapLength,
}

type Accessor = fn(&Alignment) -> Option<f64>;

static ACCESSORS: [(StatKey, &str, Accessor); 8] = [
    (StatKey::Score, "score", score),
    (StatKey::Length, "length", length),
    (StatKey::NumMatches, "num_matches", num_matches),
    (StatKey::NumMismatches, "num_mismatches", num_mismatches),
    (StatKey::NGaps, "n_gaps", n_gaps),
    (StatKey::NumGapRuns, "num_gap_runs", num_gap_runs),
    (StatKey::MinGapLength, "min_gap_length", min_gap_length),
    (StatKey::MaxGapLength, "max_gap_length", max_gap_length),
];

fn score(a: &Alignment) -> Option<f64> {
    Some(a.score())
}

fn length(a: &Alignment) -> Option<f64> {
    Some(a.stats().length as f64)
}

fn num_matches(a: &Alignment) -> Option<f64> {
    Some(a.stats().num_matches as f64)
}

fn num_mismatches(a: &Alignment) -> Option<f64> {
    Some(a.stats().num_mismatches as f64)
}

fn n_gaps(a: &Alignment) -> Option<f64> {
    Some(a.stats().n_gaps as f64)
}

fn num_gap_runs(a: &Alignment) -> Option<f64> {
    Some(a.stats().num_gap_runs as f64)
}

fn min_gap_length(a: &Alignment) -> Option<f64> {
    a.stats().min_gap_length.map(|v| v as f64)
}

fn max_gap_length(a: &Alignment) -> Option<f64> {
    a.stats().max_gap_length.map(|v| v as f64)
}

impl StatKey {
    /// Every key, in table order.
    pub const ALL: [StatKey; 8] = [
        StatKey::Score,
        StatKey::Length,
        StatKey::NumMatches,
        StatKey::NumMismatches,
        StatKey::NGaps,
        StatKey::NumGapRuns,
        StatKey::MinGapLength,
        StatKey::MaxGapLength,
    ];

    #[inline]
    fn entry(self) -> &'static (StatKey, &'static str, Accessor) {
        &ACCESSORS[self as usize]
    }

    /// Stable name used for parsing and display.
    pub fn name(self) -> &'static str {
        self.entry().1
    }

    /// Read this statistic from `alignment`.
    pub fn value(self, alignment: &Alignment) -> Option<f64> {
        (self.entry().2)(alignment)
    }
}

impl FromStr for StatKey {
    type Err = SwError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s {
            "min_gap" => "min_gap_length",
            "max_gap" => "max_gap_length",
            other => other,
        };
        ACCESSORS
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(key, _, _)| *key)
            .ok_or_else(|| SwError::UnknownStatistic(s.to_string()))
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
