//! Alignment records produced by the traceback.
//!
//! An [`Alignment`] is an immutable value: the two gapped strings, the score
//! of the cell the traceback started from, and statistics derived once from
//! its columns. It keeps no reference to the matrix it came from.

use std::fmt;

use crate::stats::StatKey;

/// Marker written into an aligned string where a sequence has a gap.
pub const GAP: u8 = b'-';

/// Kind of one aligned column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Match,
    Mismatch,
    /// A `seq2` symbol against a gap in `seq1` (left step).
    GapInFirst,
    /// A `seq1` symbol against a gap in `seq2` (up step).
    GapInSecond,
}

impl Column {
    #[inline]
    pub fn is_gap(self) -> bool {
        matches!(self, Column::GapInFirst | Column::GapInSecond)
    }
}

/// Statistics derived from an alignment's columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlignmentStats {
    pub length: usize,
    pub num_matches: usize,
    pub num_mismatches: usize,
    /// Total gap columns.
    pub n_gaps: usize,
    /// Maximal contiguous stretches of gap columns.
    pub num_gap_runs: usize,
    pub min_gap_length: Option<usize>,
    pub max_gap_length: Option<usize>,
}

impl AlignmentStats {
    /// Single pass over the columns.
    pub fn from_columns(columns: &[Column]) -> Self {
        let mut stats = AlignmentStats {
            length: columns.len(),
            ..Default::default()
        };
        let mut run = 0usize;
        for &column in columns {
            match column {
                Column::Match => stats.num_matches += 1,
                Column::Mismatch => stats.num_mismatches += 1,
                Column::GapInFirst | Column::GapInSecond => stats.n_gaps += 1,
            }
            if column.is_gap() {
                run += 1;
            } else if run > 0 {
                stats.close_run(run);
                run = 0;
            }
        }
        if run > 0 {
            stats.close_run(run);
        }
        stats
    }

    fn close_run(&mut self, run: usize) {
        self.num_gap_runs += 1;
        self.min_gap_length = Some(self.min_gap_length.map_or(run, |m| m.min(run)));
        self.max_gap_length = Some(self.max_gap_length.map_or(run, |m| m.max(run)));
    }
}

/// One optimal (or, with [`TracebackStart::AllPositive`], locally maximal)
/// path through the score matrix.
///
/// [`TracebackStart::AllPositive`]: crate::traceback::TracebackStart::AllPositive
#[derive(Clone, Debug, PartialEq)]
pub struct Alignment {
    aligned_seq1: Vec<u8>,
    aligned_seq2: Vec<u8>,
    columns: Vec<Column>,
    score: f64,
    start: (usize, usize),
    end: (usize, usize),
    stats: AlignmentStats,
}

impl Alignment {
    /// Assemble an alignment from its columns in sequence order.
    ///
    /// `start` is the terminator cell the traceback stopped at and `end` the
    /// cell it started from, so the aligned region of each input is
    /// `seq1[start.0..end.0]` and `seq2[start.1..end.1]`.
    ///
    /// # Panics
    /// Panics if the gapped strings and the columns disagree in length.
    pub fn new(
        aligned_seq1: Vec<u8>,
        aligned_seq2: Vec<u8>,
        columns: Vec<Column>,
        score: f64,
        start: (usize, usize),
        end: (usize, usize),
    ) -> Self {
        assert_eq!(
            aligned_seq1.len(),
            aligned_seq2.len(),
            "aligned sequences must have equal length"
        );
        assert_eq!(aligned_seq1.len(), columns.len());
        let stats = AlignmentStats::from_columns(&columns);
        Self {
            aligned_seq1,
            aligned_seq2,
            columns,
            score,
            start,
            end,
            stats,
        }
    }

    pub fn aligned_seq1(&self) -> &[u8] {
        &self.aligned_seq1
    }

    pub fn aligned_seq2(&self) -> &[u8] {
        &self.aligned_seq2
    }

    /// Lossy UTF-8 view of `aligned_seq1`, for display.
    pub fn aligned_seq1_str(&self) -> String {
        String::from_utf8_lossy(&self.aligned_seq1).into_owned()
    }

    pub fn aligned_seq2_str(&self) -> String {
        String::from_utf8_lossy(&self.aligned_seq2).into_owned()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Terminator cell (exclusive lower corner of the aligned region).
    pub fn start(&self) -> (usize, usize) {
        self.start
    }

    /// Cell the traceback started from.
    pub fn end(&self) -> (usize, usize) {
        self.end
    }

    pub fn stats(&self) -> &AlignmentStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.stats.length
    }

    pub fn is_empty(&self) -> bool {
        self.stats.length == 0
    }

    /// Value of a named statistic; `None` for gap-run lengths of a gapless
    /// alignment.
    pub fn stat(&self, key: StatKey) -> Option<f64> {
        key.value(self)
    }

    /// Every statistic by its stable name.
    pub fn named_stats(&self) -> Vec<(&'static str, Option<f64>)> {
        StatKey::ALL
            .iter()
            .map(|&key| (key.name(), self.stat(key)))
            .collect()
    }
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

impl Alignment {
    /// Terminal view of the same report with matches in green and mismatches
    /// in red (ANSI escapes). Gap columns stay uncolored.
    pub fn colored(&self) -> ColoredAlignment<'_> {
        ColoredAlignment(self)
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, row: &[u8], colored: bool) -> fmt::Result {
        if !colored {
            return writeln!(f, "{}", String::from_utf8_lossy(row));
        }
        for (&symbol, column) in row.iter().zip(&self.columns) {
            let symbol = symbol as char;
            match column {
                Column::Match => write!(f, "{GREEN}{symbol}{RESET}")?,
                Column::Mismatch => write!(f, "{RED}{symbol}{RESET}")?,
                Column::GapInFirst | Column::GapInSecond => write!(f, "{symbol}")?,
            }
        }
        writeln!(f)
    }

    fn write_report(&self, f: &mut fmt::Formatter<'_>, colored: bool) -> fmt::Result {
        let opt = |v: Option<usize>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
        writeln!(f, "score: {}", self.score)?;
        self.write_row(f, &self.aligned_seq1, colored)?;
        self.write_row(f, &self.aligned_seq2, colored)?;
        writeln!(f, "length: {}", self.stats.length)?;
        writeln!(f, "num_matches: {}", self.stats.num_matches)?;
        writeln!(f, "num_mismatches: {}", self.stats.num_mismatches)?;
        writeln!(f, "n_gaps: {}", self.stats.n_gaps)?;
        writeln!(f, "num_gap_runs: {}", self.stats.num_gap_runs)?;
        writeln!(f, "min_gap_length: {}", opt(self.stats.min_gap_length))?;
        writeln!(f, "max_gap_length: {}", opt(self.stats.max_gap_length))?;
        write!(f, "trace_back_start_indexes: {:?}", self.end)
    }
}

/// Plain-text report: score, the two gapped strings, then every statistic.
impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_report(f, false)
    }
}

/// Printable view returned by [`Alignment::colored`].
pub struct ColoredAlignment<'a>(&'a Alignment);

impl fmt::Display for ColoredAlignment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_report(f, true)
    }
}
