//! Dense Smith–Waterman score matrix with per-cell origin sets.
//!
//! The matrix has `(len(seq1) + 1) × (len(seq2) + 1)` cells stored row-major.
//! Row 0 and column 0 are the local-alignment boundary and stay at zero.
//! Every other cell holds
//!
//! ```text
//! H(i,j) = max(0,
//!              H(i-1,j-1) + pair(seq1[i-1], seq2[j-1]),   // diagonal
//!              H(i-1,j)   + gap,                           // up
//!              H(i,j-1)   + gap)                           // left
//! ```
//!
//! together with the set of directions attaining that maximum. Keeping the
//! whole set (not a single back-pointer) is what lets the traceback fan out
//! into every optimal path.
//!
//! Ties are decided with [`scores_tie`], so candidates that differ only by
//! floating-point rounding (`0.3 + -0.2` against `0.1`) are all recorded.
//! A maximum within that tolerance of zero is stored as exactly `0.0`.

use std::fmt;

use crate::scoring::{scores_tie, Scoring};

/// A single traceback step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// From `(i-1, j-1)`: one symbol of each sequence.
    Diagonal,
    /// From `(i-1, j)`: a symbol of `seq1` against a gap.
    Up,
    /// From `(i, j-1)`: a symbol of `seq2` against a gap.
    Left,
}

impl Direction {
    /// Branch order used by the traceback.
    pub const ALL: [Direction; 3] = [Direction::Diagonal, Direction::Up, Direction::Left];

    /// Predecessor cell of `(i, j)` along this direction.
    ///
    /// Callers must only step from cells that actually record the direction,
    /// which guarantees the indices do not underflow.
    #[inline]
    pub fn predecessor(self, i: usize, j: usize) -> (usize, usize) {
        match self {
            Direction::Diagonal => (i - 1, j - 1),
            Direction::Up => (i - 1, j),
            Direction::Left => (i, j - 1),
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Direction::Diagonal => 0b001,
            Direction::Up => 0b010,
            Direction::Left => 0b100,
        }
    }
}

/// Bitmask of the directions attaining a cell's value.
///
/// Empty for every zero-valued cell: those terminate the traceback even when
/// some candidate tied with zero or was clipped to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Origins(u8);

impl Origins {
    pub const NONE: Origins = Origins(0);

    #[inline]
    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    #[inline]
    pub fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of recorded directions (0..=3).
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Recorded directions in branch order (diagonal, up, left).
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Direction> for Origins {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut origins = Origins::NONE;
        for d in iter {
            origins.insert(d);
        }
        origins
    }
}

/// Above zero by more than rounding noise. Anything else is stored as `0.0`.
#[inline]
pub(crate) fn is_positive(score: f64) -> bool {
    score > 0.0 && !scores_tie(score, 0.0)
}

/// Filled local-alignment matrix.
#[derive(Clone, Debug)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    scores: Vec<f64>,
    origins: Vec<Origins>,
}

impl ScoreMatrix {
    /// Fill the matrix for `seq1` (rows) against `seq2` (columns).
    ///
    /// O(n·m) time and space. Empty inputs give a matrix whose cells are all
    /// zero.
    pub fn build(seq1: &[u8], seq2: &[u8], scoring: &Scoring) -> Self {
        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("build_matrix", n = seq1.len(), m = seq2.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut matrix = Self::zeroed(seq1.len() + 1, seq2.len() + 1);
        for i in 1..matrix.rows {
            for j in 1..matrix.cols {
                let (score, origins) = matrix.compute_cell(seq1, seq2, scoring, i, j);
                let idx = matrix.index(i, j);
                matrix.scores[idx] = score;
                matrix.origins[idx] = origins;
            }
        }
        matrix
    }

    /// Same matrix as [`build`](Self::build), filled one anti-diagonal at a
    /// time with the cells of each anti-diagonal computed in parallel.
    ///
    /// Anti-diagonal `d = i + j` only reads diagonals `d-1` and `d-2`, so its
    /// cells are independent and each worker owns a disjoint cell.
    #[cfg(feature = "parallel")]
    pub fn build_wavefront(seq1: &[u8], seq2: &[u8], scoring: &Scoring) -> Self {
        use rayon::prelude::*;

        #[cfg(feature = "tracing")]
        let span = tracing::debug_span!("build_matrix_wavefront", n = seq1.len(), m = seq2.len());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let (n, m) = (seq1.len(), seq2.len());
        let mut matrix = Self::zeroed(n + 1, m + 1);
        for d in 2..=n + m {
            let lo = d.saturating_sub(m).max(1);
            let hi = n.min(d - 1);
            if lo > hi {
                continue;
            }
            let diagonal: Vec<(f64, Origins)> = (lo..=hi)
                .into_par_iter()
                .map(|i| matrix.compute_cell(seq1, seq2, scoring, i, d - i))
                .collect();
            for (offset, (score, origins)) in diagonal.into_iter().enumerate() {
                let i = lo + offset;
                let idx = matrix.index(i, d - i);
                matrix.scores[idx] = score;
                matrix.origins[idx] = origins;
            }
        }
        matrix
    }

    fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            scores: vec![0.0; rows * cols],
            origins: vec![Origins::NONE; rows * cols],
        }
    }

    /// Evaluate the recurrence at `(i, j)`; requires `i, j >= 1` and the three
    /// predecessors to be final.
    #[inline]
    fn compute_cell(
        &self,
        seq1: &[u8],
        seq2: &[u8],
        scoring: &Scoring,
        i: usize,
        j: usize,
    ) -> (f64, Origins) {
        let diag = self.scores[self.index(i - 1, j - 1)] + scoring.pair(seq1[i - 1], seq2[j - 1]);
        let up = self.scores[self.index(i - 1, j)] + scoring.gap_penalty;
        let left = self.scores[self.index(i, j - 1)] + scoring.gap_penalty;

        let best = diag.max(up).max(left);
        if !is_positive(best) {
            return (0.0, Origins::NONE);
        }
        let origins = [
            (Direction::Diagonal, diag),
            (Direction::Up, up),
            (Direction::Left, left),
        ]
        .into_iter()
        .filter(|&(_, candidate)| scores_tie(candidate, best))
        .map(|(direction, _)| direction)
        .collect();
        (best, origins)
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.cols);
        i * self.cols + j
    }

    /// `len(seq1) + 1`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// `len(seq2) + 1`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// # Panics
    /// Panics if `(i, j)` lies outside the matrix.
    #[inline]
    pub fn score(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of bounds");
        self.scores[self.index(i, j)]
    }

    /// # Panics
    /// Panics if `(i, j)` lies outside the matrix.
    #[inline]
    pub fn origins(&self, i: usize, j: usize) -> Origins {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of bounds");
        self.origins[self.index(i, j)]
    }

    /// Scores of row `i`.
    ///
    /// # Panics
    /// Panics if `i` lies outside the matrix.
    pub fn row(&self, i: usize) -> &[f64] {
        assert!(i < self.rows, "row {i} out of bounds");
        &self.scores[i * self.cols..(i + 1) * self.cols]
    }

    /// Largest value in the matrix; `0.0` when nothing scores positively.
    pub fn global_max(&self) -> f64 {
        self.scores.iter().copied().fold(0.0, f64::max)
    }

    /// Coordinates of every cell tied with `value` (see [`scores_tie`]), in
    /// row-major order.
    pub fn cells_with_score(&self, value: f64) -> Vec<(usize, usize)> {
        self.cells_where(|s| scores_tie(s, value))
    }

    /// Coordinates of every positive cell, in row-major order.
    pub fn positive_cells(&self) -> Vec<(usize, usize)> {
        self.cells_where(is_positive)
    }

    fn cells_where(&self, pred: impl Fn(f64) -> bool) -> Vec<(usize, usize)> {
        self.scores
            .iter()
            .enumerate()
            .filter(|&(_, &s)| pred(s))
            .map(|(idx, _)| (idx / self.cols, idx % self.cols))
            .collect()
    }

    /// Table view with the sequences as row and column headers.
    pub fn display<'a>(&'a self, seq1: &'a [u8], seq2: &'a [u8]) -> MatrixDisplay<'a> {
        MatrixDisplay {
            matrix: self,
            seq1,
            seq2,
        }
    }
}

/// Printable view returned by [`ScoreMatrix::display`].
pub struct MatrixDisplay<'a> {
    matrix: &'a ScoreMatrix,
    seq1: &'a [u8],
    seq2: &'a [u8],
}

impl fmt::Display for MatrixDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.matrix.scores.iter().map(|s| format!("{s:.1}")).collect();
        let width = cells.iter().map(String::len).max().unwrap_or(1).max(3);

        let header = |idx: usize, seq: &[u8]| -> char {
            if idx == 0 {
                ' '
            } else {
                seq.get(idx - 1).map(|&c| c as char).unwrap_or('?')
            }
        };

        write!(f, "    ")?;
        for j in 0..self.matrix.cols {
            write!(f, " {:>width$}", header(j, self.seq2))?;
        }
        writeln!(f)?;
        for i in 0..self.matrix.rows {
            write!(f, "{:>3} ", header(i, self.seq1))?;
            for j in 0..self.matrix.cols {
                write!(f, " {:>width$}", cells[self.matrix.index(i, j)])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
