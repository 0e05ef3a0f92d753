//! Multi-path traceback over a filled [`ScoreMatrix`].
//!
//! Every cell tied with the global maximum starts an independent traceback.
//! From there the walk follows *every* recorded origin, forking at tied cells,
//! until it reaches a zero cell. Each complete path becomes one [`Alignment`];
//! paths that happen to spell the same strings are still reported separately.
//!
//! The walk is a depth-first search over an explicit stack sharing a single
//! path buffer, so long alignments cannot exhaust the call stack and branch
//! points do not copy the partial path.

use crate::alignment::{Alignment, Column, GAP};
use crate::matrix::{is_positive, Direction, ScoreMatrix};

/// Which cells the traceback starts from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TracebackStart {
    /// Every cell equal to the global maximum (all optimal alignments).
    #[default]
    GlobalMax,
    /// Every positive cell; each alignment scores its start cell's value.
    AllPositive,
}

/// All optimal local alignments of `seq1` against `seq2`.
///
/// `matrix` must have been built from the same two sequences. Start cells are
/// visited in row-major order and branches in diagonal, up, left order, so
/// the output order is deterministic. Returns an empty vector when nothing
/// scores above zero, including when either sequence is empty.
pub fn enumerate(matrix: &ScoreMatrix, seq1: &[u8], seq2: &[u8]) -> Vec<Alignment> {
    enumerate_from(matrix, seq1, seq2, TracebackStart::GlobalMax)
}

/// Like [`enumerate`], with an explicit choice of start cells.
pub fn enumerate_from(
    matrix: &ScoreMatrix,
    seq1: &[u8],
    seq2: &[u8],
    start: TracebackStart,
) -> Vec<Alignment> {
    debug_assert_eq!(matrix.rows(), seq1.len() + 1);
    debug_assert_eq!(matrix.cols(), seq2.len() + 1);

    let global_max = matrix.global_max();
    if global_max <= 0.0 {
        return Vec::new();
    }

    let starts = match start {
        TracebackStart::GlobalMax => matrix.cells_with_score(global_max),
        TracebackStart::AllPositive => matrix.positive_cells(),
    };

    #[cfg(feature = "tracing")]
    let span = tracing::debug_span!("enumerate", ?start, global_max, starts = starts.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let alignments = trace_all(matrix, seq1, seq2, &starts);

    #[cfg(feature = "tracing")]
    tracing::debug!(alignments = alignments.len(), "traceback finished");

    alignments
}

#[cfg(not(feature = "parallel"))]
fn trace_all(
    matrix: &ScoreMatrix,
    seq1: &[u8],
    seq2: &[u8],
    starts: &[(usize, usize)],
) -> Vec<Alignment> {
    let mut out = Vec::new();
    for &cell in starts {
        trace_from(matrix, seq1, seq2, cell, &mut out);
    }
    out
}

/// Start cells share nothing mutable, so each is traced on its own worker;
/// the ordered collect keeps the sequential output order.
#[cfg(feature = "parallel")]
fn trace_all(
    matrix: &ScoreMatrix,
    seq1: &[u8],
    seq2: &[u8],
    starts: &[(usize, usize)],
) -> Vec<Alignment> {
    use rayon::prelude::*;

    let per_start: Vec<Vec<Alignment>> = starts
        .par_iter()
        .map(|&cell| {
            let mut out = Vec::new();
            trace_from(matrix, seq1, seq2, cell, &mut out);
            out
        })
        .collect();
    per_start.into_iter().flatten().collect()
}

/// Pending cell on the DFS stack.
struct Frame {
    cell: (usize, usize),
    /// Path length to restore before this frame's step is appended.
    depth: usize,
    /// Step taken to reach `cell`: direction and the cell it was taken from.
    step: Option<(Direction, (usize, usize))>,
}

/// Append one alignment per path from `end` down to a terminator.
fn trace_from(
    matrix: &ScoreMatrix,
    seq1: &[u8],
    seq2: &[u8],
    end: (usize, usize),
    out: &mut Vec<Alignment>,
) {
    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("traceback", i = end.0, j = end.1);
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let score = matrix.score(end.0, end.1);
    let mut path: Vec<(Direction, (usize, usize))> = Vec::new();
    let mut stack = vec![Frame {
        cell: end,
        depth: 0,
        step: None,
    }];

    while let Some(Frame { cell, depth, step }) = stack.pop() {
        path.truncate(depth);
        if let Some(step) = step {
            path.push(step);
        }

        let (i, j) = cell;
        let origins = matrix.origins(i, j);
        // Zero cells end the path; a positive cell without origins cannot come
        // out of the builder but is treated the same way.
        if !is_positive(matrix.score(i, j)) || origins.is_empty() {
            out.push(materialize(seq1, seq2, &path, score, cell, end));
            continue;
        }

        // Reverse push so the diagonal branch is explored first.
        for direction in Direction::ALL.into_iter().rev() {
            if origins.contains(direction) {
                stack.push(Frame {
                    cell: direction.predecessor(i, j),
                    depth: path.len(),
                    step: Some((direction, cell)),
                });
            }
        }
    }
}

/// Turn a backward path into an alignment reading in sequence order.
fn materialize(
    seq1: &[u8],
    seq2: &[u8],
    path: &[(Direction, (usize, usize))],
    score: f64,
    start: (usize, usize),
    end: (usize, usize),
) -> Alignment {
    let mut aligned1 = Vec::with_capacity(path.len());
    let mut aligned2 = Vec::with_capacity(path.len());
    let mut columns = Vec::with_capacity(path.len());

    for &(direction, (i, j)) in path.iter().rev() {
        let (a, b, column) = match direction {
            Direction::Diagonal => {
                let (a, b) = (seq1[i - 1], seq2[j - 1]);
                let column = if a == b {
                    Column::Match
                } else {
                    Column::Mismatch
                };
                (a, b, column)
            }
            Direction::Up => (seq1[i - 1], GAP, Column::GapInSecond),
            Direction::Left => (GAP, seq2[j - 1], Column::GapInFirst),
        };
        aligned1.push(a);
        aligned2.push(b);
        columns.push(column);
    }

    Alignment::new(aligned1, aligned2, columns, score, start, end)
}
