//! Exhaustive Smith–Waterman local alignment.
//!
//! This crate computes optimal local alignments between two symbol sequences
//! and reports *every* alignment tied at the optimal score, not just one.
//!
//! ## Core idea
//! 1. [`ScoreMatrix::build`] fills the local-alignment matrix and records, for
//!    each cell, the full set of predecessor directions attaining its value.
//! 2. [`traceback::enumerate`] starts from every cell holding the global
//!    maximum and forks at each tied cell, producing one [`Alignment`] per
//!    distinct path.
//! 3. [`Alignments`] filters and sorts the result by named statistic
//!    (`score`, `length`, `n_gaps`, ...).
//!
//! Scoring is linear: a flat penalty per gap position, no separate open and
//! extend costs.
//!
//! ## Quick start
//! ```
//! use swalign::{AlignerBuilder, Filter, SortOrder, StatKey};
//!
//! let aligner = AlignerBuilder::new()
//!     .with_match_score(3.0)
//!     .with_gap_penalty(-2.0)
//!     .build();
//! let alignments = aligner.align(b"ACA", b"ACCA");
//! assert_eq!(alignments.len(), 2);
//!
//! let gapped: Filter = "n_gaps__gt=0".parse().unwrap();
//! let kept = alignments
//!     .filter(&[gapped])
//!     .sorted_by(StatKey::Score, SortOrder::Descending);
//! assert!(kept.iter().all(|a| a.score() == 7.0));
//! ```
//!
//! ## Features
//! - `parallel`: fill the matrix by anti-diagonal wavefront and trace
//!   independent start cells with rayon. Output is identical to the
//!   sequential build.
//! - `tracing`: emit spans and events through the `tracing` crate.

pub mod alignment;
pub mod builder;
pub mod engine;
pub mod error;
pub mod filter;
pub mod matrix;
pub mod scoring;
pub mod stats;
pub mod traceback;

pub use crate::alignment::{Alignment, AlignmentStats, ColoredAlignment, Column, GAP};
pub use crate::builder::AlignerBuilder;
pub use crate::engine::Aligner;
pub use crate::error::{Result, SwError};
pub use crate::filter::{Alignments, Comparison, Filter, SortOrder};
pub use crate::matrix::{Direction, Origins, ScoreMatrix};
pub use crate::scoring::{scores_tie, Scoring, SCORE_TOLERANCE};
pub use crate::stats::StatKey;
pub use crate::traceback::TracebackStart;
