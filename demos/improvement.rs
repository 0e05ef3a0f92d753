//! Example: trace from every positive cell, then filter and sort by name.
//!
//! Run with:
//! `cargo run --example improvement`

use swalign::{AlignerBuilder, SortOrder, StatKey, TracebackStart};

fn main() -> swalign::Result<()> {
    let aligner = AlignerBuilder::new()
        .with_traceback_start(TracebackStart::AllPositive)
        .try_build()?;

    let alignments = aligner.align(b"TGTTACGG", b"GGTTGACTA");
    let filters = swalign::filter::parse_filters(&["score__gt=4", "length__ge=4"])?;
    let selected = alignments
        .filter(&filters)
        .sorted_by(StatKey::Length, SortOrder::Descending);

    println!(
        "{} of {} traced alignments pass {:?}",
        selected.len(),
        alignments.len(),
        filters.iter().map(ToString::to_string).collect::<Vec<_>>()
    );
    for alignment in &selected {
        println!();
        println!("{alignment}");
    }
    Ok(())
}
