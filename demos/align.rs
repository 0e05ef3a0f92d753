//! Example: every optimal local alignment of two short DNA strings.
//!
//! Run with:
//! `cargo run --example align`

use swalign::{Aligner, Scoring};

fn main() {
    let s = b"TGTTACGG";
    let t = b"GGTTGACTA";

    // +3 match, -3 mismatch, -2 per gap position.
    let aligner = Aligner::new(Scoring::new(3.0, Some(-3.0), -2.0));
    let (matrix, alignments) = aligner.align_with_matrix(s, t);

    println!("{}", matrix.display(s, t));
    println!("Optimal score: {}", matrix.global_max());
    println!("Optimal alignments: {}", alignments.len());
    for alignment in &alignments {
        println!();
        println!("{alignment}");
    }

    // A tie: the extra C in the second sequence can be gapped on either side.
    let tied = aligner.align(b"ACA", b"ACCA");
    println!();
    println!("ACA vs ACCA has {} optimal alignments:", tied.len());
    for alignment in &tied {
        println!(
            "  {} / {}",
            alignment.aligned_seq1_str(),
            alignment.aligned_seq2_str()
        );
    }
}
