#![cfg(feature = "heavy")]
use rand::{rngs::StdRng, Rng, SeedableRng};
use swalign::{Aligner, ScoreMatrix, Scoring};

fn random_dna(rng: &mut StdRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx]
        })
        .collect()
}

#[test]
fn heavy_stress_long_shared_core() {
    let mut rng = StdRng::seed_from_u64(123);
    let core = random_dna(&mut rng, 2_000);
    let mut s = random_dna(&mut rng, 500);
    s.extend_from_slice(&core);
    s.extend(random_dna(&mut rng, 500));
    let mut t = random_dna(&mut rng, 300);
    t.extend_from_slice(&core);

    let alignments = Aligner::default().align(&s, &t);
    assert!(!alignments.is_empty());
    let best = alignments.best().unwrap();
    // The embedded core alone scores 3 per symbol.
    assert!(best.score() >= 3.0 * core.len() as f64);
    assert!(best.len() >= core.len());
}

#[test]
fn heavy_stress_matrix_only() {
    let mut rng = StdRng::seed_from_u64(7);
    let s = random_dna(&mut rng, 3_000);
    let t = random_dna(&mut rng, 3_000);
    let m = ScoreMatrix::build(&s, &t, &Scoring::default());
    assert_eq!(m.rows(), 3_001);
    assert!(m.global_max() > 0.0);
}
