use swalign::{
    Aligner, AlignerBuilder, Comparison, Filter, Scoring, SortOrder, StatKey, SwError,
    TracebackStart,
};

#[test]
fn documented_example_integration() {
    let (matrix, alignments) = Aligner::default().align_with_matrix(b"TGTTACGG", b"GGTTGACTA");
    assert_eq!(matrix.global_max(), 13.0);
    assert_eq!(alignments.len(), 1);
    let best = alignments.best().unwrap();
    assert_eq!(best.aligned_seq1(), b"GTT-AC");
    assert_eq!(best.aligned_seq2(), b"GTTGAC");
    assert_eq!(best.stats().length, 6);
    assert_eq!(best.stats().num_gap_runs, 1);
}

#[test]
fn improvement_report_filter_then_sort_by_length() {
    let aligner = AlignerBuilder::new()
        .with_traceback_start(TracebackStart::AllPositive)
        .build();
    let alignments = aligner.align(b"TGTTACGG", b"GGTTGACTA");
    let selected = alignments
        .filter(&["score__gt=4".parse::<Filter>().unwrap()])
        .sorted_by(StatKey::Length, SortOrder::Descending);

    assert!(!selected.is_empty());
    assert!(selected.len() < alignments.len());
    assert!(selected.iter().all(|a| a.score() > 4.0));
    let lengths: Vec<usize> = selected.iter().map(|a| a.len()).collect();
    assert!(lengths.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(selected.best().map(|a| a.score()), Some(13.0));
}

#[test]
fn default_improvement_filters() {
    let aligner = Aligner::with_start(Scoring::default(), TracebackStart::AllPositive);
    let filters = swalign::filter::parse_filters(&["length__gt=5", "score__gt=4", "min_gap__gt=0"]).unwrap();
    let selected = aligner
        .align(b"TGTTACGG", b"GGTTGACTA")
        .filter(&filters)
        .sorted_by(StatKey::Score, SortOrder::Descending);
    assert!(!selected.is_empty());
    for a in &selected {
        assert!(a.len() > 5);
        assert!(a.score() > 4.0);
        assert!(a.stats().n_gaps > 0);
    }
    assert_eq!(selected.iter().next().map(|a| a.score()), Some(13.0));
}

#[test]
fn filter_gt_then_sort_ascending() {
    let aligner = Aligner::with_start(Scoring::new(2.0, Some(-1.0), -1.0), TracebackStart::AllPositive);
    let threshold = 3.0;
    let selected = aligner
        .align(b"ACGTTGCAACGT", b"TTGCAACGGT")
        .filter(&[Filter::new(StatKey::Score, Comparison::Gt, threshold)])
        .sorted_by(StatKey::Score, SortOrder::Ascending);
    assert!(!selected.is_empty());
    let scores: Vec<f64> = selected.iter().map(|a| a.score()).collect();
    assert!(scores.iter().all(|&s| s > threshold));
    assert!(scores.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn no_shared_positive_region() {
    let alignments = Aligner::new(Scoring::new(3.0, Some(-10.0), -10.0)).align(b"AAAA", b"TTTT");
    assert!(alignments.is_empty());
    assert!(alignments.best().is_none());
}

#[test]
fn empty_input_is_not_an_error() {
    assert!(Aligner::default().align(b"", b"").is_empty());
    assert!(Aligner::default().align(b"ACGT", b"").is_empty());
}

#[test]
fn any_byte_is_a_symbol() {
    let alignments = Aligner::default().align(b"x-y!z", b"q-y!");
    let best = alignments.best().unwrap();
    assert_eq!(best.aligned_seq1(), b"-y!");
    assert_eq!(best.stats().num_matches, 3);
    assert_eq!(best.stats().n_gaps, 0);
}

#[test]
fn unknown_names_fail_before_filtering() {
    assert!(matches!("identity__gt=0.9".parse::<Filter>(), Err(SwError::UnknownStatistic(_))));
    assert!(matches!("score__near=4".parse::<Filter>(), Err(SwError::UnknownComparison(_))));
    assert!(matches!("percent".parse::<StatKey>(), Err(SwError::UnknownStatistic(_))));
}
