//! Filtering and sorting of alignment lists by named statistic.
//!
//! Filters use the `<statistic>__<op>=<value>` syntax, e.g. `score__gt=4` or
//! `min_gap_length__ge=2`. Every expression is parsed (and rejected if the
//! statistic or operator is unknown) before any alignment is looked at.

use std::fmt;
use std::str::FromStr;

use crate::alignment::Alignment;
use crate::error::{Result, SwError};
use crate::stats::StatKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Comparison {
    #[inline]
    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Eq => lhs == rhs,
            Comparison::Ne => lhs != rhs,
            Comparison::Gt => lhs > rhs,
            Comparison::Ge => lhs >= rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Le => lhs <= rhs,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Comparison::Eq => "eq",
            Comparison::Ne => "ne",
            Comparison::Gt => "gt",
            Comparison::Ge => "ge",
            Comparison::Lt => "lt",
            Comparison::Le => "le",
        }
    }
}

impl FromStr for Comparison {
    type Err = SwError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eq" | "==" => Ok(Comparison::Eq),
            "ne" | "!=" => Ok(Comparison::Ne),
            "gt" | ">" => Ok(Comparison::Gt),
            "ge" | "gte" | ">=" => Ok(Comparison::Ge),
            "lt" | "<" => Ok(Comparison::Lt),
            "le" | "lte" | "<=" => Ok(Comparison::Le),
            other => Err(SwError::UnknownComparison(other.to_string())),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `statistic <op> threshold` predicate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Filter {
    pub key: StatKey,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl Filter {
    pub fn new(key: StatKey, comparison: Comparison, threshold: f64) -> Self {
        Self {
            key,
            comparison,
            threshold,
        }
    }

    /// An alignment lacking the statistic (gap-run lengths of a gapless
    /// alignment) never passes.
    pub fn matches(&self, alignment: &Alignment) -> bool {
        alignment
            .stat(self.key)
            .is_some_and(|v| self.comparison.apply(v, self.threshold))
    }
}

impl FromStr for Filter {
    type Err = SwError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SwError::InvalidFilter(s.to_string());
        let (key, rest) = s.split_once("__").ok_or_else(invalid)?;
        let (op, value) = split_operator(rest).ok_or_else(invalid)?;
        let key: StatKey = key.trim().parse()?;
        let comparison: Comparison = op.trim().parse()?;
        let value = value.trim();
        let threshold = value
            .parse::<f64>()
            .map_err(|_| SwError::InvalidThreshold(value.to_string()))?;
        Ok(Filter::new(key, comparison, threshold))
    }
}

/// Split `gt=4` or `>=4` into operator and value.
fn split_operator(rest: &str) -> Option<(&str, &str)> {
    for symbol in ["==", "!=", ">=", "<=", ">", "<"] {
        if let Some(value) = rest.strip_prefix(symbol) {
            return Some((symbol, value));
        }
    }
    rest.split_once('=')
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}__{}={}", self.key, self.comparison, self.threshold)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Ordered list of alignments with filter / sort helpers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Alignments {
    items: Vec<Alignment>,
}

impl Alignments {
    pub fn new(items: Vec<Alignment>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, alignment: Alignment) {
        self.items.push(alignment);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Alignment> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Alignment] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Alignment> {
        self.items
    }

    /// Keep the alignments satisfying every filter, preserving order.
    pub fn filter(&self, filters: &[Filter]) -> Alignments {
        self.items
            .iter()
            .filter(|a| filters.iter().all(|f| f.matches(a)))
            .cloned()
            .collect()
    }

    /// Stable sort by one statistic. Alignments lacking the statistic go last
    /// in either order.
    pub fn sort_by(&mut self, key: StatKey, order: SortOrder) {
        self.items.sort_by(|a, b| match (a.stat(key), b.stat(key)) {
            (Some(x), Some(y)) => match order {
                SortOrder::Ascending => x.total_cmp(&y),
                SortOrder::Descending => y.total_cmp(&x),
            },
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
    }

    /// Consuming variant of [`sort_by`](Self::sort_by).
    pub fn sorted_by(mut self, key: StatKey, order: SortOrder) -> Alignments {
        self.sort_by(key, order);
        self
    }

    /// First alignment with the highest score.
    pub fn best(&self) -> Option<&Alignment> {
        self.items.iter().reduce(|best, a| {
            if a.score() > best.score() {
                a
            } else {
                best
            }
        })
    }
}

impl From<Vec<Alignment>> for Alignments {
    fn from(items: Vec<Alignment>) -> Self {
        Self::new(items)
    }
}

impl FromIterator<Alignment> for Alignments {
    fn from_iter<I: IntoIterator<Item = Alignment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Alignments {
    type Item = Alignment;
    type IntoIter = std::vec::IntoIter<Alignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Alignments {
    type Item = &'a Alignment;
    type IntoIter = std::slice::Iter<'a, Alignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Parse a list of filter expressions, failing on the first bad one.
pub fn parse_filters<S: AsRef<str>>(exprs: &[S]) -> Result<Vec<Filter>> {
    exprs.iter().map(|e| e.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::Column;

    fn aln(score: f64, columns: Vec<Column>) -> Alignment {
        let s1: Vec<u8> = columns
            .iter()
            .map(|c| if *c == Column::GapInFirst { b'-' } else { b'A' })
            .collect();
        let s2: Vec<u8> = columns
            .iter()
            .map(|c| match c {
                Column::GapInSecond => b'-',
                Column::Mismatch => b'C',
                _ => b'A',
            })
            .collect();
        let n = columns.len();
        Alignment::new(s1, s2, columns, score, (0, 0), (n, n))
    }

    fn sample() -> Alignments {
        use Column::*;
        Alignments::new(vec![
            aln(3.0, vec![Match]),
            aln(7.0, vec![Match, GapInFirst, Match, Match]),
            aln(5.0, vec![Match, Match, Mismatch, Match]),
            aln(9.0, vec![Match, GapInSecond, GapInSecond, Match, Match, Match, Match]),
        ])
    }

    #[test]
    fn comparison_parsing() {
        assert_eq!("gt".parse::<Comparison>().unwrap(), Comparison::Gt);
        assert_eq!(">=".parse::<Comparison>().unwrap(), Comparison::Ge);
        assert_eq!("ne".parse::<Comparison>().unwrap(), Comparison::Ne);
        assert!(matches!(
            "approx".parse::<Comparison>(),
            Err(SwError::UnknownComparison(op)) if op == "approx"
        ));
    }

    #[test]
    fn comparison_semantics() {
        assert!(Comparison::Eq.apply(2.0, 2.0));
        assert!(Comparison::Ne.apply(2.0, 3.0));
        assert!(Comparison::Gt.apply(3.0, 2.0));
        assert!(!Comparison::Gt.apply(2.0, 2.0));
        assert!(Comparison::Ge.apply(2.0, 2.0));
        assert!(Comparison::Lt.apply(1.0, 2.0));
        assert!(Comparison::Le.apply(2.0, 2.0));
    }

    #[test]
    fn filter_expression_parsing() {
        let f: Filter = "score__gt=4".parse().unwrap();
        assert_eq!(f, Filter::new(StatKey::Score, Comparison::Gt, 4.0));
        let f: Filter = "min_gap__ge=1.5".parse().unwrap();
        assert_eq!(f.key, StatKey::MinGapLength);
        assert_eq!(f.threshold, 1.5);
        assert_eq!(f.to_string(), "min_gap_length__ge=1.5");
        let f: Filter = "length__>=6".parse().unwrap();
        assert_eq!(f, Filter::new(StatKey::Length, Comparison::Ge, 6.0));

        assert!(matches!("score>4".parse::<Filter>(), Err(SwError::InvalidFilter(_))));
        assert!(matches!("score=4".parse::<Filter>(), Err(SwError::InvalidFilter(_))));
        assert!(matches!(
            "bogus__gt=4".parse::<Filter>(),
            Err(SwError::UnknownStatistic(_))
        ));
        assert!(matches!(
            "score__about=4".parse::<Filter>(),
            Err(SwError::UnknownComparison(_))
        ));
        assert!(matches!(
            "score__gt=four".parse::<Filter>(),
            Err(SwError::InvalidThreshold(v)) if v == "four"
        ));
    }

    #[test]
    fn parse_filters_stops_at_first_error() {
        assert_eq!(parse_filters(&["score__gt=4", "length__le=10"]).unwrap().len(), 2);
        assert!(parse_filters(&["score__gt=4", "nope__gt=1"]).is_err());
    }

    #[test]
    fn filters_are_conjunctive_and_order_preserving() {
        let all = sample();
        let kept = all.filter(&[
            Filter::new(StatKey::Score, Comparison::Gt, 4.0),
            Filter::new(StatKey::Length, Comparison::Ge, 4.0),
        ]);
        let scores: Vec<f64> = kept.iter().map(|a| a.score()).collect();
        assert_eq!(scores, vec![7.0, 5.0, 9.0]);
    }

    #[test]
    fn absent_statistic_never_matches() {
        let kept = sample().filter(&[Filter::new(StatKey::MinGapLength, Comparison::Ne, 100.0)]);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|a| a.stats().n_gaps > 0));
    }

    #[test]
    fn sort_orders_and_absent_last() {
        let mut all = sample();
        all.sort_by(StatKey::Score, SortOrder::Descending);
        let scores: Vec<f64> = all.iter().map(|a| a.score()).collect();
        assert_eq!(scores, vec![9.0, 7.0, 5.0, 3.0]);

        let asc = all.clone().sorted_by(StatKey::MaxGapLength, SortOrder::Ascending);
        let gaps: Vec<Option<usize>> = asc.iter().map(|a| a.stats().max_gap_length).collect();
        assert_eq!(gaps[..2], [Some(1), Some(2)]);
        assert!(gaps[2..].iter().all(Option::is_none));

        let desc = all.sorted_by(StatKey::MaxGapLength, SortOrder::Descending);
        let gaps: Vec<Option<usize>> = desc.iter().map(|a| a.stats().max_gap_length).collect();
        assert_eq!(gaps[..2], [Some(2), Some(1)]);
        assert!(gaps[2..].iter().all(Option::is_none));
    }

    #[test]
    fn sort_is_stable() {
        let mut all = sample();
        all.sort_by(StatKey::Length, SortOrder::Descending);
        // Lengths 7, 4, 4, 1: the two length-4 alignments keep their order.
        let scores: Vec<f64> = all.iter().map(|a| a.score()).collect();
        assert_eq!(scores, vec![9.0, 7.0, 5.0, 3.0]);
    }

    #[test]
    fn best_prefers_first_maximum() {
        let mut all = sample();
        assert_eq!(all.best().map(|a| a.score()), Some(9.0));
        all.push(aln(9.0, vec![Column::Match]));
        assert_eq!(all.best().map(|a| a.len()), Some(7));
        assert!(Alignments::default().best().is_none());
    }
}
