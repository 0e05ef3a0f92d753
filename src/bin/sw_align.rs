use std::env;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use swalign::{
    filter::parse_filters, Aligner, Filter, Scoring, SortOrder, StatKey, SwError,
    TracebackStart,
};

/// Filters applied by `--improvement` when none are given explicitly.
const IMPROVEMENT_FILTERS: [&str; 3] = ["length__gt=5", "score__gt=4", "min_gap_length__gt=0"];

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("sw_align: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&options) {
        eprintln!("sw_align: {err}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> swalign::Result<()> {
    let scoring = options.scoring();
    scoring.validate()?;

    let start = if options.improvement {
        TracebackStart::AllPositive
    } else {
        TracebackStart::GlobalMax
    };
    let aligner = Aligner::with_start(scoring, start);
    let (matrix, alignments) = aligner.align_with_matrix(&options.seq1, &options.seq2);

    let mut header = format!("{}\n", matrix.display(&options.seq1, &options.seq2));
    let selected = if options.improvement {
        let filters = if options.filters.is_empty() {
            parse_filters(&IMPROVEMENT_FILTERS)?
        } else {
            options.filters.clone()
        };
        let kept = alignments.filter(&filters);
        if kept.is_empty() {
            header.push_str("no alignment satisfies the filters\n");
        }
        kept
    } else {
        header.push_str(&format!(
            "seq1: {}\nseq2: {}\n",
            String::from_utf8_lossy(&options.seq1),
            String::from_utf8_lossy(&options.seq2)
        ));
        if alignments.is_empty() {
            header.push_str("no positive-scoring local alignment\n");
        }
        if options.filters.is_empty() {
            alignments
        } else {
            alignments.filter(&options.filters)
        }
    };
    let shown = selected.sorted_by(options.sort_key, options.sort_order);

    let render = |colored: bool| {
        let mut report = header.clone();
        for alignment in &shown {
            if colored {
                report.push_str(&format!("{}\n\n", alignment.colored()));
            } else {
                report.push_str(&format!("{alignment}\n\n"));
            }
        }
        report
    };

    let color = !options.no_color && io::stdout().is_terminal();
    print!("{}", render(color));
    if let Some(path) = &options.output_file {
        write_report(path, &render(false), options.force)?;
    }
    Ok(())
}

fn write_report(path: &Path, report: &str, force: bool) -> swalign::Result<()> {
    if path.exists() && !force {
        return Err(SwError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists, pass --force to overwrite", path.display()),
        )));
    }
    fs::write(path, report)?;
    Ok(())
}

struct Options {
    seq1: Vec<u8>,
    seq2: Vec<u8>,
    match_score: f64,
    mismatch_score: Option<f64>,
    gap_penalty: f64,
    output_file: Option<PathBuf>,
    force: bool,
    no_color: bool,
    improvement: bool,
    filters: Vec<Filter>,
    sort_key: StatKey,
    sort_order: SortOrder,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut positional = Vec::new();
        let mut match_score = 3.0f64;
        let mut mismatch_score = None;
        let mut gap_penalty = -2.0f64;
        let mut output_file = None;
        let mut force = false;
        let mut no_color = false;
        let mut improvement = false;
        let mut filters = Vec::new();
        let mut sort_key = StatKey::Score;
        let mut sort_order = SortOrder::Descending;

        while let Some(arg) = args.next() {
            let arg: String = arg.into();
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };
            let mut value = |name: &str| -> Result<String, String> {
                match &inline {
                    Some(v) => Ok(v.clone()),
                    None => args
                        .next()
                        .map(Into::into)
                        .ok_or_else(|| format!("missing value after {name}")),
                }
            };

            match flag.as_str() {
                "-h" | "--help" => {
                    Options::print_help();
                    std::process::exit(0);
                }
                "--match-score" => match_score = parse_number("--match-score", &value("--match-score")?)?,
                "--mismatch-score" => {
                    mismatch_score = Some(parse_number("--mismatch-score", &value("--mismatch-score")?)?)
                }
                "--gap-penalty" => gap_penalty = parse_number("--gap-penalty", &value("--gap-penalty")?)?,
                "-o" | "--output-file" => output_file = Some(PathBuf::from(value("--output-file")?)),
                "--force" => force = true,
                "--no-color" => no_color = true,
                "--improvement" => improvement = true,
                "--filter" => filters.push(
                    value("--filter")?
                        .parse::<Filter>()
                        .map_err(|e| e.to_string())?,
                ),
                "--sort" => {
                    sort_key = value("--sort")?
                        .parse::<StatKey>()
                        .map_err(|e| e.to_string())?
                }
                "--ascending" => sort_order = SortOrder::Ascending,
                other if other.starts_with('-') && other.len() > 1 => {
                    return Err(format!("unrecognized argument '{other}'"));
                }
                _ => positional.push(arg),
            }
        }

        let [seq1, seq2]: [String; 2] = positional
            .try_into()
            .map_err(|_| "expected exactly two sequences".to_string())?;

        Ok(Self {
            seq1: seq1.to_ascii_uppercase().into_bytes(),
            seq2: seq2.to_ascii_uppercase().into_bytes(),
            match_score,
            mismatch_score,
            gap_penalty,
            output_file,
            force,
            no_color,
            improvement,
            filters,
            sort_key,
            sort_order,
        })
    }

    fn scoring(&self) -> Scoring {
        Scoring::new(self.match_score, self.mismatch_score, self.gap_penalty)
    }

    fn print_help() {
        println!(
            "\
Usage: sw_align <SEQ1> <SEQ2> [options]

Smith-Waterman local alignment reporting every optimal alignment.

Options:
  --match-score <F>       Score for a pair of equal symbols (default: 3.0)
  --mismatch-score <F>    Score for a mismatch (default: -match-score)
  --gap-penalty <F>       Penalty added per gap position (default: -2.0)
  -o, --output-file <P>   Also write the report to this file
  --force                 Overwrite the output file if it exists
  --no-color              Plain terminal output (files are always plain)
  --improvement           Trace from every positive cell, then filter with
                          length__gt=5 score__gt=4 min_gap_length__gt=0
  --filter <EXPR>         Filter such as score__gt=4 (repeatable; replaces
                          the --improvement defaults)
  --sort <STAT>           Statistic to sort by (default: score)
  --ascending             Sort ascending instead of descending
  -h, --help              Print this help message

Statistics: score length num_matches num_mismatches n_gaps num_gap_runs
            min_gap_length max_gap_length

Examples:
  sw_align TGTTACGG GGTTGACTA
  sw_align TGTTACGG GGTTGACTA --improvement --sort length
"
        );
    }
}

fn parse_number(flag: &str, value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("{flag} expects a number, got '{value}'"))
}
