use {
    analytics_csv::{ConvertOptions, config::DEFAULT_TIMESTAMP_COLUMNS},
    anyhow::{Context, Result},
    clap::Parser,
    std::path::PathBuf,
    tracing::info,
};

/// Convert a newline-delimited JSON analytics dump into a CSV file.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    input_path: PathBuf,
    #[arg(short, long, default_value = "out.csv")]
    output_path: PathBuf,
    /// Epoch columns to render as `YYYY-MM-DD HH:MM:SS` (UTC). Pass the flag alone to convert nothing.
    #[arg(short, long, num_args = 0.., default_values = DEFAULT_TIMESTAMP_COLUMNS)]
    timestamp_titles: Vec<String>,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        ConvertOptions::with_timestamp_columns(self.timestamp_titles.iter().cloned())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let input = std::fs::read_to_string(&cli.input_path)
        .with_context(|| format!("Cannot read input file: {}", cli.input_path.display()))?;
    let csv = cli
        .options()
        .convert(&input)
        .with_context(|| format!("Cannot convert {}", cli.input_path.display()))?;
    std::fs::write(&cli.output_path, csv)
        .with_context(|| format!("Cannot write output file: {}", cli.output_path.display()))?;

    info!(input = %cli.input_path.display(), output = %cli.output_path.display(), "converted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> (PathBuf, PathBuf, Vec<String>) {
        let cli = Cli::try_parse_from(std::iter::once("analytics-csv").chain(args.iter().copied())).unwrap();
        (cli.input_path, cli.output_path, cli.timestamp_titles)
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            parse(&["in.txt"]),
            ("in.txt".into(), "out.csv".into(), vec!["ts".into(), "submit_time".into()])
        );
    }

    #[test]
    fn test_output_path() {
        for args in [&["in.txt", "-o", "output.csv"][..], &["in.txt", "--output-path", "output.csv"]] {
            assert_eq!(parse(args).1, PathBuf::from("output.csv"));
        }
    }

    #[test]
    fn test_timestamp_titles() {
        assert!(parse(&["in.txt", "-t"]).2.is_empty());
        assert!(parse(&["in.txt", "-t", "-o", "out.csv"]).2.is_empty());
        assert_eq!(parse(&["in.txt", "-t", "t1"]).2, ["t1"]);
        assert_eq!(parse(&["in.txt", "--timestamp-titles", "t1", "t2"]).2, ["t1", "t2"]);
        assert_eq!(
            parse(&["in.txt", "-t", "t1", "t2", "-o", "x.csv"]),
            ("in.txt".into(), "x.csv".into(), vec!["t1".into(), "t2".into()])
        );
        assert_eq!(parse(&["in.txt", "-o", "x.csv", "-t", "t1"]).2, ["t1"]);
    }

    #[test]
    fn test_requires_input() {
        assert!(Cli::try_parse_from(["analytics-csv"]).is_err());
    }
}
