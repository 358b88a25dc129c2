use std::{
    error::Error,
    io::{Read, Write},
    path::PathBuf,
};

use day_steps::DaySummary;
use spent_calories::Training;
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Parser)]
#[command(about = "Daily steps and training summaries")]
pub struct Args {
    /// Print summaries as json instead of text report
    #[arg(short, long, default_value_t = false, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Summary of a day of walking from `<steps>,<duration>` record.
    /// _Note_: prints nothing for bad data
    Day {
        #[command(flatten)]
        body: Body,
        #[arg(allow_hyphen_values = true)]
        record: String,
    },
    /// Training summary from `<steps>,<activity>,<duration>` record
    Training {
        #[command(flatten)]
        body: Body,
        #[arg(allow_hyphen_values = true)]
        record: String,
    },
    /// Summaries for every row of csv file with `record,weight,height` columns
    Batch {
        /// Input csv file location
        #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("input.csv"), required = false)]
        input: PathBuf,
    },
}

#[derive(Debug, clap::Args)]
pub struct Body {
    /// Weight in kilograms
    #[arg(short, long)]
    pub weight: f64,
    /// Height of person
    #[arg(short = 'H', long)]
    pub height: f64,
}

#[derive(Debug, serde::Deserialize)]
struct Row {
    record: String,
    weight: f64,
    height: f64,
}

#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
enum Summary {
    Day(DaySummary),
    Training(Training),
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Day(this) => std::fmt::Display::fmt(this, f),
            Self::Training(this) => std::fmt::Display::fmt(this, f),
        }
    }
}

impl Summary {
    /// Pick calculator by record shape
    fn from_record(record: &str, weight: f64, height: f64) -> Result<Self, spent_calories::Error> {
        match record.split(',').count() {
            2 => day_steps::try_day_action_info(record, weight, height).map(Self::Day),
            _ => spent_calories::training(record, weight, height).map(Self::Training),
        }
    }

    fn render(&self, json: bool) -> Result<String, serde_json::Error> {
        match json {
            true => serde_json::to_string(self).map(|this| this + "\n"),
            false => Ok(self.to_string()),
        }
    }
}

/// Returns number of processed and failed rows
fn batch(
    input: impl Read,
    json: bool,
    out: &mut impl Write,
) -> Result<(usize, usize), Box<dyn Error>> {
    let mut reader = csv::Reader::from_reader(input);

    let (mut total, mut failed) = (0, 0);
    for (line, row) in reader.deserialize::<Row>().enumerate() {
        total += 1;

        let summary = row
            .map_err(|e| e.to_string())
            .and_then(|Row { record, weight, height }| {
                Summary::from_record(&record, weight, height).map_err(|e| e.to_string())
            });

        match summary {
            Ok(summary) => out.write_all(summary.render(json)?.as_bytes())?,
            Err(e) => {
                failed += 1;
                tracing::warn!(row = line + 1, "Skipping row. Reason: {e}");
            }
        }
    }

    Ok((total, failed))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Args { json, command } = <Args as clap::Parser>::parse();

    let io = std::io::stdout();
    let mut io = io.lock();

    match command {
        Command::Day {
            body: Body { weight, height },
            record,
        } if !json => {
            io.write_all(day_steps::day_action_info(&record, weight, height).as_bytes())?;
        }
        Command::Day {
            body: Body { weight, height },
            record,
        } => match day_steps::try_day_action_info(&record, weight, height) {
            Ok(summary) => io.write_all(Summary::Day(summary).render(json)?.as_bytes())?,
            Err(e) => tracing::warn!(record = %record, "Failed to summarize day. Reason: {e}"),
        },
        Command::Training {
            body: Body { weight, height },
            record,
        } => {
            let summary = spent_calories::training(&record, weight, height)?;

            io.write_all(Summary::Training(summary).render(json)?.as_bytes())?;
        }
        Command::Batch { input } => {
            let file = std::fs::File::open(&input)
                .map_err(|e| format!("Failed to open input file. Reason: {e}"))?;

            let (total, failed) = batch(file, json, &mut io)?;

            tracing::info!("Total: {total} records, failed: {failed}");
        }
    }

    io.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_are_valid() {
        use clap::CommandFactory;

        Args::command().debug_assert();
    }

    #[test]
    fn record_shape_picks_calculator() {
        assert!(matches!(
            Summary::from_record("1000,1h", 75.0, 175.0),
            Ok(Summary::Day(_))
        ));
        assert!(matches!(
            Summary::from_record("1000,Бег,1h", 75.0, 175.0),
            Ok(Summary::Training(_))
        ));
        assert!(matches!(
            Summary::from_record("1000", 75.0, 175.0),
            Err(spent_calories::Error::Format { expected: 3, .. })
        ));
    }

    #[test]
    fn batch_reports_every_valid_row() {
        let input = "record,weight,height\n\
                     \"2000,1h\",70,180\n\
                     \"1000,Бег,1h0m0s\",75,175\n\
                     \"500,Плавание,30m\",75,175\n\
                     \"abc,1h\",75,175\n\
                     \"1000,1h\",heavy,175\n";

        let mut out = Vec::new();
        let (total, failed) = batch(input.as_bytes(), false, &mut out).unwrap();

        assert_eq!(total, 5);
        assert_eq!(failed, 3);

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Steps: 2000.\n"));
        assert!(out.contains("Training type: Бег\n"));
        assert!(!out.contains("Плавание"));
    }

    #[test]
    fn batch_json_lines() {
        let input = "record,weight,height\n\"2000,Ходьба,1h30m\",70,180\n";

        let mut out = Vec::new();
        batch(input.as_bytes(), true, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["activity"], "Walking");
        assert_eq!(value["steps"], 2000);
        assert_eq!(value["hours"], 1.5);
        assert_eq!(value["calories"], 5670.0);
    }
}
