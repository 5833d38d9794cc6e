//! Reporting sinks for study results.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use time::{OffsetDateTime, format_description};

use crate::planners::OutcomeCounts;

/// Receives study aggregates and renders them somewhere.
pub trait ReportSink {
    /// Two-bar success / failure chart; failures are holes plus step-limit runs.
    fn outcome_chart(&mut self, title: &str, counts: &OutcomeCounts) -> io::Result<()>;

    /// Success rate (percent) for each mixing probability.
    fn trend_chart(&mut self, title: &str, points: &[(f64, f64)]) -> io::Result<()>;
}

// ============================================================================
// Console
// ============================================================================

/// Text bar charts written to any `Write`.
pub struct ConsoleReport<W: Write> {
    out: W,
    bar_width: usize,
}

impl ConsoleReport<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        Self { out, bar_width: 40 }
    }

    pub fn with_bar_width(mut self, bar_width: usize) -> Self {
        self.bar_width = bar_width.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_bars(&mut self, title: &str, rows: &[(String, f64, String)]) -> io::Result<()> {
        let max = rows.iter().map(|(_, value, _)| *value).fold(0.0_f64, f64::max);
        let label_width = rows.iter().map(|(label, _, _)| label.len()).max().unwrap_or(0);

        writeln!(self.out)?;
        writeln!(self.out, "{}", title)?;
        for (label, value, annotation) in rows {
            let filled = if max > 0.0 {
                ((value / max) * self.bar_width as f64).round() as usize
            } else {
                0
            };
            writeln!(
                self.out,
                "  {:>label_width$} |{}{}| {}",
                label,
                "█".repeat(filled),
                " ".repeat(self.bar_width - filled.min(self.bar_width)),
                annotation,
                label_width = label_width
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> ReportSink for ConsoleReport<W> {
    fn outcome_chart(&mut self, title: &str, counts: &OutcomeCounts) -> io::Result<()> {
        let rows = [
            (
                "Success".to_string(),
                counts.successes as f64,
                counts.successes.to_string(),
            ),
            (
                "Failure".to_string(),
                counts.failures() as f64,
                format!(
                    "{} (hole {}, step limit {})",
                    counts.failures(),
                    counts.hole_failures,
                    counts.step_limit_failures
                ),
            ),
        ];
        self.write_bars(title, &rows)
    }

    fn trend_chart(&mut self, title: &str, points: &[(f64, f64)]) -> io::Result<()> {
        let rows: Vec<(String, f64, String)> = points
            .iter()
            .map(|(alpha, rate)| (format!("alpha {:.2}", alpha), *rate, format!("{:.2}%", rate)))
            .collect();
        self.write_bars(title, &rows)
    }
}

// ============================================================================
// CSV
// ============================================================================

/// Appends results to `<prefix>-outcomes.csv` and `<prefix>-trend.csv`.
pub struct CsvReport {
    outcomes_path: PathBuf,
    trend_path: PathBuf,
}

impl CsvReport {
    /// Files are prefixed with the local start time of the study.
    pub fn new(dir: impl AsRef<Path>) -> io::Result<Self> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let format = format_description::parse("[year][month][day]-[hour][minute][second]")
            .map_err(io::Error::other)?;
        let stamp = now.format(&format).map_err(io::Error::other)?;
        Self::with_prefix(dir, &stamp)
    }

    pub fn with_prefix(dir: impl AsRef<Path>, prefix: &str) -> io::Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            outcomes_path: dir.join(format!("{}-outcomes.csv", prefix)),
            trend_path: dir.join(format!("{}-trend.csv", prefix)),
        })
    }

    pub fn outcomes_path(&self) -> &Path {
        &self.outcomes_path
    }

    pub fn trend_path(&self) -> &Path {
        &self.trend_path
    }

    fn append(path: &Path, header: &str, rows: &[String]) -> io::Result<()> {
        let file_exists = path.exists();
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if !file_exists {
            writeln!(file, "{}", header)?;
        }
        for row in rows {
            writeln!(file, "{}", row)?;
        }
        file.flush()
    }
}

impl ReportSink for CsvReport {
    fn outcome_chart(&mut self, title: &str, counts: &OutcomeCounts) -> io::Result<()> {
        let row = format!(
            "{},{},{},{},{},{:.4}",
            quote(title),
            counts.successes,
            counts.hole_failures,
            counts.step_limit_failures,
            counts.aborted,
            counts.success_rate()
        );
        Self::append(
            &self.outcomes_path,
            "title,successes,hole_failures,step_limit_failures,aborted,success_rate",
            &[row],
        )
    }

    fn trend_chart(&mut self, title: &str, points: &[(f64, f64)]) -> io::Result<()> {
        let rows: Vec<String> = points
            .iter()
            .map(|(alpha, rate)| format!("{},{:.2},{:.4}", quote(title), alpha, rate))
            .collect();
        Self::append(&self.trend_path, "title,alpha,success_percent", &rows)
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

// ============================================================================
// Composite
// ============================================================================

/// Forwards every report to each inner sink; the first error is returned
/// after all sinks have been tried.
pub struct CompositeReport {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl CompositeReport {
    pub fn new(sinks: Vec<Box<dyn ReportSink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Box<dyn ReportSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn fan_out<F>(&mut self, mut f: F) -> io::Result<()>
    where
        F: FnMut(&mut dyn ReportSink) -> io::Result<()>,
    {
        let mut first_error = None;
        for sink in &mut self.sinks {
            if let Err(err) = f(sink.as_mut()) {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl ReportSink for CompositeReport {
    fn outcome_chart(&mut self, title: &str, counts: &OutcomeCounts) -> io::Result<()> {
        self.fan_out(|sink| sink.outcome_chart(title, counts))
    }

    fn trend_chart(&mut self, title: &str, points: &[(f64, f64)]) -> io::Result<()> {
        self.fan_out(|sink| sink.trend_chart(title, points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counts() -> OutcomeCounts {
        OutcomeCounts {
            successes: 10,
            hole_failures: 30,
            step_limit_failures: 10,
            aborted: 0,
            total_steps: 200,
        }
    }

    #[test]
    fn test_console_outcome_chart_scales_bars() {
        let mut report = ConsoleReport::new(Vec::new()).with_bar_width(8);
        report.outcome_chart("Greedy", &counts()).unwrap();
        let text = String::from_utf8(report.into_inner()).unwrap();

        assert!(text.contains("Greedy\n"));
        assert!(text.contains("  Success |██      | 10\n"));
        assert!(text.contains("  Failure |████████| 40 (hole 30, step limit 10)\n"));
    }

    #[test]
    fn test_console_trend_chart_lists_every_alpha() {
        let mut report = ConsoleReport::new(Vec::new()).with_bar_width(4);
        report
            .trend_chart("Success Rate - Alpha", &[(0.0, 2.0), (0.5, 4.0), (1.0, 0.0)])
            .unwrap();
        let text = String::from_utf8(report.into_inner()).unwrap();

        assert!(text.contains("alpha 0.00 |██  | 2.00%"));
        assert!(text.contains("alpha 0.50 |████| 4.00%"));
        assert!(text.contains("alpha 1.00 |    | 0.00%"));
    }

    #[test]
    fn test_csv_report_appends_with_single_header() {
        let dir = std::env::temp_dir().join(format!("frostpath-csv-{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();
        let mut report = CsvReport::with_prefix(&dir, "test").unwrap();
        report.outcome_chart("Manual, \"fixed\"", &counts()).unwrap();
        report.outcome_chart("Greedy", &counts()).unwrap();
        report.trend_chart("sweep", &[(0.0, 4.5), (1.0, 5.0)]).unwrap();

        let outcomes = fs::read_to_string(report.outcomes_path()).unwrap();
        let lines: Vec<&str> = outcomes.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("title,"));
        assert_eq!(lines[1], "\"Manual, \"\"fixed\"\"\",10,30,10,0,0.2000");

        let trend = fs::read_to_string(report.trend_path()).unwrap();
        assert_eq!(trend.lines().nth(2), Some("\"sweep\",1.00,5.0000"));

        fs::remove_dir_all(&dir).ok();
    }

    struct Recording {
        titles: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl ReportSink for Recording {
        fn outcome_chart(&mut self, title: &str, _counts: &OutcomeCounts) -> io::Result<()> {
            self.titles.borrow_mut().push(title.to_string());
            if self.fail {
                return Err(io::Error::other("sink down"));
            }
            Ok(())
        }

        fn trend_chart(&mut self, title: &str, _points: &[(f64, f64)]) -> io::Result<()> {
            self.titles.borrow_mut().push(title.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_composite_reaches_every_sink_even_after_failure() {
        let titles = Rc::new(RefCell::new(Vec::new()));
        let mut composite = CompositeReport::new(vec![
            Box::new(Recording {
                titles: Rc::clone(&titles),
                fail: true,
            }),
            Box::new(Recording {
                titles: Rc::clone(&titles),
                fail: false,
            }),
        ]);

        assert!(composite.outcome_chart("study", &counts()).is_err());
        assert_eq!(titles.borrow().len(), 2);
        assert!(composite.trend_chart("trend", &[]).is_ok());
        assert_eq!(titles.borrow().len(), 4);
    }
}
