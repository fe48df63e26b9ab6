use std::path::Path;

use log::info;

use super::{error::ExportError, event::ScalarLog, smoothing::ewma};

/// Step-aligned scalar series, one column per series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    steps: Vec<i64>,
    columns: Vec<(String, Vec<f64>)>,
}

/// The part of a tag after its last `.`, e.g. `Total_reward` for `1.Total_reward/1.Total_reward`
pub fn short_name(tag: &str) -> &str {
    tag.rsplit('.').next().unwrap_or(tag)
}

impl Table {
    /// Collect the series `tags` from `log` into columns named by [`short_name`].
    ///
    /// Every series must have been logged at exactly the steps of the first one.
    pub fn from_log<S: AsRef<str>>(log: &ScalarLog, tags: &[S]) -> Result<Self, ExportError> {
        let Some(first) = tags.first() else {
            return Ok(Self::default());
        };
        let reference = first.as_ref();
        let steps: Vec<i64> = log.scalars(reference)?.iter().map(|e| e.step).collect();

        let mut table = Self {
            steps,
            columns: Vec::with_capacity(tags.len()),
        };
        for tag in tags {
            let tag = tag.as_ref();
            let events = log.scalars(tag)?;
            if !events.iter().map(|e| e.step).eq(table.steps.iter().copied()) {
                return Err(ExportError::StepMismatch {
                    tag: tag.to_string(),
                    reference: reference.to_string(),
                });
            }
            table.insert(short_name(tag), events.iter().map(|e| e.value).collect());
        }
        Ok(table)
    }

    /// A table over `steps` with no columns yet
    pub fn with_steps(steps: Vec<i64>) -> Self {
        Self {
            steps,
            columns: Vec::new(),
        }
    }

    /// Add a column, replacing any column of the same name
    ///
    /// **Panics** if the column length differs from the number of steps
    pub fn insert(&mut self, name: &str, values: Vec<f64>) {
        assert_eq!(values.len(), self.steps.len(), "Column `{name}` has the wrong length");
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, column)) => *column = values,
            None => self.columns.push((name.to_string(), values)),
        }
    }

    pub fn steps(&self) -> &[i64] {
        &self.steps
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn column(&self, name: &str) -> Result<&[f64], ExportError> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_slice())
            .ok_or_else(|| ExportError::MissingColumn(name.to_string()))
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.steps.len(), self.columns.len())
    }

    /// Every column smoothed with [`ewma`] over step order
    pub fn smoothed(&self, alpha: f64) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|(n, c)| (n.clone(), ewma(c, alpha)))
            .collect();
        Self {
            steps: self.steps.clone(),
            columns,
        }
    }

    /// Write as CSV with a leading `step` column
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(std::iter::once("step").chain(self.names()))?;
        for (i, step) in self.steps.iter().enumerate() {
            let row = std::iter::once(step.to_string())
                .chain(self.columns.iter().map(|(_, c)| c[i].to_string()));
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        info!("wrote table to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::event::Event;

    const TAGS: [&str; 2] = ["1.Total_reward/1.Total_reward", "2.Workers/3.Self_played_steps"];

    fn log_with(steps: [&[i64]; 2]) -> ScalarLog {
        let mut log = ScalarLog::new();
        for (tag, steps) in TAGS.iter().zip(steps) {
            for &step in steps {
                log.add_event(&Event::scalar(tag, step, step as f32 * 10.0, 0.0));
            }
        }
        log
    }

    #[test]
    fn short_names() {
        assert_eq!(short_name(TAGS[0]), "Total_reward");
        assert_eq!(short_name(TAGS[1]), "Self_played_steps");
        assert_eq!(short_name("plain"), "plain");
    }

    #[test]
    fn aligned_series_become_columns() {
        let table = Table::from_log(&log_with([&[0, 1, 2], &[0, 1, 2]]), &TAGS).unwrap();
        assert_eq!(table.shape(), (3, 2));
        assert_eq!(table.steps(), &[0, 1, 2]);
        assert_eq!(
            table.names().collect::<Vec<_>>(),
            vec!["Total_reward", "Self_played_steps"]
        );
        assert_eq!(table.column("Total_reward").unwrap(), &[0.0, 10.0, 20.0]);
        assert!(table.column("Episode_length").is_err());
    }

    #[test]
    fn step_mismatch_rejected() {
        for steps in [&[0, 1, 3][..], &[0, 1], &[0, 1, 2, 3]] {
            let err = Table::from_log(&log_with([&[0, 1, 2], steps]), &TAGS).unwrap_err();
            assert!(
                matches!(&err, ExportError::StepMismatch { tag, .. } if tag == TAGS[1]),
                "{err}"
            );
        }
    }

    #[test]
    fn missing_series_rejected() {
        let log = log_with([&[0], &[0]]);
        assert!(matches!(
            Table::from_log(&log, &["nope"]),
            Err(ExportError::MissingSeries(_))
        ));
    }

    #[test]
    fn smoothing_keeps_steps_and_names() {
        let mut table = Table::with_steps(vec![5, 6]);
        table.insert("a", vec![1.0, 1.0]);
        table.insert("b", vec![0.0, 10.0]);
        let smoothed = table.smoothed(0.1);
        assert_eq!(smoothed.steps(), &[5, 6]);
        assert_eq!(smoothed.column("a").unwrap(), &[1.0, 1.0]);
        assert!((smoothed.column("b").unwrap()[1] - 10.0 / 1.9).abs() < 1e-12);
    }

    #[test]
    fn csv_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        let mut table = Table::with_steps(vec![1, 2]);
        table.insert("x", vec![0.5, 1.5]);
        table.write_csv(&path).unwrap();
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "step,x\n1,0.5\n2,1.5\n"
        );
    }
}
