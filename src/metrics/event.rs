use std::{
    collections::{BTreeMap, HashMap},
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use log::{debug, info};
use prost::Message;

use super::{
    error::ExportError,
    record::{RecordReader, RecordWriter},
};

/// Plugin name marking tensor summaries that hold scalars
pub const SCALARS_PLUGIN: &str = "scalars";

const DT_FLOAT: i32 = 1;
const DT_DOUBLE: i32 = 2;

/// One entry of an event file. Only the fields scalar export needs are decoded.
#[derive(Clone, PartialEq, Message)]
pub struct Event {
    #[prost(double, tag = "1")]
    pub wall_time: f64,
    #[prost(int64, tag = "2")]
    pub step: i64,
    #[prost(string, optional, tag = "3")]
    pub file_version: Option<String>,
    #[prost(message, optional, tag = "5")]
    pub summary: Option<Summary>,
}

#[derive(Clone, PartialEq, Message)]
pub struct Summary {
    #[prost(message, repeated, tag = "1")]
    pub value: Vec<SummaryValue>,
}

#[derive(Clone, PartialEq, Message)]
pub struct SummaryValue {
    #[prost(string, tag = "1")]
    pub tag: String,
    #[prost(float, optional, tag = "2")]
    pub simple_value: Option<f32>,
    #[prost(message, optional, tag = "8")]
    pub tensor: Option<TensorProto>,
    #[prost(message, optional, tag = "9")]
    pub metadata: Option<SummaryMetadata>,
}

#[derive(Clone, PartialEq, Message)]
pub struct SummaryMetadata {
    #[prost(message, optional, tag = "1")]
    pub plugin_data: Option<PluginData>,
}

#[derive(Clone, PartialEq, Message)]
pub struct PluginData {
    #[prost(string, tag = "1")]
    pub plugin_name: String,
}

#[derive(Clone, PartialEq, Message)]
pub struct TensorProto {
    #[prost(int32, tag = "1")]
    pub dtype: i32,
    #[prost(bytes = "vec", tag = "4")]
    pub tensor_content: Vec<u8>,
    #[prost(float, repeated, tag = "5")]
    pub float_val: Vec<f32>,
    #[prost(double, repeated, tag = "6")]
    pub double_val: Vec<f64>,
}

impl TensorProto {
    /// The single value of a float or double scalar tensor
    pub fn scalar(&self) -> Option<f64> {
        match self.dtype {
            DT_FLOAT => self.float_val.first().map(|v| *v as f64).or_else(|| {
                let bytes = self.tensor_content.get(..4)?.try_into().ok()?;
                Some(f32::from_le_bytes(bytes) as f64)
            }),
            DT_DOUBLE => self.double_val.first().copied().or_else(|| {
                let bytes = self.tensor_content.get(..8)?.try_into().ok()?;
                Some(f64::from_le_bytes(bytes))
            }),
            _ => None,
        }
    }
}

impl Event {
    /// An event carrying one `simple_value` scalar
    pub fn scalar(tag: &str, step: i64, value: f32, wall_time: f64) -> Self {
        Self {
            wall_time,
            step,
            file_version: None,
            summary: Some(Summary {
                value: vec![SummaryValue {
                    tag: tag.to_string(),
                    simple_value: Some(value),
                    tensor: None,
                    metadata: None,
                }],
            }),
        }
    }
}

/// A logged scalar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarEvent {
    pub wall_time: f64,
    pub step: i64,
    pub value: f64,
}

/// Scalar series collected from event files, keyed by tag
#[derive(Debug, Clone, Default)]
pub struct ScalarLog {
    series: BTreeMap<String, Vec<ScalarEvent>>,
    plugins: HashMap<String, String>,
}

impl ScalarLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every event file in `dir`, in file name order
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ExportError> {
        let dir = dir.as_ref();
        let files = event_files(dir)?;
        if files.is_empty() {
            return Err(ExportError::NoEventFiles(dir.to_path_buf()));
        }

        let mut log = Self::new();
        for path in files {
            let reader = RecordReader::new(BufReader::new(File::open(&path)?), &path);
            let mut count = 0usize;
            for record in reader {
                log.add_event(&Event::decode(record?.as_slice())?);
                count += 1;
            }
            debug!("read {count} events from {}", path.display());
        }
        info!(
            "loaded {} scalar series from {}",
            log.series.len(),
            dir.display()
        );
        Ok(log)
    }

    /// Record the scalars an event carries, if any
    pub fn add_event(&mut self, event: &Event) {
        let Some(summary) = &event.summary else {
            return;
        };
        for value in &summary.value {
            if let Some(plugin) = value.metadata.as_ref().and_then(|m| m.plugin_data.as_ref()) {
                self.plugins
                    .entry(value.tag.clone())
                    .or_insert_with(|| plugin.plugin_name.clone());
            }

            let scalar = match (value.simple_value, &value.tensor) {
                (Some(v), _) => Some(v as f64),
                (None, Some(tensor)) if self.is_scalar_plugin(&value.tag) => tensor.scalar(),
                _ => None,
            };
            if let Some(v) = scalar {
                self.series
                    .entry(value.tag.clone())
                    .or_default()
                    .push(ScalarEvent {
                        wall_time: event.wall_time,
                        step: event.step,
                        value: v,
                    });
            }
        }
    }

    fn is_scalar_plugin(&self, tag: &str) -> bool {
        self.plugins.get(tag).is_some_and(|p| p == SCALARS_PLUGIN)
    }

    /// Tags with at least one scalar
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// The scalars logged under `tag`, in the order they were read
    pub fn scalars(&self, tag: &str) -> Result<&[ScalarEvent], ExportError> {
        self.series
            .get(tag)
            .map(Vec::as_slice)
            .ok_or_else(|| ExportError::MissingSeries(tag.to_string()))
    }
}

/// Event files directly inside `dir`, sorted by name
pub fn event_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, ExportError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_events = entry.file_name().to_string_lossy().contains("tfevents");
        if is_events && entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Appends scalar events to a new event file
pub struct EventFileWriter {
    writer: RecordWriter<BufWriter<File>>,
    path: PathBuf,
}

impl EventFileWriter {
    /// Create `events.out.tfevents.<unix seconds>.<suffix>` in `dir`
    pub fn create(dir: impl AsRef<Path>, suffix: &str) -> Result<Self, ExportError> {
        let now = wall_time();
        let path = dir
            .as_ref()
            .join(format!("events.out.tfevents.{}.{suffix}", now as u64));
        let mut writer = RecordWriter::new(BufWriter::new(File::create(&path)?));
        let header = Event {
            wall_time: now,
            file_version: Some("brain.Event:2".to_string()),
            ..Default::default()
        };
        writer.write_record(&header.encode_to_vec())?;
        Ok(Self { writer, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add_scalar(&mut self, tag: &str, value: f32, step: i64) -> Result<(), ExportError> {
        self.write_event(&Event::scalar(tag, step, value, wall_time()))
    }

    pub fn write_event(&mut self, event: &Event) -> Result<(), ExportError> {
        Ok(self.writer.write_record(&event.encode_to_vec())?)
    }

    pub fn flush(&mut self) -> Result<(), ExportError> {
        Ok(self.writer.flush()?)
    }
}

fn wall_time() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tensor_value(tag: &str, value: f32, plugin: Option<&str>) -> SummaryValue {
        SummaryValue {
            tag: tag.to_string(),
            simple_value: None,
            tensor: Some(TensorProto {
                dtype: DT_FLOAT,
                tensor_content: value.to_le_bytes().to_vec(),
                ..Default::default()
            }),
            metadata: plugin.map(|p| SummaryMetadata {
                plugin_data: Some(PluginData {
                    plugin_name: p.to_string(),
                }),
            }),
        }
    }

    fn event_with(step: i64, value: SummaryValue) -> Event {
        Event {
            step,
            summary: Some(Summary { value: vec![value] }),
            ..Default::default()
        }
    }

    #[test]
    fn simple_values_collected_in_order() {
        let mut log = ScalarLog::new();
        log.add_event(&Event::scalar("loss", 1, 0.5, 10.0));
        log.add_event(&Event::scalar("loss", 2, 0.25, 11.0));
        log.add_event(&Event::scalar("reward", 1, 3.0, 10.0));
        log.add_event(&Event {
            file_version: Some("brain.Event:2".into()),
            ..Default::default()
        });

        assert_eq!(log.tags().collect::<Vec<_>>(), vec!["loss", "reward"]);
        let loss = log.scalars("loss").unwrap();
        assert_eq!(loss.iter().map(|e| e.step).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(loss[1].value, 0.25);
        assert_eq!(loss[0].wall_time, 10.0);
        assert!(matches!(
            log.scalars("missing"),
            Err(ExportError::MissingSeries(tag)) if tag == "missing"
        ));
    }

    #[test]
    fn scalar_tensors_follow_first_metadata() {
        let mut log = ScalarLog::new();
        log.add_event(&event_with(0, tensor_value("acc", 0.5, Some(SCALARS_PLUGIN))));
        log.add_event(&event_with(1, tensor_value("acc", 0.75, None)));
        log.add_event(&event_with(0, tensor_value("hist", 1.0, Some("histograms"))));
        log.add_event(&event_with(0, tensor_value("bare", 1.0, None)));

        let acc: Vec<_> = log.scalars("acc").unwrap().iter().map(|e| e.value).collect();
        assert_eq!(acc, vec![0.5, 0.75]);
        assert!(log.scalars("hist").is_err());
        assert!(log.scalars("bare").is_err());
    }

    #[test]
    fn tensor_scalar_dtypes() {
        let double = TensorProto {
            dtype: DT_DOUBLE,
            double_val: vec![2.5],
            ..Default::default()
        };
        assert_eq!(double.scalar(), Some(2.5));
        let float = TensorProto {
            dtype: DT_FLOAT,
            float_val: vec![1.5],
            ..Default::default()
        };
        assert_eq!(float.scalar(), Some(1.5));
        let string = TensorProto {
            dtype: 7,
            ..Default::default()
        };
        assert_eq!(string.scalar(), None);
    }

    #[test]
    fn writer_output_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = EventFileWriter::create(dir.path(), "a").unwrap();
        for step in 0..5 {
            writer.add_scalar("x/1.value", step as f32 * 2.0, step).unwrap();
        }
        writer.flush().unwrap();
        fs::write(dir.path().join("notes.txt"), "not an event file").unwrap();

        assert_eq!(event_files(dir.path()).unwrap(), vec![writer.path().to_path_buf()]);
        let log = ScalarLog::load(dir.path()).unwrap();
        let values: Vec<_> = log.scalars("x/1.value").unwrap().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn empty_directory_has_no_events() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ScalarLog::load(dir.path()),
            Err(ExportError::NoEventFiles(_))
        ));
    }
}
