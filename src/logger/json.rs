//! Line-delimited JSON sink.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::io::Write;
use std::sync::Mutex;

use super::{Field, LogRecord, Logger, LoggerOption, LoggerState};
use crate::types::{Error, Result};

/// Writes each record as one JSON object followed by a newline.
///
/// Keys: context fields, record fields, then `ts`, `level`, `msg` and
/// `caller` (only when a caller skip was requested). Record fields win over
/// context fields; the built-in keys win over both.
#[derive(Debug)]
pub struct JsonLogger<W> {
    writer: Mutex<W>,
    state: LoggerState,
}

impl<W: Write + Send> JsonLogger<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            state: LoggerState::default(),
        }
    }

    /// Consume the logger and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|_| Error::internal("json logger writer lock poisoned"))
    }

    fn encode(&self, record: &LogRecord) -> Result<Vec<u8>> {
        let mut object = Map::new();
        for Field { key, value } in self.state.context_for(record).chain(record.fields.iter()) {
            object.insert(key.to_string(), serde_json::to_value(value)?);
        }
        // Built-in keys go last so no field can overwrite them.
        object.insert(
            "ts".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        object.insert("level".to_string(), serde_json::to_value(record.level)?);
        object.insert("msg".to_string(), Value::String(record.message.to_string()));
        if self.state.attributes_caller() {
            object.insert("caller".to_string(), Value::String(record.caller_string()));
        } else {
            object.remove("caller");
        }

        let mut line = serde_json::to_vec(&Value::Object(object))?;
        line.push(b'\n');
        Ok(line)
    }
}

impl<W: Write + Send> Logger for JsonLogger<W> {
    fn log(&self, record: LogRecord) -> Result<()> {
        let line = self.encode(&record)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| Error::internal("json logger writer lock poisoned"))?;
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }

    fn with_options(mut self, options: Vec<LoggerOption>) -> Self {
        self.state.apply(options);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::Level;
    use std::io;

    fn parse_lines(buf: &[u8]) -> Vec<Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_line() {
        let logger = JsonLogger::new(Vec::new());
        logger
            .info("Retrying service", vec![Field::string("service", "mailer"), Field::int("try", 2)])
            .unwrap();
        logger
            .error("Start failed", vec![Field::string("service", "mailer")])
            .unwrap();

        let lines = parse_lines(&logger.into_inner().unwrap());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["level"], "info");
        assert_eq!(lines[0]["msg"], "Retrying service");
        assert_eq!(lines[0]["service"], "mailer");
        assert_eq!(lines[0]["try"], 2);
        assert!(lines[0].get("caller").is_none());
        assert!(lines[0]["ts"].as_str().unwrap().ends_with('Z'));
        assert_eq!(lines[1]["level"], "error");
    }

    #[test]
    fn test_options_add_caller_and_context() {
        let logger = JsonLogger::new(Vec::new()).with_options(vec![
            LoggerOption::Fields(vec![Field::string("supervisor", "edge-1")]),
            LoggerOption::CallerSkip(2),
        ]);
        let line = line!() + 1;
        logger.log(LogRecord::new(Level::Info, "Stopped", vec![])).unwrap();

        let lines = parse_lines(&logger.into_inner().unwrap());
        assert_eq!(lines[0]["supervisor"], "edge-1");
        let caller = lines[0]["caller"].as_str().unwrap();
        assert!(caller.ends_with(&format!("json.rs:{}", line)), "caller was {caller}");
    }

    #[test]
    fn test_fields_cannot_overwrite_builtin_keys() {
        let logger = JsonLogger::new(Vec::new()).with_options(vec![LoggerOption::Fields(vec![
            Field::string("level", "info"),
            Field::string("msg", "ok"),
            Field::string("service", "sup"),
            Field::string("supervisor", "edge-1"),
        ])]);
        logger
            .error(
                "Start failed",
                vec![Field::string("service", "api"), Field::string("level", "debug")],
            )
            .unwrap();
        logger.info("Stopping services", vec![]).unwrap();

        let lines = parse_lines(&logger.into_inner().unwrap());
        assert_eq!(lines[0]["level"], "error");
        assert_eq!(lines[0]["msg"], "Start failed");
        assert_eq!(lines[0]["service"], "api");
        assert_eq!(lines[0]["supervisor"], "edge-1");
        assert_eq!(lines[1]["msg"], "Stopping services");
        assert!(lines[1].get("service").is_none());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_surfaces_as_io_error() {
        let logger = JsonLogger::new(BrokenPipe);
        let err = logger.info("Started", vec![]).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
