use crate::error::{ReportError, Result};
use crate::store::{ChatMessage, MaintenanceRequest, ReportStore, Sender};
use chrono::{DateTime, Local};
use csv::{ReaderBuilder, StringRecord, Writer, WriterBuilder};
use log::warn;
use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

pub const CHAT_FILE: &str = "chat.csv";
pub const REQUESTS_FILE: &str = "requests.csv";

const CHAT_HEADER: [&str; 3] = ["From", "Text", "Timestamp"];
const REQUEST_HEADER: [&str; 4] = ["RequestId", "SiteId", "Text", "CreatedAt"];

/// Chat log and maintenance requests kept as CSV files in one directory.
///
/// Every message and request is appended as soon as it is recorded, so a
/// session that is killed keeps everything it already acknowledged. The
/// next session reads the files back with [`Journal::load`].
#[derive(Debug, Clone)]
pub struct Journal {
    chat: PathBuf,
    requests: PathBuf,
}

impl Journal {
    /// Open the journal in `dir`, creating the directory and headed files if missing
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| ReportError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let journal = Self {
            chat: dir.join(CHAT_FILE),
            requests: dir.join(REQUESTS_FILE),
        };
        ensure_headed(&journal.chat, &CHAT_HEADER)?;
        ensure_headed(&journal.requests, &REQUEST_HEADER)?;
        Ok(journal)
    }

    pub fn chat_path(&self) -> &Path {
        &self.chat
    }

    pub fn requests_path(&self) -> &Path {
        &self.requests
    }

    /// Read back every message and request saved so far.
    ///
    /// Rows that cannot be parsed are logged and skipped.
    pub fn load(&self) -> Result<ReportStore> {
        let mut messages = Vec::new();
        for (i, record) in read_records(&self.chat)?.into_iter().enumerate() {
            match parse_message(&record) {
                Some(message) => messages.push(message),
                None => warn!("Skipping malformed row {} in {}", i + 2, self.chat.display()),
            }
        }

        let mut requests = Vec::new();
        for (i, record) in read_records(&self.requests)?.into_iter().enumerate() {
            match parse_request(&record) {
                Some(request) => requests.push(request),
                None => warn!(
                    "Skipping malformed row {} in {}",
                    i + 2,
                    self.requests.display()
                ),
            }
        }

        Ok(ReportStore::from_parts(messages, requests))
    }

    pub fn append_message(&self, message: &ChatMessage) -> Result<()> {
        let mut writer = append_writer(&self.chat)?;
        writer.write_record([
            message.from.to_string(),
            message.text.clone(),
            message.ts.to_rfc3339(),
        ])?;
        writer.flush()?;
        Ok(())
    }

    pub fn append_request(&self, request: &MaintenanceRequest) -> Result<()> {
        let mut writer = append_writer(&self.requests)?;
        writer.write_record([
            request.request_id.as_str(),
            request.site_id.as_str(),
            request.text.as_str(),
            request.created_at.to_rfc3339().as_str(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}

fn writer_builder() -> WriterBuilder {
    #[allow(unused_mut)]
    let mut builder = WriterBuilder::new();
    #[cfg(windows)]
    {
        use csv::Terminator;
        builder.terminator(Terminator::CRLF);
    }
    builder
}

/// Create `path` with a header row unless it already holds data
fn ensure_headed(path: &Path, header: &[&str]) -> Result<()> {
    if path.metadata().is_ok_and(|m| m.len() > 0) {
        return Ok(());
    }

    let file = File::create(path).map_err(|e| ReportError::CreateFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = writer_builder().from_writer(file);
    writer.write_record(header)?;
    writer.flush()?;
    Ok(())
}

fn append_writer(path: &Path) -> Result<Writer<File>> {
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|e| ReportError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(writer_builder().from_writer(file))
}

fn read_records(path: &Path) -> Result<Vec<StringRecord>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(records)
}

fn parse_timestamp(s: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Local))
}

fn parse_message(record: &StringRecord) -> Option<ChatMessage> {
    Some(ChatMessage {
        from: Sender::parse(record.get(0)?)?,
        text: record.get(1)?.to_string(),
        ts: parse_timestamp(record.get(2)?)?,
    })
}

fn parse_request(record: &StringRecord) -> Option<MaintenanceRequest> {
    Some(MaintenanceRequest {
        request_id: record.get(0)?.to_string(),
        site_id: record.get(1)?.to_string(),
        text: record.get(2)?.to_string(),
        created_at: parse_timestamp(record.get(3)?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_writes_headers() {
        let temp_dir = TempDir::new().unwrap();
        let journal = Journal::open(temp_dir.path()).unwrap();

        let chat = std::fs::read_to_string(journal.chat_path()).unwrap();
        assert_eq!(chat.lines().next(), Some("From,Text,Timestamp"));
        let requests = std::fs::read_to_string(journal.requests_path()).unwrap();
        assert_eq!(requests.lines().next(), Some("RequestId,SiteId,Text,CreatedAt"));
        assert!(journal.load().unwrap().is_empty());
    }

    #[test]
    fn test_open_creates_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let journal = Journal::open(&nested).unwrap();
        assert!(journal.chat_path().starts_with(&nested));
        assert!(journal.requests_path().exists());
    }

    #[test]
    fn test_appended_rows_are_on_disk_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let journal = Journal::open(temp_dir.path()).unwrap();
        let mut store = ReportStore::new();

        let message = store
            .push_message(Sender::User, "standing water, 5th & K")
            .clone();
        journal.append_message(&message).unwrap();
        let request = store.create_request("A-001", "standing water, 5th & K");
        journal.append_request(&request).unwrap();

        let chat = std::fs::read_to_string(journal.chat_path()).unwrap();
        let lines: Vec<&str> = chat.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("user,\"standing water, 5th & K\","));

        let requests = std::fs::read_to_string(journal.requests_path()).unwrap();
        assert!(requests.contains(&format!("{},A-001,", request.request_id)));
    }

    #[test]
    fn test_reopen_keeps_and_loads_rows() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = ReportStore::new();
        {
            let journal = Journal::open(temp_dir.path()).unwrap();
            let message = store.push_message(Sender::Bot, "multi\nline").clone();
            journal.append_message(&message).unwrap();
            let request = store.create_request("ward-5", "clogged drain");
            journal.append_request(&request).unwrap();
        }

        let journal = Journal::open(temp_dir.path()).unwrap();
        let loaded = journal.load().unwrap();
        assert_eq!(loaded.messages().len(), 1);
        assert_eq!(loaded.messages()[0].from, Sender::Bot);
        assert_eq!(loaded.messages()[0].text, "multi\nline");
        assert_eq!(loaded.requests().len(), 1);
        assert_eq!(loaded.requests()[0].request_id, store.requests()[0].request_id);
        assert_eq!(
            loaded.requests()[0].created_at.timestamp(),
            store.requests()[0].created_at.timestamp()
        );
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CHAT_FILE),
            "From,Text,Timestamp\nrobot,hi,2024-01-01T00:00:00+00:00\nuser,hi,yesterday\nuser,ok,2024-01-01T00:00:00+00:00\n",
        )
        .unwrap();

        let journal = Journal::open(temp_dir.path()).unwrap();
        let loaded = journal.load().unwrap();
        assert_eq!(loaded.messages().len(), 1);
        assert_eq!(loaded.messages()[0].text, "ok");
    }
}
