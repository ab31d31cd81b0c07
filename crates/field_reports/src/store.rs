use chrono::{DateTime, Local};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Sender::User),
            "bot" => Some(Sender::Bot),
            _ => None,
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub from: Sender,
    pub text: String,
    pub ts: DateTime<Local>,
}

/// A field report linked to a site
#[derive(Debug, Clone)]
pub struct MaintenanceRequest {
    pub request_id: String,
    pub site_id: String,
    pub text: String,
    pub created_at: DateTime<Local>,
}

/// Chat history and maintenance requests, including those restored from disk
#[derive(Debug, Default)]
pub struct ReportStore {
    messages: Vec<ChatMessage>,
    requests: Vec<MaintenanceRequest>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(messages: Vec<ChatMessage>, requests: Vec<MaintenanceRequest>) -> Self {
        Self { messages, requests }
    }

    pub fn push_message(&mut self, from: Sender, text: impl Into<String>) -> &ChatMessage {
        self.messages.push(ChatMessage {
            from,
            text: text.into(),
            ts: Local::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Record a request for `site_id` and return a copy of it
    pub fn create_request(&mut self, site_id: &str, text: &str) -> MaintenanceRequest {
        let request = MaintenanceRequest {
            request_id: new_request_id(),
            site_id: site_id.to_string(),
            text: text.to_string(),
            created_at: Local::now(),
        };
        self.requests.push(request.clone());
        request
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn requests(&self) -> &[MaintenanceRequest] {
        &self.requests
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.requests.is_empty()
    }
}

/// `r_` followed by 8 hex digits
fn new_request_id() -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    format!("r_{}", &simple[..8])
}
