use log::{debug, error, warn};
use planner::{PlanReport, PlanningRequest, Policy, RiskThresholds, Site, plan};

use crate::error::Result;
use crate::intent::{Intent, classify_intent, extract_region_ref};
use crate::journal::Journal;
use crate::matcher::{find_site_by_text, resolve_region};
use crate::reply::{INFO_REPLY, NO_MATCH_REPLY, canned_reply, keyword_reply};
use crate::store::{ReportStore, Sender};

/// One chat session over a fixed site list
#[derive(Debug)]
pub struct Session {
    sites: Vec<Site>,
    thresholds: RiskThresholds,
    store: ReportStore,
    journal: Option<Journal>,
}

impl Session {
    /// Session that keeps its history in memory only
    pub fn new(sites: Vec<Site>) -> Self {
        Self {
            sites,
            thresholds: RiskThresholds::default(),
            store: ReportStore::new(),
            journal: None,
        }
    }

    /// Session that restores earlier history from `journal` and appends to it
    pub fn with_journal(sites: Vec<Site>, journal: Journal) -> Result<Self> {
        let store = journal.load()?;
        Ok(Self {
            sites,
            thresholds: RiskThresholds::default(),
            store,
            journal: Some(journal),
        })
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    /// Requests saved so far, restored ones included
    pub fn saved_requests(&self) -> usize {
        self.store.requests().len()
    }

    /// Handle one user message and return the bot replies in order
    pub fn handle(&mut self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        self.record_message(Sender::User, text);

        let intent = classify_intent(text);
        debug!("intent: {:?}", intent);

        let mut replies = match intent {
            Intent::Report => self.handle_report(text),
            Intent::Info => vec![INFO_REPLY.to_string()],
            Intent::Other => vec![canned_reply(text)],
        };

        if let Some(note) = self.region_plan_note(text) {
            replies.push(note);
        }

        for reply in &replies {
            self.record_message(Sender::Bot, reply);
        }
        replies
    }

    fn record_message(&mut self, from: Sender, text: &str) {
        let message = self.store.push_message(from, text);
        if let Some(journal) = &self.journal
            && let Err(e) = journal.append_message(message)
        {
            error!("Failed to save message: {e}");
        }
    }

    fn handle_report(&mut self, text: &str) -> Vec<String> {
        let site = extract_region_ref(text)
            .and_then(|r| resolve_region(&r, &self.sites))
            .or_else(|| find_site_by_text(text, &self.sites))
            .cloned();

        match site {
            Some(site) => {
                let request = self.store.create_request(&site.id, text);
                if let Some(journal) = &self.journal
                    && let Err(e) = journal.append_request(&request)
                {
                    error!("Failed to save request {}: {e}", request.request_id);
                }
                vec![
                    format!(
                        "Thanks — I linked this to {} (ID {}). Creating a maintenance request...",
                        site.label, site.id
                    ),
                    format!(
                        "Saved request locally (demo mode). Request ID: {}",
                        request.request_id
                    ),
                ]
            }
            None => keyword_reply(text)
                .into_iter()
                .chain(std::iter::once(NO_MATCH_REPLY.to_string()))
                .collect(),
        }
    }

    /// Single-entry plan for a site named like "ward 5", if one is known
    fn region_plan_note(&self, text: &str) -> Option<String> {
        let region = extract_region_ref(text)?;
        let site = resolve_region(&region, &self.sites)?;

        let request = PlanningRequest::new(vec![site.clone()], 1, Policy::RoundRobin);
        match plan(&request) {
            Ok(result) => {
                let report = PlanReport::new(&request, result, self.thresholds);
                let band = self.thresholds.band(site.risk);
                Some(format!(
                    "Plan note for {}: {} [{} risk]",
                    region,
                    report.crew_lines().join("; "),
                    band
                ))
            }
            Err(e) => {
                warn!("could not plan {}: {}", region, e);
                None
            }
        }
    }
}
