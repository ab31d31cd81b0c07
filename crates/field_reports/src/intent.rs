use std::fmt;

const REPORT_KEYWORDS: [&str; 5] = ["flood", "water", "standing", "overflow", "clog"];
const INFO_KEYWORDS: [&str; 5] = ["status", "how", "when", "plan", "schedule"];
const REGION_KEYWORDS: [&str; 4] = ["ward", "neighborhood", "site", "asset"];

/// What a chat message is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// A maintenance problem in the field
    Report,
    /// A question about risk scores or the plan
    Info,
    Other,
}

/// Keyword classifier; report keywords win over info keywords
pub fn classify_intent(text: &str) -> Intent {
    let t = text.to_lowercase();
    if REPORT_KEYWORDS.iter().any(|k| t.contains(k)) {
        Intent::Report
    } else if INFO_KEYWORDS.iter().any(|k| t.contains(k)) {
        Intent::Info
    } else {
        Intent::Other
    }
}

/// `<keyword> <number>` mention such as "ward 5"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRef {
    pub keyword: &'static str,
    pub number: u32,
}

impl fmt::Display for RegionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.keyword, self.number)
    }
}

/// First region keyword (whole word, any case) directly followed by an integer
pub fn extract_region_ref(text: &str) -> Option<RegionRef> {
    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    words.windows(2).find_map(|pair| {
        let keyword = REGION_KEYWORDS.iter().find(|k| **k == pair[0])?;
        let number = pair[1].parse::<u32>().ok()?;
        Some(RegionRef {
            keyword: *keyword,
            number,
        })
    })
}
