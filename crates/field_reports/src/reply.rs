use rand::seq::SliceRandom;

/// Keyword → candidate replies. `{}` in a default reply is replaced by the message.
const KEYWORD_REPLIES: [(&str, &[&str]); 4] = [
    (
        "flood",
        &[
            "Potential flooding detected. I'll notify the crew to monitor affected areas.",
            "Flood risk logged. Crews will be dispatched to high-risk zones.",
            "Warning: Flood-prone sites noted. Scheduling preventive inspections.",
        ],
    ),
    (
        "tree",
        &[
            "Tree maintenance report logged. I'll schedule the crew to trim or remove hazardous trees.",
            "Maintenance report regarding trees noted.",
        ],
    ),
    (
        "power",
        &[
            "Power outage reported. Crews will investigate and restore service as soon as possible.",
            "Tracking power issues. Prioritizing critical areas.",
        ],
    ),
    (
        "road",
        &[
            "Road maintenance request received. I'll add this to the weekly plan.",
            "Inspecting reported road damage and scheduling repairs.",
        ],
    ),
];

const DEFAULT_REPLIES: [&str; 3] = [
    "Message received: '{}'. I'll log it and prioritize with the weekly plan.",
    "Noted '{}'. Assigning appropriate crew action.",
    "Thanks for reporting '{}'. I'll make sure it's addressed promptly.",
];

pub const INFO_REPLY: &str =
    "This demo shows risk scores per site. For full details connect a backend with predictive models.";
pub const NO_MATCH_REPLY: &str = "Thanks — I got the report but couldn't confidently match a nearby asset. Can you provide an address or drop a pin?";

/// Reply for the first keyword `message` contains, if any
pub fn keyword_reply(message: &str) -> Option<String> {
    let mut rng = rand::thread_rng();
    let lower = message.to_lowercase();

    KEYWORD_REPLIES
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .and_then(|(_, replies)| replies.choose(&mut rng))
        .map(|reply| reply.to_string())
}

/// Keyword reply, or a default reply echoing `message`
pub fn canned_reply(message: &str) -> String {
    keyword_reply(message).unwrap_or_else(|| {
        DEFAULT_REPLIES
            .choose(&mut rand::thread_rng())
            .map(|r| r.replace("{}", message))
            .unwrap_or_else(|| message.to_string())
    })
}
