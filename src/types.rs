//! Domain entities persisted by the store
//!
//! Field names serialize with the JSON spellings the collections have always
//! used (camelCase, `type` discriminator on records), so legacy data and old
//! backup files decode unchanged.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ids are creation-timestamp millis, nudged forward so two creations
/// landing in the same millisecond still get distinct ids.
pub(crate) fn timestamp_id() -> String {
    use std::sync::atomic::{AtomicI64, Ordering};
    static LAST: AtomicI64 = AtomicI64::new(0);

    let now = Utc::now().timestamp_millis();
    let prev = LAST
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
            Some(prev.max(now - 1) + 1)
        })
        .unwrap();
    (prev.max(now - 1) + 1).to_string()
}

/// Whether a record tracks worked hours or spent money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Work,
    Expense,
}

/// A single work-hours or expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExpenseRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    /// Hours for WORK, money for EXPENSE
    pub value: f64,
    pub category: String,
    /// Full ISO instant, not just a day
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WorkExpenseRecord {
    pub fn new(kind: RecordKind, value: f64, category: impl Into<String>, note: Option<String>) -> Self {
        Self {
            id: timestamp_id(),
            kind,
            value,
            category: category.into(),
            date: Utc::now(),
            note,
        }
    }
}

/// Tag partitioning the inspiration list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListCategory {
    Sentence,
    Book,
    Article,
}

/// An entry in one of the curated lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ListCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Article body paragraphs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Times the rule was broken. Only meaningful on the not-to-do list;
    /// absent or empty means the streak is unbroken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaks: Option<Vec<DateTime<Utc>>>,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: timestamp_id(),
            text: text.into(),
            created_at: Utc::now(),
            category: None,
            author: None,
            content: None,
            breaks: None,
        }
    }
}

/// A dream board entry with its image stored inline as a data URI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dream {
    pub id: String,
    pub title: String,
    pub image_url: String,
}

impl Dream {
    pub fn new(title: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: timestamp_id(),
            title: title.into(),
            image_url: image_url.into(),
        }
    }

    /// Build a dream from raw image bytes, encoding them as a data URI.
    /// No size cap is enforced.
    pub fn from_image_bytes(title: impl Into<String>, mime_type: &str, bytes: &[u8]) -> Self {
        let image_url = format!("data:{};base64,{}", mime_type, BASE64.encode(bytes));
        Self::new(title, image_url)
    }
}

/// Relative allocation weights, not required to sum to 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinanceRatios {
    pub fixed: f64,
    pub dream: f64,
    pub desire: f64,
}

impl FinanceRatios {
    pub fn sum(&self) -> f64 {
        self.fixed + self.dream + self.desire
    }
}

/// Running balances, additive across deposits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceAllocations {
    pub fixed_savings: f64,
    pub dream_savings: f64,
    pub desire_spending: f64,
}

/// The finance singleton
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceState {
    pub total_income: f64,
    pub ratios: FinanceRatios,
    pub allocations: FinanceAllocations,
}

impl Default for FinanceState {
    fn default() -> Self {
        Self {
            total_income: 0.0,
            ratios: FinanceRatios {
                fixed: 30.0,
                dream: 20.0,
                desire: 50.0,
            },
            allocations: FinanceAllocations {
                fixed_savings: 0.0,
                dream_savings: 0.0,
                desire_spending: 0.0,
            },
        }
    }
}

/// One task inside a daily plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl DailyTask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: timestamp_id(),
            text: text.into(),
            completed: false,
        }
    }
}

/// A plan for one calendar date (`YYYY-MM-DD`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub date: String,
    pub tasks: Vec<DailyTask>,
    pub review: String,
    pub harvest: String,
}

impl DailyPlan {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            tasks: Vec::new(),
            review: String::new(),
            harvest: String::new(),
        }
    }
}

/// A keyword query attributing tracked work hours to a skill objective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryGoal {
    pub id: String,
    pub title: String,
    /// Comma-separated keywords, matched case-insensitively as substrings
    pub query: String,
    pub created_at: DateTime<Utc>,
}

impl MasteryGoal {
    pub fn new(title: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            id: timestamp_id(),
            title: title.into(),
            query: query.into(),
            created_at: Utc::now(),
        }
    }

    /// Normalized keyword list: split on commas, trimmed, lowercased,
    /// empties dropped.
    pub fn keywords(&self) -> Vec<String> {
        self.query
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Whether a record's category + note matches any keyword
    pub fn matches(&self, record: &WorkExpenseRecord) -> bool {
        let keywords = self.keywords();
        if keywords.is_empty() {
            return false;
        }
        let text = format!(
            "{} {}",
            record.category,
            record.note.as_deref().unwrap_or_default()
        )
        .to_lowercase();
        keywords.iter().any(|k| text.contains(k.as_str()))
    }

    /// Total WORK hours attributed to this goal
    pub fn accumulated_hours(&self, records: &[WorkExpenseRecord]) -> f64 {
        records
            .iter()
            .filter(|r| r.kind == RecordKind::Work && self.matches(r))
            .map(|r| r.value)
            .sum()
    }
}

/// How often a task text recurs in future plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStat {
    pub text: String,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_legacy_field_names() {
        let record = WorkExpenseRecord::new(RecordKind::Work, 1.5, "coding", None);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "WORK");
        assert!(json["value"].is_number());
        // absent note is omitted entirely, as the legacy data did
        assert!(json.get("note").is_none());
    }

    #[test]
    fn list_item_round_trips_breaks() {
        let mut item = ListItem::new("no sugar");
        item.breaks = Some(vec![Utc::now()]);
        let json = serde_json::to_string(&item).unwrap();
        let back: ListItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn dream_from_bytes_builds_data_uri() {
        let dream = Dream::from_image_bytes("sailboat", "image/png", b"pngbytes");
        assert!(dream.image_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn mastery_matching_is_case_insensitive_substring() {
        let goal = MasteryGoal::new("Rust mastery", "rust, Systems");
        let hit = WorkExpenseRecord::new(RecordKind::Work, 2.0, "Rust compiler", None);
        let via_note = WorkExpenseRecord::new(
            RecordKind::Work,
            1.0,
            "reading",
            Some("systems programming book".into()),
        );
        let miss = WorkExpenseRecord::new(RecordKind::Work, 3.0, "gardening", None);
        let expense = WorkExpenseRecord::new(RecordKind::Expense, 9.0, "rust book", None);

        assert!(goal.matches(&hit));
        assert!(goal.matches(&via_note));
        assert!(!goal.matches(&miss));
        let records = vec![hit, via_note, miss, expense];
        // expenses never contribute hours
        assert_eq!(goal.accumulated_hours(&records), 3.0);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let goal = MasteryGoal::new("empty", " , ,");
        let record = WorkExpenseRecord::new(RecordKind::Work, 1.0, "anything", None);
        assert!(!goal.matches(&record));
    }

    #[test]
    fn finance_defaults_match_original_ratios() {
        let state = FinanceState::default();
        assert_eq!(state.ratios.sum(), 100.0);
        assert_eq!(state.allocations.fixed_savings, 0.0);
    }
}
