//! Deterministic A/B/C bucketing and funnel metrics over recorded events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// 32-bit rolling hash (`h * 31 + unit`) over UTF-16 code units, returned as
/// an absolute value so clients computing the same hash land in the same bucket.
pub fn hash_user_id(value: &str) -> u32 {
    let hash = value.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32)
    });
    hash.unsigned_abs()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    A,
    B,
    C,
}

/// Calls-to-action shown on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallToAction {
    Share,
    Match,
    Reward,
}

impl Bucket {
    pub fn assign(user_id: &str) -> Self {
        match hash_user_id(user_id) % 3 {
            0 => Bucket::A,
            1 => Bucket::B,
            _ => Bucket::C,
        }
    }

    /// A leads with sharing, B with the reward, C with matching.
    pub fn cta_order(&self) -> [CallToAction; 3] {
        use CallToAction::{Match, Reward, Share};
        match self {
            Bucket::A => [Share, Match, Reward],
            Bucket::B => [Reward, Share, Match],
            Bucket::C => [Match, Share, Reward],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Lovely,
    Minimal,
}

impl Palette {
    pub fn assign(user_id: &str) -> Self {
        if hash_user_id(&format!("{user_id}_palette")) % 2 == 0 {
            Palette::Lovely
        } else {
            Palette::Minimal
        }
    }
}

/// Variant a user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub bucket: Bucket,
    pub palette: Palette,
}

impl Assignment {
    pub fn for_user(user_id: &str) -> Self {
        Self {
            bucket: Bucket::assign(user_id),
            palette: Palette::assign(user_id),
        }
    }

    pub fn cta_order(&self) -> [CallToAction; 3] {
        self.bucket.cta_order()
    }
}

/// Product analytics events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PageView,
    TestStart,
    QuestionAnswered,
    TestComplete,
    TypologyEntered,
    TypologySkip,
    ResultView,
    ShareOpen,
    ShareComplete,
    ShareLinkCopy,
    MatchStart,
    MatchComplete,
    InviteCreate,
    InviteClick,
    InviteOpen,
    InviteFilled,
    RewardOpen,
    RewardComplete,
    TestRetake,
    BucketAssigned,
    PaletteAssigned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppEvent {
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl AppEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            timestamp: Utc::now(),
            data: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}

/// Storage for analytics events (in-memory log, queue, warehouse).
pub trait EventStore: Send + Sync {
    fn record(&self, event: AppEvent) -> Result<(), EventError>;
    fn all(&self) -> Result<Vec<AppEvent>, EventError>;

    /// Whether a bucket assignment was already recorded for `user_id`.
    /// Stores with an index should override the scan.
    fn is_enrolled(&self, user_id: &str) -> Result<bool, EventError> {
        Ok(self.all()?.iter().any(|event| {
            event.kind == EventKind::BucketAssigned
                && event.data.get("user_id").map(String::as_str) == Some(user_id)
        }))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("event store unavailable: {0}")]
    Unavailable(String),
}

/// Assigns variants and records the assignment once per user. Enrollment
/// state lives in the store; the lock only serialises check-then-record.
pub struct ExperimentAssigner<S> {
    store: Arc<S>,
    enrollment: Mutex<()>,
}

impl<S: EventStore> ExperimentAssigner<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            enrollment: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the user's variant. The first call for a user records
    /// `BucketAssigned` and `PaletteAssigned`; later calls only recompute.
    pub fn enroll(&self, user_id: &str) -> Result<Assignment, EventError> {
        let assignment = Assignment::for_user(user_id);

        let _guard = self
            .enrollment
            .lock()
            .map_err(|_| EventError::Unavailable("enrollment lock poisoned".to_string()))?;
        let first_visit = !self.store.is_enrolled(user_id)?;

        if first_visit {
            debug!(
                user_id,
                bucket = ?assignment.bucket,
                palette = ?assignment.palette,
                "assigned experiment variant"
            );
            self.store.record(
                AppEvent::new(EventKind::BucketAssigned)
                    .with("bucket", format!("{:?}", assignment.bucket))
                    .with("palette", format!("{:?}", assignment.palette))
                    .with("user_id", user_id),
            )?;
            self.store.record(
                AppEvent::new(EventKind::PaletteAssigned)
                    .with("palette", format!("{:?}", assignment.palette))
                    .with("user_id", user_id),
            )?;
        }

        Ok(assignment)
    }
}

/// Conversion rates over a slice of recorded events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FunnelMetrics {
    pub share_rate: f64,
    pub invite_conversion: f64,
    pub reward_conversion: f64,
    pub actions_per_event: f64,
}

impl FunnelMetrics {
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a EventKind>,
    {
        let mut counts: HashMap<EventKind, usize> = HashMap::new();
        let mut total = 0usize;
        for kind in events {
            *counts.entry(*kind).or_default() += 1;
            total += 1;
        }
        let count = |kind: EventKind| counts.get(&kind).copied().unwrap_or(0);

        let share_completes = count(EventKind::ShareComplete);
        let reward_completes = count(EventKind::RewardComplete);

        Self {
            share_rate: ratio(share_completes, count(EventKind::ResultView)),
            invite_conversion: ratio(count(EventKind::InviteFilled), count(EventKind::InviteOpen)),
            reward_conversion: ratio(reward_completes, count(EventKind::RewardOpen)),
            actions_per_event: (share_completes + reward_completes) as f64 / total.max(1) as f64,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
