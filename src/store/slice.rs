use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Category;
use crate::models::Payload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Lifecycle state of one category.
///
/// `data` is only ever written by a successful completion and survives a
/// later failure, so a failed slice may still show the last good result.
/// `error` is only set while `status` is `Failed`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RequestSlice {
    pub status: SliceStatus,
    pub data: Option<Payload>,
    pub error: Option<String>,
    /// Symbol of the most recent request.
    pub symbol: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RequestSlice {
    pub fn is_pending(&self) -> bool {
        self.status == SliceStatus::Pending
    }
}

/// Identifies one `begin_fetch` call. Completions carrying a ticket that is
/// no longer the latest for its category are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub category: Category,
    pub seq: u64,
}

/// Whether a completion was written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Applied,
    /// The request was superseded by a newer one or the slice was cleared.
    Discarded,
}
