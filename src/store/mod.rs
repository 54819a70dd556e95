//! # Request-state store
//!
//! Holds one [`RequestSlice`] per [`Category`] and is the only place slice
//! lifecycles change. The store is constructed explicitly and shared by
//! cloning; every clone sees the same state.
//!
//! Each `begin_fetch` hands out a [`RequestTicket`] with a per-category
//! sequence number. Completions for anything but the latest ticket are
//! dropped, so a slow response for an older request can never overwrite a
//! newer one.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{watch, RwLock};
use tracing::{debug, warn};

use crate::errors::store_error::StoreError;
use crate::models::Payload;

pub mod category;
pub mod slice;

pub use category::{Category, UnknownCategory};
pub use slice::{RequestSlice, RequestTicket, SliceStatus, Transition};

/// Point-in-time copy of every slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
    /// Increases by one on every applied transition.
    pub revision: u64,
    pub slices: BTreeMap<Category, RequestSlice>,
}

impl StoreSnapshot {
    pub fn slice(&self, category: Category) -> &RequestSlice {
        &self.slices[&category]
    }
}

struct StoreState {
    slices: BTreeMap<Category, RequestSlice>,
    /// Sequence of the most recent ticket per category. Never reset.
    latest_seq: BTreeMap<Category, u64>,
}

#[derive(Clone)]
pub struct DashboardStore {
    state: Arc<RwLock<StoreState>>,
    revision: Arc<watch::Sender<u64>>,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardStore {
    /// Create a store with every category idle.
    pub fn new() -> Self {
        let slices = Category::ALL
            .into_iter()
            .map(|category| (category, RequestSlice::default()))
            .collect();
        let latest_seq = Category::ALL.into_iter().map(|c| (c, 0)).collect();
        let (revision, _) = watch::channel(0);

        Self {
            state: Arc::new(RwLock::new(StoreState { slices, latest_seq })),
            revision: Arc::new(revision),
        }
    }

    /// Mark `category` as pending for `symbol`. The previous error is cleared,
    /// previous data is kept.
    pub async fn begin_fetch(&self, category: Category, symbol: &str) -> RequestTicket {
        let mut state = self.state.write().await;

        let seq = state.latest_seq.get(&category).copied().unwrap_or(0) + 1;
        state.latest_seq.insert(category, seq);

        let slice = slice_mut(&mut state, category);
        slice.status = SliceStatus::Pending;
        slice.error = None;
        slice.symbol = Some(symbol.to_string());
        slice.updated_at = Some(Utc::now());

        self.bump_revision();
        debug!(category = %category, symbol = %symbol, seq, "Fetch started");

        RequestTicket { category, seq }
    }

    /// Store a successful result for `ticket`.
    ///
    /// # Errors
    /// Returns [`StoreError::CategoryMismatch`] when `payload` belongs to a
    /// different category than the ticket.
    pub async fn complete_fetch(
        &self,
        ticket: RequestTicket,
        payload: Payload,
    ) -> Result<Transition, StoreError> {
        if payload.category() != ticket.category {
            return Err(StoreError::CategoryMismatch {
                ticket: ticket.category,
                payload: payload.category(),
            });
        }

        let mut state = self.state.write().await;
        if !is_current(&state, ticket) {
            debug!(category = %ticket.category, seq = ticket.seq, "Discarding stale completion");
            return Ok(Transition::Discarded);
        }

        let slice = slice_mut(&mut state, ticket.category);
        slice.status = SliceStatus::Succeeded;
        slice.data = Some(payload);
        slice.error = None;
        slice.updated_at = Some(Utc::now());

        self.bump_revision();
        Ok(Transition::Applied)
    }

    /// Record a failure for `ticket`. Previously fetched data stays in place.
    pub async fn fail_fetch(&self, ticket: RequestTicket, message: impl Into<String>) -> Transition {
        let message = message.into();
        let mut state = self.state.write().await;
        if !is_current(&state, ticket) {
            debug!(category = %ticket.category, seq = ticket.seq, "Discarding stale failure");
            return Transition::Discarded;
        }

        warn!(category = %ticket.category, error = %message, "Fetch failed");

        let slice = slice_mut(&mut state, ticket.category);
        slice.status = SliceStatus::Failed;
        slice.error = Some(message);
        slice.updated_at = Some(Utc::now());

        self.bump_revision();
        Transition::Applied
    }

    /// Reset `category` to its initial idle state. Requests still in flight
    /// for it will be discarded when they resolve.
    pub async fn clear(&self, category: Category) {
        let mut state = self.state.write().await;
        Self::reset(&mut state, category);
        self.bump_revision();
    }

    pub async fn clear_all(&self) {
        let mut state = self.state.write().await;
        for category in Category::ALL {
            Self::reset(&mut state, category);
        }
        self.bump_revision();
    }

    fn reset(state: &mut StoreState, category: Category) {
        if let Some(seq) = state.latest_seq.get_mut(&category) {
            *seq += 1;
        }
        *slice_mut(state, category) = RequestSlice::default();
    }

    pub async fn slice(&self, category: Category) -> RequestSlice {
        let state = self.state.read().await;
        state.slices.get(&category).cloned().unwrap_or_default()
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;
        StoreSnapshot {
            revision: *self.revision.borrow(),
            slices: state.slices.clone(),
        }
    }

    /// True while any category has a request in flight.
    pub async fn is_loading(&self) -> bool {
        let state = self.state.read().await;
        state.slices.values().any(RequestSlice::is_pending)
    }

    /// Current error message of every failed category.
    pub async fn errors(&self) -> Vec<(Category, String)> {
        let state = self.state.read().await;
        state
            .slices
            .iter()
            .filter_map(|(category, slice)| slice.error.clone().map(|e| (*category, e)))
            .collect()
    }

    /// Receiver that is notified with the new revision after every change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

fn is_current(state: &StoreState, ticket: RequestTicket) -> bool {
    let latest = state.latest_seq.get(&ticket.category).copied();
    let pending = state
        .slices
        .get(&ticket.category)
        .is_some_and(RequestSlice::is_pending);
    latest == Some(ticket.seq) && pending
}

fn slice_mut(state: &mut StoreState, category: Category) -> &mut RequestSlice {
    state.slices.entry(category).or_default()
}
