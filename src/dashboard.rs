//! # Dashboard dispatcher
//!
//! Ties the [`StockApiClient`] to the [`DashboardStore`]: every fetch opens a
//! ticket, performs the request and resolves the ticket with the result.
//! Categories are fetched independently, so after [`Dashboard::load_symbol`]
//! some slices may have succeeded while others failed.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

use crate::client::{StockApiClient, Symbol};
use crate::models::predictions::DEFAULT_PREDICTION_DAYS;
use crate::store::{Category, DashboardStore, StoreSnapshot, Transition};

/// Symbol and forecast horizon of the last full load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuery {
    pub symbol: Symbol,
    pub days: u32,
}

#[derive(Clone)]
pub struct Dashboard {
    store: DashboardStore,
    client: StockApiClient,
    active: Arc<RwLock<Option<ActiveQuery>>>,
}

impl Dashboard {
    pub fn new(store: DashboardStore, client: StockApiClient) -> Self {
        Self {
            store,
            client,
            active: Arc::new(RwLock::new(None)),
        }
    }

    pub fn store(&self) -> &DashboardStore {
        &self.store
    }

    pub async fn active_query(&self) -> Option<ActiveQuery> {
        self.active.read().await.clone()
    }

    /// Run one fetch for `category` through the store lifecycle.
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn fetch(&self, category: Category, symbol: &Symbol, days: Option<u32>) -> Transition {
        let ticket = self.store.begin_fetch(category, symbol.as_str()).await;

        match self.client.fetch(category, symbol, days).await {
            Ok(payload) => match self.store.complete_fetch(ticket, payload).await {
                Ok(transition) => transition,
                Err(err) => {
                    error!(error = %err, "Client returned a payload for the wrong category");
                    self.store.fail_fetch(ticket, err.to_string()).await
                }
            },
            Err(err) => self.store.fail_fetch(ticket, err.to_string()).await,
        }
    }

    pub async fn fetch_quote(&self, symbol: &Symbol) -> Transition {
        self.fetch(Category::Quote, symbol, None).await
    }

    pub async fn fetch_comprehensive(&self, symbol: &Symbol) -> Transition {
        self.fetch(Category::Comprehensive, symbol, None).await
    }

    pub async fn fetch_historical(&self, symbol: &Symbol) -> Transition {
        self.fetch(Category::Historical, symbol, None).await
    }

    pub async fn fetch_predictions(&self, symbol: &Symbol, days: u32) -> Transition {
        self.fetch(Category::Predictions, symbol, Some(days)).await
    }

    pub async fn fetch_prediction_summary(&self, symbol: &Symbol) -> Transition {
        self.fetch(Category::PredictionSummary, symbol, None).await
    }

    pub async fn fetch_news(&self, symbol: &Symbol) -> Transition {
        self.fetch(Category::News, symbol, None).await
    }

    /// Fetch all six categories for `symbol` concurrently and remember it as
    /// the active query.
    #[instrument(skip(self), fields(symbol = %symbol))]
    pub async fn load_symbol(&self, symbol: &Symbol, days: Option<u32>) -> StoreSnapshot {
        let query = ActiveQuery {
            symbol: symbol.clone(),
            days: days.unwrap_or(DEFAULT_PREDICTION_DAYS),
        };
        *self.active.write().await = Some(query.clone());

        self.load(&query).await
    }

    /// Reload the active query, if there is one. The active query is left
    /// as is; categories are skipped once it has been replaced or cleared.
    pub async fn refresh(&self) -> Option<StoreSnapshot> {
        let query = self.active_query().await?;
        Some(self.load(&query).await)
    }

    async fn load(&self, query: &ActiveQuery) -> StoreSnapshot {
        tokio::join!(
            self.fetch_while_active(Category::Quote, query),
            self.fetch_while_active(Category::Comprehensive, query),
            self.fetch_while_active(Category::Historical, query),
            self.fetch_while_active(Category::Predictions, query),
            self.fetch_while_active(Category::PredictionSummary, query),
            self.fetch_while_active(Category::News, query),
        );

        let snapshot = self.store.snapshot().await;
        let failed = self.store.errors().await.len();
        info!(
            revision = snapshot.revision,
            failed,
            "Dashboard load finished"
        );
        snapshot
    }

    async fn fetch_while_active(&self, category: Category, query: &ActiveQuery) -> Option<Transition> {
        if self.active.read().await.as_ref() != Some(query) {
            debug!(%category, symbol = %query.symbol, "Active query changed, skipping fetch");
            return None;
        }
        Some(self.fetch(category, &query.symbol, Some(query.days)).await)
    }

    pub async fn clear(&self, category: Category) {
        self.store.clear(category).await;
    }

    /// Reset every slice and forget the active query.
    pub async fn clear_all(&self) {
        *self.active.write().await = None;
        self.store.clear_all().await;
    }
}
