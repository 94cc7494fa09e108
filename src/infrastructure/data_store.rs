// Tabular data store
// Caches each read-mostly table on its own and routes writes to the
// repositories, invalidating the caches afterwards

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::domain::errors::{DataQualityWarning, DiarioResult};
use crate::domain::goals::{Collection, CollectionGoal, WeeklyGoalSchedule};
use crate::domain::kanban::ActionBoard;
use crate::domain::repositories::{
    ActionItemRepository, GoalRepository, Loaded, SalesRepository, UserRepository,
};
use crate::domain::sales::SaleRecord;
use crate::domain::user::User;
use crate::infrastructure::repositories::{
    SpreadsheetActionItemRepository, SpreadsheetGoalRepository, SpreadsheetSalesRepository,
    SpreadsheetUserRepository,
};

/// Rows of one table shared between requests
pub type Table<T> = Arc<Loaded<T>>;

/// Cached rows of one table and when they were read
struct TableCache<T> {
    slot: RwLock<Option<(Instant, Table<T>)>>,
}

impl<T> TableCache<T> {
    fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    async fn fresh(&self, ttl: Duration) -> Option<Table<T>> {
        match self.slot.read().await.as_ref() {
            Some((loaded_at, table)) if loaded_at.elapsed() < ttl => Some(Arc::clone(table)),
            _ => None,
        }
    }

    async fn put(&self, table: Table<T>) {
        *self.slot.write().await = Some((Instant::now(), table));
    }

    async fn clear(&self) {
        *self.slot.write().await = None;
    }
}

/// Front door to every table
///
/// Tables are loaded and cached independently: a missing or malformed sheet
/// fails only the requests that read it. Failed loads are not cached.
pub struct TabularDataStore {
    users: Arc<dyn UserRepository>,
    sales: Arc<dyn SalesRepository>,
    goals: Arc<dyn GoalRepository>,
    actions: Arc<dyn ActionItemRepository>,
    ttl: Duration,
    user_rows: TableCache<User>,
    sale_rows: TableCache<SaleRecord>,
    goal_rows: TableCache<CollectionGoal>,
    schedule_rows: TableCache<WeeklyGoalSchedule>,
    collection_rows: TableCache<Collection>,
    generation: AtomicU64,
}

impl TabularDataStore {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sales: Arc<dyn SalesRepository>,
        goals: Arc<dyn GoalRepository>,
        actions: Arc<dyn ActionItemRepository>,
        ttl: Duration,
    ) -> Self {
        Self {
            users,
            sales,
            goals,
            actions,
            ttl,
            user_rows: TableCache::new(),
            sale_rows: TableCache::new(),
            goal_rows: TableCache::new(),
            schedule_rows: TableCache::new(),
            collection_rows: TableCache::new(),
            generation: AtomicU64::new(0),
        }
    }

    /// Store backed by the spreadsheets named in the configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let files = &config.files;
        Self::new(
            Arc::new(SpreadsheetUserRepository::new(&files.users)),
            Arc::new(SpreadsheetSalesRepository::new(&files.sales)),
            Arc::new(SpreadsheetGoalRepository::new(
                &files.goals,
                &files.weekly_goals,
                &files.collections,
            )),
            Arc::new(SpreadsheetActionItemRepository::new(&files.actions)),
            config.cache_ttl,
        )
    }

    /// Cached rows of a table, reloading them when stale or missing
    async fn cached<T, F, Fut>(
        &self,
        cache: &TableCache<T>,
        name: &str,
        load: F,
    ) -> DiarioResult<Table<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = DiarioResult<Loaded<T>>>,
    {
        if let Some(table) = cache.fresh(self.ttl).await {
            return Ok(table);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let table = Arc::new(load().await?);
        tracing::debug!(
            "Reloaded {}: {} rows, {} warnings",
            name,
            table.rows.len(),
            table.warnings.len()
        );

        // A write that landed during the load makes these rows stale already
        if self.generation.load(Ordering::Acquire) == generation {
            cache.put(Arc::clone(&table)).await;
        }
        Ok(table)
    }

    pub async fn users(&self) -> DiarioResult<Table<User>> {
        self.cached(&self.user_rows, "users", || self.users.load_all())
            .await
    }

    pub async fn sales(&self) -> DiarioResult<Table<SaleRecord>> {
        self.cached(&self.sale_rows, "sales", || self.sales.load_all())
            .await
    }

    pub async fn goals(&self) -> DiarioResult<Table<CollectionGoal>> {
        self.cached(&self.goal_rows, "goals", || self.goals.load_goals())
            .await
    }

    pub async fn schedule(&self) -> DiarioResult<Table<WeeklyGoalSchedule>> {
        self.cached(&self.schedule_rows, "weekly goals", || {
            self.goals.load_schedule()
        })
        .await
    }

    /// The collections catalog; empty when the optional sheet is absent
    pub async fn collections(&self) -> DiarioResult<Table<Collection>> {
        self.cached(&self.collection_rows, "collections", || {
            self.goals.load_collections()
        })
        .await
    }

    /// Drops every cached table; the next read reloads
    pub async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.user_rows.clear().await;
        self.sale_rows.clear().await;
        self.goal_rows.clear().await;
        self.schedule_rows.clear().await;
        self.collection_rows.clear().await;
        tracing::debug!("Table caches invalidated");
    }

    pub async fn append_sale(&self, sale: &SaleRecord) -> DiarioResult<()> {
        self.sales.append(sale).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Fresh draft of the actions table
    pub async fn load_board(&self) -> DiarioResult<(ActionBoard, Vec<DataQualityWarning>)> {
        let (loaded, version) = self.actions.load().await?;
        Ok((ActionBoard::new(loaded.rows, version), loaded.warnings))
    }

    /// Writes the draft back and rebases it on the new file version
    pub async fn save_board(&self, board: &mut ActionBoard) -> DiarioResult<()> {
        let version = self.actions.save_all(board.items(), board.version()).await?;
        board.mark_saved(version);
        self.invalidate().await;
        Ok(())
    }
}
