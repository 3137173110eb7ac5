use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::db;
use crate::entities::ledger_item::{self, Entity as LedgerItems};
use crate::errors::ServiceError;
use crate::taxonomy;

/// Identifying key of a ledger row. `size` is normalized to the canonical
/// short code, or an empty string when the item is unsized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerKey {
    pub name: String,
    pub category: String,
    pub size: String,
}

impl LedgerKey {
    /// Builds a key from raw request fields. The category is free text (the
    /// legacy ledger enforced no enumeration), but must be non-empty.
    pub fn parse(
        name: &str,
        category: &str,
        size: Option<&str>,
    ) -> Result<Self, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::ValidationError(
                "name must not be empty".into(),
            ));
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(ServiceError::ValidationError(
                "category must not be empty".into(),
            ));
        }
        let size = match size.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => taxonomy::parse_size(raw)?.to_string(),
            None => String::new(),
        };
        Ok(Self {
            name: name.to_string(),
            category: category.to_lowercase(),
            size,
        })
    }

    fn filter(&self) -> Condition {
        Condition::all()
            .add(ledger_item::Column::Name.eq(self.name.clone()))
            .add(ledger_item::Column::Category.eq(self.category.clone()))
            .add(ledger_item::Column::Size.eq(self.size.clone()))
    }
}

/// Service for the additive-quantity ledger.
///
/// Quantity math is delegated to the store's atomic update primitives; the
/// service never does read-then-write arithmetic, so concurrent mutations of
/// one key cannot lose updates.
#[derive(Clone)]
pub struct LedgerService {
    db: Arc<DatabaseConnection>,
    store_timeout: Duration,
}

impl LedgerService {
    pub fn new(db: Arc<DatabaseConnection>, store_timeout: Duration) -> Self {
        Self { db, store_timeout }
    }

    /// Adds `delta` to the row matching `key`, creating it with
    /// `quantity = delta` when absent.
    #[instrument(skip(self))]
    pub async fn add_or_increment(
        &self,
        key: LedgerKey,
        delta: i32,
    ) -> Result<ledger_item::Model, ServiceError> {
        if delta <= 0 {
            return Err(ServiceError::ValidationError(
                "quantity must be positive".into(),
            ));
        }

        let updated = self.increment(&key, delta).await?;
        if updated == 0 {
            let now = Utc::now().naive_utc();
            let model = ledger_item::ActiveModel {
                id: Set(Uuid::new_v4().to_string()),
                name: Set(key.name.clone()),
                category: Set(key.category.clone()),
                size: Set(key.size.clone()),
                quantity: Set(delta),
                created_at: Set(now),
                updated_at: Set(now),
            };

            let db = self.db.clone();
            let insert = db::run_store_op("ledger.insert", self.store_timeout, || {
                let db = db.clone();
                let model = model.clone();
                async move { model.insert(&*db).await }
            })
            .await;

            match insert {
                Ok(inserted) => {
                    info!(id = %inserted.id, name = %key.name, delta, "ledger item created");
                    return Ok(inserted);
                }
                // Lost the insert race on the unique key; the winner's row
                // takes the increment instead.
                Err(ServiceError::DatabaseError(err)) if is_unique_violation(&err) => {
                    warn!(name = %key.name, "concurrent ledger insert, applying increment");
                    if self.increment(&key, delta).await? == 0 {
                        return Err(ServiceError::InternalError(
                            "ledger row vanished during upsert".into(),
                        ));
                    }
                }
                Err(err) => return Err(err),
            }
        }

        self.fetch_required(&key).await
    }

    /// Subtracts `delta` from the row matching `key`. The subtraction is a
    /// single conditional update guarded by `quantity >= delta`, so the
    /// count can never go negative.
    #[instrument(skip(self))]
    pub async fn decrement(
        &self,
        key: LedgerKey,
        delta: i32,
    ) -> Result<ledger_item::Model, ServiceError> {
        if delta <= 0 {
            return Err(ServiceError::ValidationError(
                "quantity must be positive".into(),
            ));
        }

        let now = Utc::now().naive_utc();
        let db = self.db.clone();
        let condition = key
            .filter()
            .add(ledger_item::Column::Quantity.gte(delta));
        let result = db::run_store_op("ledger.decrement", self.store_timeout, || {
            let db = db.clone();
            let condition = condition.clone();
            async move {
                LedgerItems::update_many()
                    .col_expr(
                        ledger_item::Column::Quantity,
                        Expr::col(ledger_item::Column::Quantity).sub(delta),
                    )
                    .col_expr(ledger_item::Column::UpdatedAt, Expr::value(now))
                    .filter(condition)
                    .exec(&*db)
                    .await
            }
        })
        .await?;

        if result.rows_affected == 0 {
            // Zero rows means either no such key or a floor breach; look at
            // the row to report which.
            return match self.fetch(&key).await? {
                None => Err(ServiceError::NotFound(format!(
                    "no ledger item matching {} / {} / {}",
                    key.name,
                    key.category,
                    if key.size.is_empty() { "-" } else { &key.size }
                ))),
                Some(item) => Err(ServiceError::InsufficientQuantity(format!(
                    "{} of '{}' on hand, cannot remove {}",
                    item.quantity, key.name, delta
                ))),
            };
        }

        info!(name = %key.name, delta, "ledger quantity decremented");
        self.fetch_required(&key).await
    }

    /// Every ledger row, unfiltered.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<ledger_item::Model>, ServiceError> {
        let db = self.db.clone();
        db::run_store_op("ledger.list_all", self.store_timeout, || {
            let db = db.clone();
            async move {
                LedgerItems::find()
                    .order_by_asc(ledger_item::Column::CreatedAt)
                    .all(&*db)
                    .await
            }
        })
        .await
    }

    /// Atomic `quantity = quantity + delta` on the matching row; returns the
    /// number of rows touched.
    async fn increment(&self, key: &LedgerKey, delta: i32) -> Result<u64, ServiceError> {
        let now = Utc::now().naive_utc();
        let db = self.db.clone();
        let condition = key.filter();
        let result = db::run_store_op("ledger.increment", self.store_timeout, || {
            let db = db.clone();
            let condition = condition.clone();
            async move {
                LedgerItems::update_many()
                    .col_expr(
                        ledger_item::Column::Quantity,
                        Expr::col(ledger_item::Column::Quantity).add(delta),
                    )
                    .col_expr(ledger_item::Column::UpdatedAt, Expr::value(now))
                    .filter(condition)
                    .exec(&*db)
                    .await
            }
        })
        .await?;
        Ok(result.rows_affected)
    }

    async fn fetch(&self, key: &LedgerKey) -> Result<Option<ledger_item::Model>, ServiceError> {
        let db = self.db.clone();
        let condition = key.filter();
        db::run_store_op("ledger.fetch", self.store_timeout, || {
            let db = db.clone();
            let condition = condition.clone();
            async move { LedgerItems::find().filter(condition).one(&*db).await }
        })
        .await
    }

    async fn fetch_required(&self, key: &LedgerKey) -> Result<ledger_item::Model, ServiceError> {
        self.fetch(key).await?.ok_or_else(|| {
            ServiceError::InternalError(format!("ledger row for '{}' disappeared", key.name))
        })
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
