use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::db;
use crate::entities::stock_item::{self, Entity as StockItems};
use crate::errors::ServiceError;
use crate::taxonomy::{self, StockCategory};

/// Unvalidated input for a stock row.
#[derive(Debug, Clone)]
pub struct NewStockItem {
    pub name: String,
    pub quantity: i32,
    pub category: String,
    pub size: String,
}

/// Service for the aggregate per-family stock counts.
#[derive(Clone)]
pub struct StockService {
    db: Arc<DatabaseConnection>,
    store_timeout: Duration,
}

impl StockService {
    pub fn new(db: Arc<DatabaseConnection>, store_timeout: Duration) -> Self {
        Self { db, store_timeout }
    }

    /// Persists a stock row. All fields are required, size included.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewStockItem) -> Result<stock_item::Model, ServiceError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ServiceError::ValidationError(
                "name must not be empty".into(),
            ));
        }
        if input.quantity < 0 {
            return Err(ServiceError::ValidationError(
                "quantity must not be negative".into(),
            ));
        }
        let category = taxonomy::parse_stock_category(&input.category)?;
        let size = taxonomy::parse_size(&input.size)?;

        let now = Utc::now().naive_utc();
        let model = stock_item::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            quantity: Set(input.quantity),
            category: Set(category.to_string()),
            size: Set(size.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let db = self.db.clone();
        let inserted = db::run_store_op("stock.create", self.store_timeout, || {
            let db = db.clone();
            let model = model.clone();
            async move { model.insert(&*db).await }
        })
        .await?;

        info!(id = %inserted.id, category = %inserted.category, "stock item created");
        Ok(inserted)
    }

    /// Overwrites the quantity of an existing row. No floor or ceiling
    /// check; the count is whatever the supply room last counted.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        id: &str,
        quantity: i32,
    ) -> Result<stock_item::Model, ServiceError> {
        if quantity < 0 {
            return Err(ServiceError::ValidationError(
                "quantity must not be negative".into(),
            ));
        }

        let db = self.db.clone();
        let id_owned = id.to_string();
        let existing = db::run_store_op("stock.find", self.store_timeout, || {
            let db = db.clone();
            let id = id_owned.clone();
            async move { StockItems::find_by_id(id).one(&*db).await }
        })
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("no stock item with id {id}")))?;

        let mut model: stock_item::ActiveModel = existing.into();
        model.quantity = Set(quantity);
        model.updated_at = Set(Utc::now().naive_utc());

        let updated = db::run_store_op("stock.update_quantity", self.store_timeout, || {
            let db = db.clone();
            let model = model.clone();
            async move { model.update(&*db).await }
        })
        .await?;

        info!(id = %updated.id, quantity, "stock quantity overwritten");
        Ok(updated)
    }

    /// Hard-deletes a stock row by id.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let db = self.db.clone();
        let id_owned = id.to_string();
        let result = db::run_store_op("stock.delete", self.store_timeout, || {
            let db = db.clone();
            let id = id_owned.clone();
            async move { StockItems::delete_by_id(id).exec(&*db).await }
        })
        .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "no stock item with id {id}"
            )));
        }

        info!(%id, "stock item deleted");
        Ok(())
    }

    /// All rows for one uniform family, in insertion order.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn list_by_category(
        &self,
        category: StockCategory,
    ) -> Result<Vec<stock_item::Model>, ServiceError> {
        let db = self.db.clone();
        db::run_store_op("stock.list_by_category", self.store_timeout, || {
            let db = db.clone();
            async move {
                StockItems::find()
                    .filter(stock_item::Column::Category.eq(category.to_string()))
                    .order_by_asc(stock_item::Column::CreatedAt)
                    .all(&*db)
                    .await
            }
        })
        .await
    }
}
