use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::db;
use crate::entities::personnel_record::{self, Entity as PersonnelRecords};
use crate::errors::ServiceError;
use crate::taxonomy::{self, Category, CategoryGroup, Size};

/// Unvalidated input for a personnel issue record, as received from a form.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub name: String,
    pub quantity: i32,
    pub category: String,
    pub size: Option<String>,
    pub ranks: Option<String>,
    pub ribbons: Option<i32>,
}

/// A `NewRecord` that passed the category-group validation rules.
#[derive(Debug, Clone)]
struct ValidatedRecord {
    name: String,
    quantity: i32,
    category: Category,
    size: Option<Size>,
    ranks: Option<String>,
    ribbons: Option<i32>,
}

/// Service for the per-person issued-item ledger.
#[derive(Clone)]
pub struct PersonnelService {
    db: Arc<DatabaseConnection>,
    store_timeout: Duration,
}

impl PersonnelService {
    pub fn new(db: Arc<DatabaseConnection>, store_timeout: Duration) -> Self {
        Self { db, store_timeout }
    }

    /// Validates and persists a new issue record scoped to `group`. Nothing
    /// is written when validation fails.
    #[instrument(skip(self, input), fields(group = %group))]
    pub async fn create(
        &self,
        group: CategoryGroup,
        input: NewRecord,
    ) -> Result<personnel_record::Model, ServiceError> {
        let record = validate(group, input)?;

        let now = Utc::now().naive_utc();
        let model = personnel_record::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(record.name),
            quantity: Set(record.quantity),
            category: Set(record.category.to_string()),
            size: Set(record.size.map(|s| s.to_string())),
            ranks: Set(record.ranks),
            ribbons: Set(record.ribbons),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let db = self.db.clone();
        let inserted = db::run_store_op("personnel.create", self.store_timeout, || {
            let db = db.clone();
            let model = model.clone();
            async move { model.insert(&*db).await }
        })
        .await?;

        info!(id = %inserted.id, category = %inserted.category, "personnel record created");
        Ok(inserted)
    }

    /// All records whose category belongs to the group, in insertion order.
    #[instrument(skip(self), fields(group = %group))]
    pub async fn list_group(
        &self,
        group: CategoryGroup,
    ) -> Result<Vec<personnel_record::Model>, ServiceError> {
        let members = group.member_names();
        let db = self.db.clone();
        db::run_store_op("personnel.list_group", self.store_timeout, || {
            let db = db.clone();
            let members = members.clone();
            async move {
                PersonnelRecords::find()
                    .filter(personnel_record::Column::Category.is_in(members))
                    .order_by_asc(personnel_record::Column::CreatedAt)
                    .all(&*db)
                    .await
            }
        })
        .await
    }

    /// Hard-deletes a record by id; absent ids are reported, not ignored.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let db = self.db.clone();
        let id_owned = id.to_string();
        let result = db::run_store_op("personnel.delete", self.store_timeout, || {
            let db = db.clone();
            let id = id_owned.clone();
            async move { PersonnelRecords::delete_by_id(id).exec(&*db).await }
        })
        .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "no personnel record with id {id}"
            )));
        }

        info!(%id, "personnel record deleted");
        Ok(())
    }

    /// Case-insensitive substring match on `name`.
    #[instrument(skip(self))]
    pub async fn search(&self, name: &str) -> Result<Vec<personnel_record::Model>, ServiceError> {
        let needle = format!("%{}%", name.trim().to_lowercase());
        let db = self.db.clone();
        db::run_store_op("personnel.search", self.store_timeout, || {
            let db = db.clone();
            let needle = needle.clone();
            async move {
                PersonnelRecords::find()
                    .filter(
                        Expr::expr(Func::lower(Expr::col(personnel_record::Column::Name)))
                            .like(needle),
                    )
                    .order_by_asc(personnel_record::Column::CreatedAt)
                    .all(&*db)
                    .await
            }
        })
        .await
    }
}

fn validate(group: CategoryGroup, input: NewRecord) -> Result<ValidatedRecord, ServiceError> {
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

    let category = taxonomy::parse_category(&input.category)?;
    if category.group() != group {
        return Err(ServiceError::ValidationError(format!(
            "category '{category}' is not accepted by the {group} endpoint"
        )));
    }

    let ranks = input
        .ranks
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());
    if group.requires_ranks() && ranks.is_none() {
        return Err(ServiceError::ValidationError(format!(
            "ranks is required for {group} records"
        )));
    }

    if group.requires_ribbons() && input.ribbons.is_none() {
        return Err(ServiceError::ValidationError(format!(
            "ribbons is required for {group} records"
        )));
    }
    if input.ribbons.is_some_and(|r| r < 0) {
        return Err(ServiceError::ValidationError(
            "ribbons must not be negative".into(),
        ));
    }

    let size = input
        .size
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(taxonomy::parse_size)
        .transpose()?;

    Ok(ValidatedRecord {
        name: name.to_string(),
        quantity: input.quantity,
        category,
        size,
        ranks,
        ribbons: input.ribbons,
    })
}
