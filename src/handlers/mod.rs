pub mod health;
pub mod ledger;
pub mod personnel;
pub mod stock;

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::services::{ledger::LedgerService, personnel::PersonnelService, stock::StockService};

/// Aggregated services shared by the HTTP handlers. The store handle is
/// passed in explicitly; nothing holds an ambient global connection.
#[derive(Clone)]
pub struct AppServices {
    pub personnel: PersonnelService,
    pub stock: StockService,
    pub ledger: LedgerService,
}

impl AppServices {
    pub fn new(db: Arc<DatabaseConnection>, store_timeout: Duration) -> Self {
        Self {
            personnel: PersonnelService::new(db.clone(), store_timeout),
            stock: StockService::new(db.clone(), store_timeout),
            ledger: LedgerService::new(db, store_timeout),
        }
    }
}

/// Parses a form-supplied count. Forms deliver text; a bad number is a
/// validation failure, not a deserialization failure.
pub(crate) fn parse_quantity(raw: &str) -> Result<i32, ServiceError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ServiceError::ValidationError(format!("'{}' is not a whole number", raw.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_parsing() {
        assert_eq!(parse_quantity("3").unwrap(), 3);
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
        assert!(parse_quantity("two").is_err());
        assert!(parse_quantity("").is_err());
    }
}
