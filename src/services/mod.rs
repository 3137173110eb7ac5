pub mod ledger;
pub mod personnel;
pub mod stock;
