pub mod ledger_item;
pub mod personnel_record;
pub mod stock_item;
