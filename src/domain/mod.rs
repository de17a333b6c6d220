pub mod ledger;
pub mod matcher;
pub mod ports;
pub mod transaction;
