mod models;
mod schema;
mod statements;
mod store;

pub use models::*;
pub use schema::WAREHOUSE_VERSIONED_SCHEMAS;
pub use statements::WarehouseStatements;
pub use store::SqliteWarehouse;
