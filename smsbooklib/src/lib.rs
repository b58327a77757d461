//! smsbooklib: ингест банковских SMS, классификация транзакций и оконная пагинация

pub mod classify;
pub mod dedup;
pub mod error;
pub mod model;
pub mod month;
pub mod paginator;
pub mod store;
pub mod traits;

pub mod sources {
    pub mod csv;
    pub mod memory;
    pub mod xml;
}
