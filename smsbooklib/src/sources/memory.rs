//! Источник в памяти: для тестов и встраивания.

use crate::{
    error::{Result, SmsBookError},
    model::RawRecord,
    traits::{MessageSource, SenderFilter},
};
use std::cell::Cell;

#[derive(Debug, Default)]
pub struct MemoryInbox {
    records: Vec<RawRecord>,
    unavailable: Cell<bool>,
}

impl MemoryInbox {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            unavailable: Cell::new(false),
        }
    }

    /// Имитирует отказ хранилища (например, отозванное разрешение на чтение SMS).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    pub fn push(&mut self, rec: RawRecord) {
        self.records.push(rec);
    }
}

impl MessageSource for MemoryInbox {
    fn query(&self, filter: &SenderFilter) -> Result<Vec<RawRecord>> {
        if self.unavailable.get() {
            return Err(SmsBookError::SourceUnavailable("inbox is not readable".into()));
        }
        Ok(self
            .records
            .iter()
            .filter(|r| filter.accepts(&r.sender))
            .cloned()
            .collect())
    }
}
