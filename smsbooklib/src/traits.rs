//! Швы между ядром и внешними участниками: источник, классификатор, фильтр дублей.

use crate::{
    error::Result,
    model::{EnrichedRecord, RawRecord},
};
use std::collections::HashSet;

/// Набор адресов отправителей, которые считаются банковскими.
/// Пустой набор пропускает всех.
#[derive(Debug, Clone, Default)]
pub struct SenderFilter {
    senders: HashSet<String>,
}

impl SenderFilter {
    pub fn new<I, S>(senders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            senders: senders
                .into_iter()
                .map(|s| s.as_ref().trim().to_ascii_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn accepts(&self, sender: &str) -> bool {
        self.senders.is_empty() || self.senders.contains(&sender.trim().to_ascii_lowercase())
    }
}

pub trait MessageSource {
    /// Полный упорядоченный набор сообщений от распознанных отправителей.
    fn query(&self, filter: &SenderFilter) -> Result<Vec<RawRecord>>;
}

pub trait Classifier {
    /// Тотальная функция: нераспознанное сообщение даёт `Unknown`, а не ошибку.
    fn classify(&self, raw: &RawRecord) -> EnrichedRecord;
}

/// Предикаты видят записи одного прохода ингеста по порядку и могут копить состояние.
pub trait DuplicateFilter {
    fn reset(&mut self);
    fn is_duplicate(&mut self, rec: &EnrichedRecord) -> bool;
    fn is_redundant(&mut self, rec: &EnrichedRecord) -> bool;
}

impl<T: MessageSource + ?Sized> MessageSource for &T {
    fn query(&self, filter: &SenderFilter) -> Result<Vec<RawRecord>> {
        (**self).query(filter)
    }
}

impl<T: MessageSource + ?Sized> MessageSource for Box<T> {
    fn query(&self, filter: &SenderFilter) -> Result<Vec<RawRecord>> {
        (**self).query(filter)
    }
}
