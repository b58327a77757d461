//! Отсев повторных и «пустых» уведомлений в пределах одного прохода ингеста.

use crate::{
    model::{EnrichedRecord, TransactionType},
    traits::DuplicateFilter,
};
use rust_decimal::Decimal;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct TxKey {
    kind: TransactionType,
    originator: String,
    amount: Decimal,
    currency: String,
    card_info: String,
    display_date: String,
}

impl TxKey {
    /// Без суммы ключа нет: такие записи дублями не считаются.
    fn of(r: &EnrichedRecord) -> Option<Self> {
        let amount = r.amount?;
        Some(Self {
            kind: r.kind,
            originator: r.originator.to_lowercase(),
            // 12.5 и 12.50: одна и та же сумма
            amount: amount.normalize(),
            currency: r.currency.to_ascii_uppercase(),
            card_info: r.card_info.clone(),
            display_date: r.display_date.clone(),
        })
    }
}

/// Банк нередко шлёт одно и то же уведомление дважды (повторная доставка,
/// авторизация + списание с той же минутой). Дубль: та же сумма в той же валюте,
/// тот же контрагент, карта и минута.
#[derive(Debug, Default)]
pub struct TransactionDedup {
    seen: HashSet<TxKey>,
}

impl TransactionDedup {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DuplicateFilter for TransactionDedup {
    fn reset(&mut self) {
        self.seen.clear();
    }

    fn is_duplicate(&mut self, rec: &EnrichedRecord) -> bool {
        match TxKey::of(rec) {
            // insert == false: ключ уже встречался в этом проходе
            Some(key) => !self.seen.insert(key),
            None => false,
        }
    }

    /// Транзакционный тип без суммы: уведомление ничего не сообщает об операции.
    fn is_redundant(&mut self, rec: &EnrichedRecord) -> bool {
        rec.kind != TransactionType::Unknown && rec.amount.is_none()
    }
}
