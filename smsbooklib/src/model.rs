//! Доменные модели: сырое SMS и его «обогащённая» транзакционная проекция.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Сообщение в том виде, в каком его отдал источник.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawRecord {
    pub id: i64,
    pub sender: String,
    pub body: String,
    /// Миллисекунды от эпохи (колонка `date` в хранилище SMS).
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Payment,
    Transfer,
    Withdrawal,
    Giro,
    Unknown,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Payment => "PAYMENT",
            TransactionType::Transfer => "TRANSFER",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Giro => "GIRO",
            TransactionType::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Результат классификации одного [`RawRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedRecord {
    pub kind: TransactionType,
    pub originator: String,
    pub amount: Option<Decimal>,
    pub currency: String,
    /// Последние цифры карты; пусто, если в тексте их нет.
    pub card_info: String,
    pub display_date: String,
}

impl EnrichedRecord {
    /// `"SGD 12.50"`, либо пустая строка, если сумма не распознана.
    pub fn formatted_amount(&self) -> String {
        match self.amount {
            Some(a) if self.currency.is_empty() => a.to_string(),
            Some(a) => format!("{} {}", self.currency, a),
            None => String::new(),
        }
    }
}
