//! Правила классификации банковских SMS: тип операции, контрагент, сумма, карта.

use crate::{
    model::{EnrichedRecord, RawRecord, TransactionType},
    traits::Classifier,
};
use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;

pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y %H:%M";

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?P<ccy>[A-Za-z]{3})\s?(?P<amt>\d[\d,]*(?:\.\d{1,2})?)\b")
            .expect("invalid amount regex")
    })
}

fn card_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)card\s+(?:no\.?\s+)?ending\s+(?:in\s+|with\s+)?(?P<card>\d{4})")
            .expect("invalid card regex")
    })
}

fn originator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\s(?:at|to|from)\s+(?P<who>.+?)(?:\s+on\s|\s+\d{1,2}[-/ ]\w{3}|\s*[.;,]\s|\s*[.;]?$)",
        )
        .expect("invalid originator regex")
    })
}

/// Коды, которые принимаются и в нижнем регистре ("sgd 12.50").
/// Код из заглавных букв принимается любой.
const KNOWN_CURRENCIES: &[&str] = &[
    "SGD", "USD", "EUR", "GBP", "MYR", "AUD", "HKD", "JPY", "CNY", "IDR", "THB", "INR", "PHP",
];

/// Ключевые слова проверяются по порядку: первое совпадение определяет тип.
const KIND_KEYWORDS: &[(TransactionType, &[&str])] = &[
    (TransactionType::Giro, &["giro"]),
    (TransactionType::Withdrawal, &["withdraw", "atm"]),
    (TransactionType::Transfer, &["transfer", "fast", "paynow"]),
    (
        TransactionType::Payment,
        &["transaction", "payment", "spent", "charged", "purchase"],
    ),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct RuleClassifier;

impl RuleClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for RuleClassifier {
    fn classify(&self, raw: &RawRecord) -> EnrichedRecord {
        let kind = detect_kind(&raw.body);
        let (currency, amount) = match extract_amount(&raw.body) {
            Some((ccy, amt)) => (ccy, Some(amt)),
            None => (String::new(), None),
        };
        let card_info = card_re()
            .captures(&raw.body)
            .and_then(|c| c.name("card"))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let originator = extract_originator(&raw.body).unwrap_or_else(|| raw.sender.clone());

        EnrichedRecord {
            kind,
            originator,
            amount,
            currency,
            card_info,
            display_date: display_date(raw.timestamp),
        }
    }
}

fn detect_kind(body: &str) -> TransactionType {
    let lower = body.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    for (kind, keys) in KIND_KEYWORDS {
        // префиксное совпадение: "withdrawal" ловится по "withdraw"
        if words.iter().any(|w| keys.iter().any(|k| w.starts_with(k))) {
            return *kind;
        }
    }
    TransactionType::Unknown
}

fn extract_amount(body: &str) -> Option<(String, Decimal)> {
    for caps in amount_re().captures_iter(body) {
        let (Some(ccy), Some(amt)) = (caps.name("ccy"), caps.name("amt")) else {
            continue;
        };
        let code = ccy.as_str().to_ascii_uppercase();
        // "ATM 0042": номер банкомата, а не сумма
        if code == "ATM" {
            continue;
        }
        // "for 2", "has 3": обычные слова перед числом
        let upper = ccy.as_str().chars().all(|c| c.is_ascii_uppercase());
        if !upper && !KNOWN_CURRENCIES.contains(&code.as_str()) {
            continue;
        }
        if let Ok(v) = amt.as_str().replace(',', "").parse::<Decimal>() {
            return Some((code, v));
        }
    }
    None
}

fn extract_originator(body: &str) -> Option<String> {
    let who = originator_re().captures(body)?.name("who")?.as_str().trim();
    // "from your account at ATM 0042": свой счёт пропускаем, контрагент после " at ";
    // иначе контрагент заканчивается на следующем " at "
    let lower = who.to_ascii_lowercase();
    let who = match lower.find(" at ") {
        Some(i) if lower.starts_with("your ") => &who[i + 4..],
        Some(i) => &who[..i],
        None => who,
    };
    Some(who.trim().to_string()).filter(|s| !s.is_empty())
}

fn display_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_default()
}
