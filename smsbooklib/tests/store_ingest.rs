use smsbooklib::{
    classify::RuleClassifier,
    dedup::TransactionDedup,
    error::SmsBookError,
    model::{RawRecord, TransactionType},
    paginator::PagerConfig,
    sources::memory::MemoryInbox,
    store::MessageStore,
    traits::{Classifier, SenderFilter},
};

// 2016-03-04T10:00:00Z
const T0: i64 = 1_457_085_600_000;

fn sms(id: i64, body: &str, minute: i64) -> RawRecord {
    RawRecord {
        id,
        sender: "CITIBANK".into(),
        body: body.into(),
        timestamp: T0 + minute * 60_000,
    }
}

fn payment(id: i64, amount: &str, minute: i64) -> RawRecord {
    sms(
        id,
        &format!("A transaction of SGD {amount} was made with your card ending 1234 at COLD STORAGE on 04-MAR-16."),
        minute,
    )
}

fn inbox(n: i64) -> MemoryInbox {
    MemoryInbox::new((0..n).map(|i| payment(i, &format!("{}.00", i + 1), i)).collect())
}

fn store(source: &MemoryInbox) -> MessageStore<&MemoryInbox, RuleClassifier, TransactionDedup> {
    MessageStore::new(
        source,
        RuleClassifier::new(),
        TransactionDedup::new(),
        SenderFilter::default(),
        PagerConfig::default(),
    )
    .expect("store")
}

#[test]
fn nothing_visible_before_ingest() {
    let src = inbox(10);
    let st = store(&src);
    assert!(!st.is_loaded());
    assert_eq!(st.total_count(), 0);
    assert!(st.visible_raw().unwrap().is_empty());
    assert!(!st.can_go_next());
}

#[test]
fn first_next_opens_first_page() {
    let src = inbox(130);
    let mut st = store(&src);
    st.ingest(false).expect("ingest");
    assert_eq!(st.total_count(), 130);
    assert!(st.visible_enriched().unwrap().is_empty());

    st.next();
    let page = st.visible_enriched().unwrap();
    assert_eq!(page.len(), 100);
    assert_eq!(page[0].kind, TransactionType::Payment);

    st.next();
    let raw = st.visible_raw().unwrap();
    assert_eq!(raw.len(), 100);
    assert_eq!(raw[0].id, 30);
    assert_eq!(raw.last().unwrap().id, 129);
    assert!(!st.can_go_next());
}

#[test]
fn ingest_without_force_is_noop() {
    let mut src = inbox(3);
    {
        let mut st = store(&src);
        st.ingest(false).unwrap();
        st.next();
        assert_eq!(st.total_count(), 3);
        st.ingest(false).unwrap();
        // навигация не сброшена
        assert_eq!(st.visible_raw().unwrap().len(), 3);
    }

    src.push(payment(99, "500.00", 99));
    let mut st = store(&src);
    st.ingest(false).unwrap();
    assert_eq!(st.total_count(), 4);
}

#[test]
fn force_reload_rebuilds_and_resets_paging() {
    let src = inbox(5);
    let mut st = store(&src);
    st.ingest(false).unwrap();
    st.next();
    assert_eq!(st.visible_raw().unwrap().len(), 5);

    st.ingest(true).unwrap();
    assert_eq!(st.total_count(), 5);
    assert!(st.visible_raw().unwrap().is_empty());
    assert_eq!(st.paginator().current_window(), 1);

    // после перезагрузки первая страница открывается заново
    st.next();
    assert_eq!(st.visible_raw().unwrap().len(), 5);
}

#[test]
fn unavailable_source_keeps_previous_working_set() {
    let src = inbox(7);
    let mut st = store(&src);
    st.ingest(false).unwrap();
    st.next();

    src.set_unavailable(true);
    let err = st.ingest(true).unwrap_err();
    assert!(matches!(err, SmsBookError::SourceUnavailable(_)));
    assert!(st.is_loaded());
    assert_eq!(st.total_count(), 7);
    assert_eq!(st.visible_enriched().unwrap().len(), 7);
}

#[test]
fn unavailable_source_on_first_load_leaves_store_empty() {
    let src = inbox(7);
    src.set_unavailable(true);
    let mut st = store(&src);
    assert!(st.ingest(false).is_err());
    assert!(!st.is_loaded());
    assert_eq!(st.total_count(), 0);
}

#[test]
fn empty_inbox_degrades_gracefully() {
    let src = MemoryInbox::new(Vec::new());
    let mut st = store(&src);
    st.ingest(false).unwrap();
    assert!(st.is_loaded());
    assert_eq!(st.total_count(), 0);
    assert!(!st.can_go_previous());
    assert!(!st.can_go_next());
    st.next();
    st.previous();
    assert!(st.visible_raw().unwrap().is_empty());
    assert!(st.visible_enriched().unwrap().is_empty());
}

#[test]
fn duplicates_are_dropped_from_both_lists_in_lockstep() {
    let src = MemoryInbox::new(vec![
        payment(1, "12.50", 0),
        // повторная доставка того же уведомления
        payment(2, "12.50", 0),
        sms(3, "Your card payment is being processed.", 1),
        sms(4, "Your OTP is 123456.", 2),
        payment(5, "40.00", 3),
    ]);
    let mut st = store(&src);
    st.ingest(false).unwrap();

    let stats = st.last_stats();
    assert_eq!(stats.queried, 5);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(stats.redundant, 1);
    assert_eq!(stats.kept, 3);
    assert_eq!(st.total_count(), 3);

    let ws = st.working_set().unwrap();
    assert_eq!(ws.raw().len(), ws.enriched().len());
    let ids: Vec<i64> = ws.raw().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 4, 5]);

    // raw[i] породил enriched[i]
    let classifier = RuleClassifier::new();
    for (raw, enriched) in ws.raw().iter().zip(ws.enriched()) {
        assert_eq!(&classifier.classify(raw), enriched);
    }
}

#[test]
fn duplicate_state_does_not_leak_between_reloads() {
    let src = MemoryInbox::new(vec![payment(1, "12.50", 0), payment(2, "99.00", 1)]);
    let mut st = store(&src);
    st.ingest(false).unwrap();
    st.ingest(true).unwrap();
    assert_eq!(st.total_count(), 2);
}

#[test]
fn sender_filter_limits_ingested_messages() {
    let mut records = vec![payment(1, "1.00", 0), payment(2, "2.00", 1)];
    records.push(RawRecord {
        id: 3,
        sender: "+6591234567".into(),
        body: "transfer of SGD 5.00 to you".into(),
        timestamp: T0,
    });
    let src = MemoryInbox::new(records);
    let mut st = MessageStore::new(
        &src,
        RuleClassifier::new(),
        TransactionDedup::new(),
        SenderFilter::new(["citibank"]),
        PagerConfig::new(1, 2).unwrap(),
    )
    .unwrap();
    st.ingest(false).unwrap();
    assert_eq!(st.total_count(), 2);

    st.next();
    assert_eq!(st.visible_raw().unwrap().len(), 2);
}

#[test]
fn distinct_notices_in_the_same_minute_are_kept() {
    let src = MemoryInbox::new(vec![
        sms(1, "Your OTP is 111111. Do not share it.", 0),
        sms(2, "Your card has been locked. Call us to unlock it.", 0),
    ]);
    let mut st = store(&src);
    st.ingest(false).unwrap();

    assert_eq!(st.last_stats().duplicates, 0);
    let ids: Vec<i64> = st.working_set().unwrap().raw().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(st
        .working_set()
        .unwrap()
        .enriched()
        .iter()
        .all(|e| e.kind == TransactionType::Unknown));
}

#[test]
fn same_amount_in_other_currency_is_not_a_duplicate() {
    let body = |ccy: &str| {
        format!("A transaction of {ccy} 12.50 was made with your card ending 1234 at COLD STORAGE on 04-MAR-16.")
    };
    let src = MemoryInbox::new(vec![
        sms(1, &body("SGD"), 0),
        sms(2, &body("USD"), 0),
        // тот же платёж в SGD, доставленный повторно
        sms(3, &body("SGD"), 0),
        // та же сумма, но минутой позже
        sms(4, &body("SGD"), 1),
    ]);
    let mut st = store(&src);
    st.ingest(false).unwrap();

    assert_eq!(st.last_stats().duplicates, 1);
    let ws = st.working_set().unwrap();
    let ids: Vec<i64> = ws.raw().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 4]);
    assert_eq!(ws.enriched()[1].currency, "USD");
}
