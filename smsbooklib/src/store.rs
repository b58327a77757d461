//! Хранилище рабочего набора: ингест (источник → классификатор → фильтр дублей)
//! и оконная пагинация поверх результата.
//!
//! Списки фильтруются «в ногу»: отброшенная фильтром запись исключается
//! и из сырого, и из обогащённого списка, поэтому `raw[i]` всегда породил
//! `enriched[i]`, а `total` одинаков для обоих.
//!
//! Все изменяющие вызовы берут `&mut self`, так что писатель один. Если store
//! нужен из нескольких мест, его целиком заворачивают в один `Mutex`: рабочий
//! набор и состояние пагинации меняются вместе.

use crate::{
    error::Result,
    model::{EnrichedRecord, RawRecord},
    paginator::{PagerConfig, Paginator},
    traits::{Classifier, DuplicateFilter, MessageSource, SenderFilter},
};

/// Два выровненных по индексу списка одного цикла ингеста.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSet {
    raw: Vec<RawRecord>,
    enriched: Vec<EnrichedRecord>,
}

impl WorkingSet {
    pub fn raw(&self) -> &[RawRecord] {
        &self.raw
    }

    pub fn enriched(&self) -> &[EnrichedRecord] {
        &self.enriched
    }

    pub fn len(&self) -> usize {
        self.enriched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enriched.is_empty()
    }

    fn push(&mut self, raw: RawRecord, enriched: EnrichedRecord) {
        self.raw.push(raw);
        self.enriched.push(enriched);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub queried: usize,
    pub duplicates: usize,
    pub redundant: usize,
    pub kept: usize,
}

pub struct MessageStore<S, C, F> {
    source: S,
    classifier: C,
    filter: F,
    senders: SenderFilter,
    config: PagerConfig,
    working: Option<WorkingSet>,
    pager: Paginator,
    stats: IngestStats,
}

impl<S, C, F> MessageStore<S, C, F>
where
    S: MessageSource,
    C: Classifier,
    F: DuplicateFilter,
{
    pub fn new(source: S, classifier: C, filter: F, senders: SenderFilter, config: PagerConfig) -> Result<Self> {
        let pager = Paginator::new(config, 0)?;
        Ok(Self {
            source,
            classifier,
            filter,
            senders,
            config,
            working: None,
            pager,
            stats: IngestStats::default(),
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.working.is_some()
    }

    /// Без `force_reload` повторный вызов после успешной загрузки ничего не делает.
    /// При ошибке источника прежний рабочий набор и пагинация остаются как были.
    pub fn ingest(&mut self, force_reload: bool) -> Result<()> {
        if !force_reload && self.is_loaded() {
            return Ok(());
        }

        let records = self.source.query(&self.senders)?;
        log::debug!("queried message source, found {} messages", records.len());

        let mut stats = IngestStats {
            queried: records.len(),
            ..IngestStats::default()
        };
        let mut set = WorkingSet::default();
        self.filter.reset();

        for raw in records {
            let enriched = self.classifier.classify(&raw);
            if self.filter.is_duplicate(&enriched) {
                stats.duplicates += 1;
                continue;
            }
            if self.filter.is_redundant(&enriched) {
                stats.redundant += 1;
                continue;
            }
            set.push(raw, enriched);
        }
        stats.kept = set.len();

        self.pager = Paginator::new(self.config, set.len())?;
        self.working = Some(set);
        self.stats = stats;

        log::info!(
            "ingested {} messages: kept {}, duplicates {}, redundant {}",
            stats.queried,
            stats.kept,
            stats.duplicates,
            stats.redundant
        );
        Ok(())
    }

    pub fn working_set(&self) -> Option<&WorkingSet> {
        self.working.as_ref()
    }

    pub fn last_stats(&self) -> IngestStats {
        self.stats
    }

    pub fn paginator(&self) -> &Paginator {
        &self.pager
    }

    pub fn total_count(&self) -> usize {
        self.pager.total()
    }

    pub fn can_go_previous(&self) -> bool {
        self.pager.can_go_previous()
    }

    pub fn can_go_next(&self) -> bool {
        self.pager.can_go_next()
    }

    pub fn previous(&mut self) {
        self.pager.previous();
    }

    pub fn next(&mut self) {
        self.pager.next();
    }

    pub fn visible_raw(&self) -> Result<&[RawRecord]> {
        self.pager.check()?;
        let raw = self.working.as_ref().map(|w| w.raw()).unwrap_or(&[]);
        Ok(&raw[self.pager.visible_range()])
    }

    pub fn visible_enriched(&self) -> Result<&[EnrichedRecord]> {
        self.pager.check()?;
        let enriched = self.working.as_ref().map(|w| w.enriched()).unwrap_or(&[]);
        Ok(&enriched[self.pager.visible_range()])
    }
}
