//! Оконная пагинация поверх рабочего набора.
//!
//! Видимый диапазон `[from, to)` вмещает не более одного «окна»
//! (`page_size * window_size` записей) и сдвигается на `page_size` за шаг.
//! `current_window` хранит номер слота страницы внутри окна, `1..=window_size`.
//! До первого `next()` диапазон пуст (состояние «ещё не листали»).

use crate::error::{Result, SmsBookError};
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const DEFAULT_WINDOW_SIZE: usize = 2;

/// Размеры страницы и окна. `Paginator::new` повторно вызывает `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerConfig {
    pub page_size: usize,
    pub window_size: usize,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl PagerConfig {
    pub fn new(page_size: usize, window_size: usize) -> Result<Self> {
        let cfg = Self {
            page_size,
            window_size,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(SmsBookError::InvalidConfig("page_size must be positive".into()));
        }
        if self.window_size == 0 {
            return Err(SmsBookError::InvalidConfig("window_size must be positive".into()));
        }
        if self.page_size.checked_mul(self.window_size).is_none() {
            return Err(SmsBookError::InvalidConfig(format!(
                "window capacity overflows: {} * {}",
                self.page_size, self.window_size
            )));
        }
        Ok(())
    }

    pub fn window_capacity(&self) -> usize {
        self.page_size * self.window_size
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    config: PagerConfig,
    current_window: usize,
    from: usize,
    to: usize,
    total: usize,
}

impl Paginator {
    pub fn new(config: PagerConfig, total: usize) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            current_window: 1,
            from: 0,
            to: 0,
            total,
        })
    }

    pub fn config(&self) -> PagerConfig {
        self.config
    }

    pub fn current_window(&self) -> usize {
        self.current_window
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.from..self.to
    }

    pub fn can_go_previous(&self) -> bool {
        let cap = self.config.window_capacity();
        !(self.current_window == 1 && (self.from == 0 || self.to <= cap))
    }

    /// Состояние до первого `next()`: диапазон пуст, страница ещё не открыта.
    pub fn is_unpaged(&self) -> bool {
        self.current_window == 1 && self.to == 0
    }

    pub fn can_go_next(&self) -> bool {
        if self.is_unpaged() {
            // при window_size == 1 условие последнего слота ниже выполнено
            // уже до открытия первой страницы
            return self.total > 0;
        }
        let cap = self.config.window_capacity();
        let last_slot_exhausted = self.current_window == self.config.window_size
            && (self.to > self.total || self.from >= self.total.saturating_sub(cap));
        // диапазон уже упирается в конец списка: одна страница
        // или первое окно после возврата к началу
        let at_end = self.to >= self.total;
        !(last_slot_exhausted || at_end)
    }

    pub fn previous(&mut self) {
        log::debug!(
            "moving to previous batch: before: window {}, from {}, to {}",
            self.current_window,
            self.from,
            self.to
        );
        if !self.can_go_previous() {
            return;
        }

        let page = self.config.page_size;
        let cap = self.config.window_capacity();

        if self.current_window > 1 {
            self.current_window -= 1;
        }

        let to = self.to.saturating_sub(page);
        if to <= cap {
            // съехали в первое окно: выравниваемся по началу списка
            self.current_window = 1;
            self.to = self.total.min(cap);
            self.from = 0;
        } else {
            self.to = to;
            self.from = match self.from.checked_sub(page) {
                Some(from) => from,
                None => {
                    log::warn!(
                        "previous batch clamped from {} to 0 (to {}, total {})",
                        self.from,
                        self.to,
                        self.total
                    );
                    0
                }
            };
        }

        self.enforce_invariants();
        log::debug!(
            "moving to previous batch: after: window {}, from {}, to {}",
            self.current_window,
            self.from,
            self.to
        );
    }

    pub fn next(&mut self) {
        log::debug!(
            "moving to next batch: before: window {}, from {}, to {}",
            self.current_window,
            self.from,
            self.to
        );
        if !self.can_go_next() {
            return;
        }

        let page = self.config.page_size;
        let cap = self.config.window_capacity();

        if self.is_unpaged() {
            self.to = self.total.min(cap);
        } else if self.to + page > self.total {
            // хвостовая страница: может быть короче page_size
            if self.to < self.total {
                let delta = self.total - self.to;
                self.to = self.total;
                self.from += delta;
                self.current_window = self.config.window_size;
            }
        } else {
            self.current_window = (self.current_window + 1).min(self.config.window_size);
            self.from += page;
            self.to = (self.to + page).min(self.total);
        }

        self.enforce_invariants();
        log::debug!(
            "moving to next batch: after: window {}, from {}, to {}",
            self.current_window,
            self.from,
            self.to
        );
    }

    /// Проверка инвариантов; ошибка означает дефект логики переходов.
    pub fn check(&self) -> Result<()> {
        let ok = self.from <= self.to
            && self.to <= self.total
            && self.to - self.from <= self.config.window_capacity()
            && (1..=self.config.window_size).contains(&self.current_window);
        if ok {
            Ok(())
        } else {
            Err(SmsBookError::InvariantViolation {
                window: self.current_window,
                from: self.from,
                to: self.to,
                total: self.total,
            })
        }
    }

    /// В debug-сборке нарушение инварианта вызывает панику, в release границы зажимаются.
    fn enforce_invariants(&mut self) {
        let res = self.check();
        debug_assert!(res.is_ok(), "{res:?}");
        if let Err(e) = res {
            log::warn!("{e}; clamping");
            self.to = self.to.min(self.total);
            self.from = self.from.min(self.to);
            self.current_window = self.current_window.clamp(1, self.config.window_size);
        }
    }
}
