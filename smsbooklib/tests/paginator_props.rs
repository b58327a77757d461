use smsbooklib::paginator::{PagerConfig, Paginator};

fn configs() -> Vec<PagerConfig> {
    vec![
        PagerConfig::new(50, 2).unwrap(),
        PagerConfig::new(10, 3).unwrap(),
        PagerConfig::new(7, 1).unwrap(),
        PagerConfig::new(1, 4).unwrap(),
    ]
}

/// Детерминированная «случайная» последовательность шагов (LCG).
fn script(seed: u64, len: usize) -> Vec<bool> {
    let mut x = seed;
    (0..len)
        .map(|_| {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (x >> 33) % 3 != 0 // чаще вперёд, чем назад
        })
        .collect()
}

fn assert_invariants(p: &Paginator) {
    let cfg = p.config();
    assert!(p.from() <= p.to(), "{p:?}");
    assert!(p.to() <= p.total(), "{p:?}");
    assert!(p.to() - p.from() <= cfg.window_capacity(), "{p:?}");
    assert!((1..=cfg.window_size).contains(&p.current_window()), "{p:?}");
    p.check().expect("check");
}

#[test]
fn invariants_hold_for_any_navigation() {
    for cfg in configs() {
        for total in (0..=260).step_by(7).chain([cfg.window_capacity(), cfg.page_size]) {
            for seed in 0..8 {
                let mut p = Paginator::new(cfg, total).unwrap();
                assert_invariants(&p);
                for forward in script(seed, 60) {
                    if forward {
                        p.next();
                    } else {
                        p.previous();
                    }
                    assert_invariants(&p);
                }
            }
        }
    }
}

#[test]
fn blocked_steps_leave_state_unchanged() {
    for cfg in configs() {
        for total in [0usize, 1, 5, 30, 99, 100, 101, 130, 255] {
            let mut p = Paginator::new(cfg, total).unwrap();
            for forward in script(total as u64, 40) {
                if !p.can_go_previous() {
                    let before = p.clone();
                    p.previous();
                    assert_eq!(p, before);
                }
                if !p.can_go_next() {
                    let before = p.clone();
                    p.next();
                    assert_eq!(p, before);
                }
                if forward {
                    p.next();
                } else {
                    p.previous();
                }
            }
        }
    }
}

#[test]
fn walks_to_the_end_and_back_to_start() {
    for cfg in configs() {
        for total in [1usize, 49, 100, 130, 301] {
            let mut p = Paginator::new(cfg, total).unwrap();
            let mut steps = 0;
            while p.can_go_next() {
                p.next();
                steps += 1;
                assert!(steps <= total + 1, "no progress: {p:?}");
            }
            assert_eq!(p.to(), total);

            while p.can_go_previous() {
                p.previous();
            }
            assert_eq!(p.from(), 0);
            assert_eq!(p.to(), total.min(cfg.window_capacity()));
            assert_eq!(p.current_window(), 1);
        }
    }
}

#[test]
fn next_then_previous_round_trips_on_full_pages() {
    // 300 = 6 полных страниц: хвост не укорачивается, путь симметричен
    let cfg = PagerConfig::new(50, 2).unwrap();
    let mut p = Paginator::new(cfg, 300).unwrap();
    p.next();
    p.next();
    let before = (p.from(), p.to());
    for k in 1..=3 {
        for _ in 0..k {
            p.next();
        }
        for _ in 0..k {
            p.previous();
        }
        assert_eq!((p.from(), p.to()), before, "k = {k}");
    }
}

#[test]
fn tail_page_breaks_round_trip_symmetry() {
    // 160 записей: последний шаг вперёд сдвигает окно только на 10,
    // а шаг назад на полную страницу, поэтому возврат не совпадает
    let cfg = PagerConfig::new(50, 2).unwrap();
    let mut p = Paginator::new(cfg, 160).unwrap();
    p.next();
    p.next();
    assert_eq!((p.current_window(), p.from(), p.to()), (2, 50, 150));

    p.next();
    assert_eq!((p.current_window(), p.from(), p.to()), (2, 60, 160));
    assert!(!p.can_go_next());

    p.previous();
    assert_eq!((p.current_window(), p.from(), p.to()), (1, 10, 110));
    assert_ne!((p.from(), p.to()), (50, 150));
}
