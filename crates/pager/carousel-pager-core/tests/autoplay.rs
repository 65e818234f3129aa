use carousel_pager_core::{
    AutoplayConfig, ChangeSource, ControlHandles, Direction, IndicatorConfig, NoIndicators,
    Orientation, Pager, PagerEvent,
};
use carousel_test_fixtures::{
    fitting_geometry, overflowing_geometry, IndicatorCounts, IndicatorLog, RecordingIndicators,
    RecordingStrategy, StrategyLog,
};

fn init_tracing() {
    let default_filter = "carousel_pager_core=debug";
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn every(interval_ms: u32) -> AutoplayConfig {
    AutoplayConfig {
        interval_ms,
        indicator: None,
    }
}

fn autoplaying(loops: bool, length: usize, cfg: AutoplayConfig) -> Pager {
    let mut p = Pager::create(0, length, loops, ControlHandles::default(), None, -1);
    assert!(p.init_autopager(cfg, Orientation::Horizontal, &overflowing_geometry(), &NoIndicators));
    p
}

fn step(p: &mut Pager, strategy: &mut RecordingStrategy, dt_ms: u64) -> Vec<PagerEvent> {
    let mut events = Vec::new();
    p.advance_autopager(dt_ms, strategy, &mut || true, &mut events);
    events
}

fn autoplay_change(old: usize, new: usize) -> PagerEvent {
    PagerEvent::PageChanged {
        old,
        new,
        direction: Direction::Forward,
        source: ChangeSource::Autoplay,
    }
}

#[test]
fn autoplay_is_not_armed_when_the_list_fits() {
    let mut p = Pager::create(0, 5, true, ControlHandles::default(), None, -1);
    let armed = p.init_autopager(every(1000), Orientation::Horizontal, &fitting_geometry(), &NoIndicators);
    assert!(!armed);
    assert!(!p.autoplay_running());
    assert_eq!(p.reset_autopager(), None);
}

#[test]
fn autoplay_follows_the_paging_axis() {
    let mut p = Pager::create(0, 5, true, ControlHandles::default(), None, -1);
    let armed = p.init_autopager(every(1000), Orientation::Vertical, &overflowing_geometry(), &NoIndicators);
    assert!(!armed);
}

#[test]
fn autoplay_advances_once_per_interval() {
    init_tracing();
    let log = StrategyLog::new();
    let mut strategy = RecordingStrategy::new(&log);
    let mut p = autoplaying(true, 5, every(1000));

    assert!(step(&mut p, &mut strategy, 999).is_empty());
    assert_eq!(step(&mut p, &mut strategy, 1), vec![autoplay_change(0, 1)]);
    assert_eq!(log.transitions(), vec![(0, 1, Direction::Forward)]);
    assert_eq!(p.index(), 1);
}

#[test]
fn reset_measures_from_the_reset_call() {
    init_tracing();
    let log = StrategyLog::new();
    let mut strategy = RecordingStrategy::new(&log);
    let mut p = autoplaying(true, 5, every(1000));

    assert!(step(&mut p, &mut strategy, 600).is_empty());
    let before = p.autopager().and_then(|a| a.timer_id());
    let after = p.reset_autopager();
    assert!(after.is_some());
    assert_ne!(before, after);

    assert!(step(&mut p, &mut strategy, 600).is_empty());
    assert!(step(&mut p, &mut strategy, 399).is_empty());
    assert_eq!(step(&mut p, &mut strategy, 1), vec![autoplay_change(0, 1)]);
    assert!(step(&mut p, &mut strategy, 999).is_empty());
}

#[test]
fn blocked_tick_is_dropped_without_moving() {
    let log = StrategyLog::new();
    let mut strategy = RecordingStrategy::new(&log);
    let mut p = autoplaying(true, 5, every(1000));

    let mut events = Vec::new();
    p.advance_autopager(1000, &mut strategy, &mut || false, &mut events);
    assert_eq!(events, vec![PagerEvent::AutoplayTickSkipped]);
    assert_eq!(p.index(), 0);
    assert!(log.transitions().is_empty());

    assert_eq!(step(&mut p, &mut strategy, 1000), vec![autoplay_change(0, 1)]);
}

#[test]
fn clamped_autoplay_stops_at_the_last_page() {
    init_tracing();
    let log = StrategyLog::new();
    let mut strategy = RecordingStrategy::new(&log);
    let mut p = autoplaying(false, 3, every(1000));

    assert_eq!(step(&mut p, &mut strategy, 1000), vec![autoplay_change(0, 1)]);
    assert_eq!(
        step(&mut p, &mut strategy, 1000),
        vec![autoplay_change(1, 2), PagerEvent::AutoplayStopped { index: 2 }]
    );
    assert!(!p.autoplay_running());
    assert_eq!(p.autoplay_due_in_ms(), None);
    assert!(step(&mut p, &mut strategy, 10_000).is_empty());
    assert_eq!(p.index(), 2);
}

#[test]
fn long_gap_delivers_each_tick_in_order() {
    let log = StrategyLog::new();
    let mut strategy = RecordingStrategy::new(&log);
    let mut p = autoplaying(true, 4, every(1000));

    let events = step(&mut p, &mut strategy, 3500);
    assert_eq!(
        events,
        vec![
            autoplay_change(0, 1),
            autoplay_change(1, 2),
            autoplay_change(2, 3)
        ]
    );
    assert_eq!(p.autoplay_due_in_ms(), Some(500));
    assert_eq!(step(&mut p, &mut strategy, 500), vec![autoplay_change(3, 0)]);
}

#[test]
fn indicator_is_created_once_and_restarted_per_cycle() {
    let ind_log = IndicatorLog::default();
    let factory = RecordingIndicators::new(&["ring"], &ind_log);
    let cfg = AutoplayConfig {
        interval_ms: 1000,
        indicator: Some(IndicatorConfig {
            kind: "ring".into(),
            options: serde_json::Value::Null,
        }),
    };
    let mut p = Pager::create(0, 5, true, ControlHandles::default(), None, -1);
    assert!(p.init_autopager(cfg, Orientation::Horizontal, &overflowing_geometry(), &factory));
    assert_eq!(
        ind_log.counts(),
        IndicatorCounts {
            created: 1,
            inits: 1,
            starts: 1
        }
    );

    let log = StrategyLog::new();
    let mut strategy = RecordingStrategy::new(&log);
    step(&mut p, &mut strategy, 1000);
    assert_eq!(ind_log.counts().starts, 2);

    p.reset_autopager();
    let counts = ind_log.counts();
    assert_eq!(counts.starts, 3);
    assert_eq!(counts.created, 1);
    assert_eq!(counts.inits, 1);
}

#[test]
fn unsupported_indicator_degrades_to_plain_autoplay() {
    init_tracing();
    let ind_log = IndicatorLog::default();
    let factory = RecordingIndicators::new(&["ring"], &ind_log);
    let cfg = AutoplayConfig {
        interval_ms: 200,
        indicator: Some(IndicatorConfig {
            kind: "canvas-pie".into(),
            options: serde_json::Value::Null,
        }),
    };
    let mut p = Pager::create(0, 5, true, ControlHandles::default(), None, -1);
    assert!(p.init_autopager(cfg, Orientation::Horizontal, &overflowing_geometry(), &factory));

    let autopager = p.autopager().unwrap();
    assert!(!autopager.has_indicator());
    assert!(autopager.config().indicator.is_none());
    assert_eq!(ind_log.counts(), IndicatorCounts::default());

    let log = StrategyLog::new();
    let mut strategy = RecordingStrategy::new(&log);
    assert_eq!(step(&mut p, &mut strategy, 200), vec![autoplay_change(0, 1)]);
}

#[test]
fn destroy_clears_the_timer() {
    let log = StrategyLog::new();
    let mut strategy = RecordingStrategy::new(&log);
    let mut p = autoplaying(true, 5, every(1000));

    p.destroy();
    assert!(!p.autoplay_running());
    assert_eq!(p.reset_autopager(), None);
    assert!(step(&mut p, &mut strategy, 5000).is_empty());
    assert_eq!(p.index(), 0);
}

#[test]
fn reinit_replaces_the_previous_timer() {
    let log = StrategyLog::new();
    let mut strategy = RecordingStrategy::new(&log);
    let mut p = autoplaying(true, 5, every(1000));
    let first = p.autopager().and_then(|a| a.timer_id());
    step(&mut p, &mut strategy, 700);

    assert!(p.init_autopager(every(400), Orientation::Horizontal, &overflowing_geometry(), &NoIndicators));
    let second = p.autopager().and_then(|a| a.timer_id());
    assert!(first.is_some() && second.is_some());
    assert_ne!(first, second);
    assert!(step(&mut p, &mut strategy, 300).is_empty());
    assert_eq!(step(&mut p, &mut strategy, 100), vec![autoplay_change(0, 1)]);
}

fn with_indicator(kind: &str) -> AutoplayConfig {
    AutoplayConfig {
        interval_ms: 1000,
        indicator: Some(IndicatorConfig {
            kind: kind.into(),
            options: serde_json::Value::Null,
        }),
    }
}

#[test]
fn reinit_keeps_an_indicator_of_the_same_kind() {
    let ind_log = IndicatorLog::default();
    let factory = RecordingIndicators::new(&["ring", "bar"], &ind_log);
    let mut p = Pager::create(0, 5, true, ControlHandles::default(), None, -1);
    let geometry = overflowing_geometry();

    assert!(p.init_autopager(with_indicator("ring"), Orientation::Horizontal, &geometry, &factory));
    assert!(p.init_autopager(with_indicator("ring"), Orientation::Horizontal, &geometry, &factory));
    assert_eq!(
        ind_log.counts(),
        IndicatorCounts {
            created: 1,
            inits: 1,
            starts: 2
        }
    );

    assert!(p.init_autopager(with_indicator("bar"), Orientation::Horizontal, &geometry, &factory));
    let counts = ind_log.counts();
    assert_eq!(counts.created, 2);
    assert_eq!(counts.inits, 2);
    assert!(p.autopager().unwrap().has_indicator());
}

#[test]
fn reinit_on_a_fitting_list_disarms_autoplay() {
    let mut p = autoplaying(true, 5, every(1000));
    assert!(!p.init_autopager(every(1000), Orientation::Horizontal, &fitting_geometry(), &NoIndicators));
    assert!(!p.autoplay_running());
    assert_eq!(p.reset_autopager(), None);
}
