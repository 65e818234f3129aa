use carousel_pager_core::{ControlHandles, Pager, PagerConfig, StatusText};
use carousel_test_fixtures::{configs, ControlLog};

fn bare(loops: bool, length: usize) -> Pager {
    Pager::create(0, length, loops, ControlHandles::default(), None, -1)
}

fn page_of() -> StatusText {
    StatusText {
        prepend: "page ".into(),
        separation: " of ".into(),
        append: String::new(),
    }
}

#[test]
fn looping_move_of_any_delta_lands_in_range() {
    for length in 1..=7usize {
        let len = length as i64;
        let mut p = bare(true, length);
        for delta in -50i64..=50 {
            let start = p.index() as i64;
            let got = p.move_by(delta);
            assert!(got < length, "len={length} delta={delta} got={got}");
            assert_eq!(got as i64, ((start + delta) % len + len) % len);
            assert_eq!(p.index(), got);
        }
    }
}

#[test]
fn looping_wraps_at_both_ends() {
    let mut p = bare(true, 10);
    p.set_index(9);
    assert_eq!(p.move_by(1), 0);
    p.set_index(0);
    assert_eq!(p.move_by(-1), 9);
}

#[test]
fn clamping_holds_at_both_ends() {
    let mut p = bare(false, 10);
    p.set_index(9);
    assert_eq!(p.move_by(1), 9);
    p.set_index(0);
    assert_eq!(p.move_by(-1), 0);
    assert_eq!(p.move_by(-40), 0);
    assert_eq!(p.move_by(40), 9);
}

#[test]
fn set_index_twice_repeats_the_same_control_output() {
    let log = ControlLog::new();
    let mut p = Pager::create(0, 10, true, log.handles(10), Some(page_of()), 2);

    p.set_index(4);
    let state = p.control_state().clone();
    log.clear();

    assert_eq!(p.set_index(4), 4);
    let first = log.calls();
    log.clear();
    assert_eq!(p.set_index(4), 4);
    let second = log.calls();

    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(&state, p.control_state());
    assert_eq!(p.index(), 4);
}

#[test]
fn status_text_is_one_based() {
    let log = ControlLog::new();
    let mut p = Pager::create(0, 10, true, log.handles(10), Some(page_of()), -1);
    assert_eq!(log.status().as_deref(), Some("page 1 of 10"));

    p.set_index(4);
    assert_eq!(log.status().as_deref(), Some("page 5 of 10"));
    assert_eq!(
        p.control_state().status_text.as_deref(),
        Some("page 5 of 10")
    );
}

#[test]
fn visible_links_follow_the_index() {
    let log = ControlLog::new();
    let mut p = Pager::create(0, 20, true, log.handles(20), None, 2);
    assert_eq!(log.visible_links(), vec![0, 1, 2, 3, 4]);

    p.set_index(19);
    assert_eq!(log.visible_links(), vec![15, 16, 17, 18, 19]);
    assert_eq!(log.active_links(), vec![19]);

    p.set_index(10);
    assert_eq!(log.visible_links(), vec![8, 9, 10, 11, 12]);
    assert_eq!(log.active_links(), vec![10]);
    assert_eq!(p.control_state().visible_links, Some(8..13));
}

#[test]
fn negative_radius_shows_every_link() {
    let log = ControlLog::new();
    let mut p = Pager::create(0, 6, true, log.handles(6), None, -1);
    p.set_index(3);
    assert_eq!(log.visible_links(), (0..6).collect::<Vec<_>>());
    assert_eq!(log.active_links(), vec![3]);
}

#[test]
fn clamped_pager_disables_edge_buttons() {
    let log = ControlLog::new();
    let mut p = Pager::create(0, 5, false, log.handles(5), None, -1);
    assert_eq!(log.previous_enabled(), Some(false));
    assert_eq!(log.next_enabled(), Some(true));

    p.set_index(2);
    assert_eq!(log.previous_enabled(), Some(true));
    assert_eq!(log.next_enabled(), Some(true));

    p.set_index(4);
    assert_eq!(log.previous_enabled(), Some(true));
    assert_eq!(log.next_enabled(), Some(false));
}

#[test]
fn looping_pager_never_disables_buttons() {
    let log = ControlLog::new();
    let mut p = Pager::create(0, 5, true, log.handles(5), None, -1);
    for i in [0, 4, 2] {
        p.set_index(i);
        assert_eq!(log.previous_enabled(), Some(true));
        assert_eq!(log.next_enabled(), Some(true));
    }
}

#[test]
fn walkthrough_loop_then_clamp() {
    let mut p = bare(true, 10);
    assert_eq!(p.set_index(8), 8);
    assert_eq!(p.move_by(1), 9);
    assert_eq!(p.move_by(1), 0);

    let mut p = bare(false, 10);
    assert_eq!(p.set_index(8), 8);
    assert_eq!(p.move_by(1), 9);
    assert_eq!(p.move_by(1), 9);
}

#[test]
fn partial_handles_are_tolerated() {
    let log = ControlLog::new();
    let mut handles = log.handles(3);
    handles.previous = None;
    handles.status = None;
    let mut p = Pager::create(0, 10, false, handles, Some(page_of()), 1);
    p.set_index(7);
    assert_eq!(log.previous_enabled(), None);
    assert_eq!(log.status(), None);
    assert_eq!(log.active_links(), Vec::<usize>::new());
    assert_eq!(p.index(), 7);
}

#[test]
fn loose_config_falls_back_to_defaults() {
    let raw = configs::value("loose-legacy").unwrap();
    let cfg = PagerConfig::from_json_value(&raw);
    assert_eq!(cfg.initial_index, 0);
    assert!(cfg.loops);
    assert_eq!(cfg.visible_link_radius, -1);
    assert_eq!(cfg.length, 7);

    let mut p = Pager::from_config(&cfg, ControlHandles::default());
    assert_eq!(p.len(), 7);
    assert_eq!(p.index(), 0);
    assert_eq!(p.move_by(-1), 6);
}
