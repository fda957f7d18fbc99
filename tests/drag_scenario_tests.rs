//! End-to-end gesture scenarios driven through the engine surface, the way
//! an embedding UI would: pointer callbacks in, store updates and
//! descriptors out, with a fixed clock standing in for the frame timer.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use wakearc::config::EngineConfig;
use wakearc::drag::{DragMode, Feedback};
use wakearc::engine::ArcEngine;
use wakearc::geometry::mapper::angle_for_time;
use wakearc::render::stack_for_drawing;
use wakearc::schedule::memory::MemoryStore;
use wakearc::schedule::{EntryKind, ScheduleEntry, SleepType};
use wakearc::time::FixedTimeSource;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn dt(h: u32, m: u32) -> NaiveDateTime {
    date().and_hms_opt(h, m, 0).unwrap()
}

fn nap(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> ScheduleEntry {
    ScheduleEntry::interval(
        id,
        EntryKind::Sleep {
            sleep_type: SleepType::Nap,
        },
        start,
        end,
    )
}

fn clock_at(h: u32, m: u32) -> Arc<FixedTimeSource> {
    let instant = Local.from_local_datetime(&dt(h, m)).unwrap();
    Arc::new(FixedTimeSource::new(instant))
}

/// A day with markers at 07:00/19:00 and the given entries
fn day_store(entries: Vec<ScheduleEntry>) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert(
        date(),
        ScheduleEntry::point("wake", EntryKind::WakeMarker, dt(7, 0)),
    );
    store.insert(
        date(),
        ScheduleEntry::point("bed", EntryKind::BedMarker, dt(19, 0)),
    );
    for entry in entries {
        store.insert(date(), entry);
    }
    store
}

fn engine_over(store: MemoryStore, clock: Arc<FixedTimeSource>) -> ArcEngine {
    ArcEngine::new(Box::new(store))
        .with_config(EngineConfig::default())
        .with_time_source(clock)
}

#[test]
fn test_move_a_nap_to_a_later_slot() {
    let clock = clock_at(12, 0);
    let mut engine = engine_over(day_store(vec![nap("nap", dt(9, 0), dt(10, 0))]), clock.clone());
    let bounds = engine.bounds_for(date());

    // Grab the middle of the nap: whole-interval mode
    assert!(engine.pointer_down(date(), "nap", angle_for_time(t(9, 30), &bounds)));
    assert_eq!(
        engine.session().unwrap().mode,
        DragMode::WholeInterval {
            duration_minutes: 60
        }
    );

    // Drag the center to 11:30 and release
    engine.pointer_moved(date(), angle_for_time(t(11, 30), &bounds));
    let updated = engine.pointer_up(date()).unwrap();
    assert_eq!(updated.start, dt(11, 0));
    assert_eq!(updated.end, Some(dt(12, 0)));

    // The confirmation label shows, then the whole cycle clears
    assert!(engine.session().unwrap().confirming);
    clock.advance(Duration::milliseconds(1100));
    engine.tick(date());
    assert!(!engine.session().unwrap().confirming);
    clock.advance(Duration::milliseconds(300));
    engine.tick(date());
    assert!(engine.session().is_none());
}

#[test]
fn test_end_handle_stops_at_bed() {
    let clock = clock_at(18, 30);
    let mut engine = engine_over(day_store(vec![nap("nap", dt(17, 0), dt(18, 0))]), clock);
    let bounds = engine.bounds_for(date());

    assert!(engine.pointer_down(date(), "nap", angle_for_time(t(18, 1), &bounds)));
    assert_eq!(engine.session().unwrap().mode, DragMode::EndPoint);

    // Push well past the end of the arc
    engine.pointer_moved(date(), angle_for_time(t(19, 0), &bounds) + 8.0);
    let updated = engine.pointer_up(date()).unwrap();
    assert_eq!(updated.start, dt(17, 0));
    assert_eq!(updated.end, Some(dt(19, 0)));
}

#[test]
fn test_ongoing_nap_cannot_be_dragged() {
    let mut running = nap("running", dt(11, 0), dt(11, 5));
    running.is_ongoing = true;

    let mut engine = engine_over(day_store(vec![running]), clock_at(11, 30));
    let feedback: Rc<RefCell<Vec<Feedback>>> = Rc::new(RefCell::new(Vec::new()));
    let seen = feedback.clone();
    engine.set_on_feedback(move |f| seen.borrow_mut().push(f));

    let bounds = engine.bounds_for(date());
    assert!(!engine.pointer_down(date(), "running", angle_for_time(t(11, 0), &bounds)));
    assert!(engine.session().is_none());
    assert_eq!(feedback.borrow().as_slice(), [Feedback::Rejected]);
}

#[test]
fn test_locked_day_rejects_every_gesture() {
    let mut store = day_store(vec![nap("nap", dt(9, 0), dt(10, 0))]);
    store.lock_date(date());

    let mut engine = engine_over(store, clock_at(12, 0));
    let bounds = engine.bounds_for(date());
    assert!(!engine.pointer_down(date(), "nap", angle_for_time(t(9, 30), &bounds)));
    assert!(engine.session().is_none());
}

#[test]
fn test_marker_times_reshape_the_arc() {
    // A short 08:00-14:00 day: six waking hours spread over the same sweep
    let mut store = MemoryStore::new();
    store.insert(
        date(),
        ScheduleEntry::point("wake", EntryKind::WakeMarker, dt(8, 0)),
    );
    store.insert(
        date(),
        ScheduleEntry::point("bed", EntryKind::BedMarker, dt(14, 0)),
    );
    let engine = engine_over(store, clock_at(10, 0));

    let bounds = engine.bounds_for(date());
    assert_eq!(bounds.total_waking_minutes(), 6 * 60);
    // Midpoint of the window sits at the midpoint of the sweep
    let midpoint = angle_for_time(t(11, 0), &bounds);
    assert!((midpoint - 270.0).abs() < 1e-9);
}

#[test]
fn test_overlap_gate_blocks_conflicting_nap() {
    let engine = engine_over(
        day_store(vec![nap("existing", dt(9, 10), dt(9, 40))]),
        clock_at(12, 0),
    );

    let conflict = engine.check_nap_overlap(date(), dt(9, 0), dt(9, 20));
    assert_eq!(conflict.map(|n| n.id), Some("existing".to_string()));

    // Back-to-back is allowed
    assert!(engine
        .check_nap_overlap(date(), dt(9, 40), dt(10, 10))
        .is_none());
}

#[test]
fn test_feed_drags_to_a_new_instant() {
    let mut store = day_store(Vec::new());
    store.insert(
        date(),
        ScheduleEntry::point("feed", EntryKind::Feed, dt(8, 0)),
    );

    let mut engine = engine_over(store, clock_at(12, 0));
    let bounds = engine.bounds_for(date());

    assert!(engine.pointer_down(date(), "feed", angle_for_time(t(8, 0), &bounds)));
    engine.pointer_moved(date(), angle_for_time(t(10, 45), &bounds));
    let updated = engine.pointer_up(date()).unwrap();
    assert_eq!(updated.start, dt(10, 45));
    assert_eq!(updated.end, None);
}

#[test]
fn test_dragged_entry_draws_on_top() {
    let clock = clock_at(12, 0);
    let mut ongoing = nap("ongoing", dt(11, 0), dt(11, 5));
    ongoing.is_ongoing = true;
    let entries = vec![
        nap("long", dt(8, 0), dt(10, 0)),
        nap("short", dt(10, 15), dt(10, 35)),
        ongoing,
    ];
    let mut engine = engine_over(day_store(entries.clone()), clock);
    let bounds = engine.bounds_for(date());

    // Without a gesture: ongoing on top, then the shorter finished nap
    let mut stack = engine.descriptors(&entries);
    stack_for_drawing(&mut stack);
    let order: Vec<&str> = stack.iter().map(|d| d.entry_id.as_str()).collect();
    assert_eq!(order, ["long", "short", "ongoing"]);

    // Grabbing the long nap lifts it above everything
    assert!(engine.pointer_down(date(), "long", angle_for_time(t(9, 0), &bounds)));
    let mut stack = engine.descriptors(&entries);
    stack_for_drawing(&mut stack);
    assert_eq!(stack.last().unwrap().entry_id, "long");
    assert!(stack.last().unwrap().is_dragged);
}

#[test]
fn test_deleting_mid_confirmation_resets_cleanly() {
    let clock = clock_at(12, 0);
    let mut engine = engine_over(day_store(vec![nap("nap", dt(9, 0), dt(10, 0))]), clock);
    let bounds = engine.bounds_for(date());

    assert!(engine.pointer_down(date(), "nap", angle_for_time(t(9, 30), &bounds)));
    engine.pointer_up(date()).unwrap();
    assert!(engine.session().is_some());

    engine.forget_entry("nap");
    assert!(engine.session().is_none());
    assert!(engine.dragged_entry_id().is_none());
}
