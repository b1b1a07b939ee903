//! Simulation driver tests.

use cachesim::AccessOutcome::{Hit, Miss, MissEviction};
use cachesim::{Counters, Dispatch, Geometry, Simulator, TraceRecord};
use pretty_assertions::assert_eq;

fn simulator(s: u32, e: usize, b: u32) -> Simulator {
    Simulator::new(&Geometry::new(s, e, b).unwrap()).unwrap()
}

#[test]
fn new_simulator_starts_with_zero_counters() {
    let sim = simulator(2, 2, 2);
    assert_eq!(*sim.counters(), Counters::default());
}

#[test]
fn instruction_records_never_touch_the_cache() {
    let mut sim = simulator(0, 1, 0);
    assert_eq!(sim.step(&TraceRecord::instruction(0x40)), Dispatch::Ignored);
    assert_eq!(*sim.counters(), Counters::default());
    assert!(!sim.cache().contains(0x40));
}

#[test]
fn load_and_store_dispatch_once() {
    let mut sim = simulator(0, 1, 0);
    assert_eq!(sim.step(&TraceRecord::load(0x10)), Dispatch::Single(Miss));
    assert_eq!(sim.step(&TraceRecord::store(0x10)), Dispatch::Single(Hit));
    assert_eq!(
        *sim.counters(),
        Counters {
            hits: 1,
            misses: 1,
            evictions: 0
        }
    );
}

#[test]
fn modify_dispatches_load_then_store() {
    let mut sim = simulator(0, 1, 0);
    assert_eq!(sim.step(&TraceRecord::modify(0x10)), Dispatch::Modify(Miss, Hit));

    assert_eq!(
        sim.step(&TraceRecord::modify(0x20)),
        Dispatch::Modify(MissEviction, Hit)
    );
    assert_eq!(
        *sim.counters(),
        Counters {
            hits: 2,
            misses: 2,
            evictions: 1
        }
    );
}

#[test]
fn dispatch_outcomes_are_in_access_order() {
    let outcomes: Vec<_> = Dispatch::Modify(MissEviction, Hit).outcomes().collect();
    assert_eq!(outcomes, vec![MissEviction, Hit]);
    assert_eq!(Dispatch::Ignored.outcomes().count(), 0);
    assert_eq!(Dispatch::Single(Miss).outcomes().count(), 1);
}

#[test]
fn dispatch_display_matches_verbose_trace() {
    assert_eq!(Dispatch::Single(Hit).to_string(), "hit");
    assert_eq!(Dispatch::Single(MissEviction).to_string(), "miss eviction");
    assert_eq!(Dispatch::Modify(Miss, Hit).to_string(), "miss hit");
    assert_eq!(Dispatch::Ignored.to_string(), "");
}

#[test]
fn run_with_observes_every_record_in_order() {
    let records = vec![
        TraceRecord::instruction(0x0),
        TraceRecord::load(0x0),
        TraceRecord::modify(0x1),
    ];
    let mut seen = Vec::new();

    let counters = simulator(0, 1, 0).run_with(records.clone(), |record, dispatch| {
        seen.push((*record, *dispatch));
    });

    assert_eq!(
        seen,
        vec![
            (records[0], Dispatch::Ignored),
            (records[1], Dispatch::Single(Miss)),
            (records[2], Dispatch::Modify(MissEviction, Hit)),
        ]
    );
    assert_eq!(
        counters,
        Counters {
            hits: 1,
            misses: 2,
            evictions: 1
        }
    );
}

#[test]
fn empty_trace_yields_zero_counters() {
    let counters = simulator(4, 4, 4).run(Vec::<TraceRecord>::new());
    assert_eq!(counters, Counters::default());
}
