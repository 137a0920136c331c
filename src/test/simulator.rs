use crate::sim::{Event, Phase, SimTime, Simulator, World};
use std::any::Any;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct DummyWorld;

impl World for DummyWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct Push {
    id: u32,
    phase: Phase,
    log: Arc<Mutex<Vec<u32>>>,
}

impl Push {
    fn new(id: u32, phase: Phase, log: &Arc<Mutex<Vec<u32>>>) -> Self {
        Self {
            id,
            phase,
            log: Arc::clone(log),
        }
    }
}

impl Event for Push {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn execute(self: Box<Self>, _sim: &mut Simulator, _world: &mut dyn World) {
        self.log.lock().expect("log lock").push(self.id);
    }
}

struct PushThenScheduleNow {
    id: u32,
    next_id: u32,
    log: Arc<Mutex<Vec<u32>>>,
}

impl Event for PushThenScheduleNow {
    fn execute(self: Box<Self>, sim: &mut Simulator, _world: &mut dyn World) {
        let PushThenScheduleNow { id, next_id, log } = *self;
        log.lock().expect("log lock").push(id);
        sim.schedule_in(0, Push::new(next_id, Phase::Drive, &log));
    }
}

#[test]
fn scheduled_events_order_by_time_then_phase_then_seq() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(SimTime(10), Push::new(1, Phase::Check, &log));
    sim.schedule(SimTime(5), Push::new(2, Phase::Sample, &log));
    sim.schedule(SimTime(10), Push::new(3, Phase::Drive, &log));
    sim.schedule(SimTime(10), Push::new(4, Phase::Edge, &log));
    sim.schedule(SimTime(10), Push::new(5, Phase::Drive, &log));

    let mut world = DummyWorld;
    sim.run(&mut world);

    assert_eq!(&*log.lock().expect("log lock"), &[2, 3, 5, 4, 1]);
    assert_eq!(sim.executed(), 5);
    assert_eq!(sim.now(), SimTime(10));
}

#[test]
fn event_scheduled_now_inside_event_runs_after_current_event() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(
        SimTime::ZERO,
        PushThenScheduleNow {
            id: 1,
            next_id: 2,
            log: Arc::clone(&log),
        },
    );
    sim.schedule(SimTime::ZERO, Push::new(3, Phase::Edge, &log));

    let mut world = DummyWorld;
    sim.run(&mut world);

    // 同相位内新调度的事件仍排在更晚相位之前
    assert_eq!(&*log.lock().expect("log lock"), &[1, 2, 3]);
    assert_eq!(sim.now(), SimTime::ZERO);
}

#[test]
fn schedule_in_the_past_runs_at_current_time() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    let mut world = DummyWorld;
    sim.run_until(SimTime(8), &mut world);
    sim.schedule(SimTime(2), Push::new(1, Phase::Drive, &log));
    sim.run(&mut world);

    assert_eq!(&*log.lock().expect("log lock"), &[1]);
    assert_eq!(sim.now(), SimTime(8));
}

#[test]
fn run_until_skips_events_after_until_and_advances_time() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(SimTime::ZERO, Push::new(1, Phase::Drive, &log));
    sim.schedule(SimTime(10), Push::new(2, Phase::Drive, &log));

    let mut world = DummyWorld;
    sim.run_until(SimTime(5), &mut world);

    assert_eq!(&*log.lock().expect("log lock"), &[1]);
    assert_eq!(sim.pending(), 1);
    assert_eq!(sim.now(), SimTime(5));

    sim.run(&mut world);
    assert_eq!(&*log.lock().expect("log lock"), &[1, 2]);
    assert_eq!(sim.now(), SimTime(10));
}

#[test]
fn run_until_executes_events_scheduled_exactly_at_until() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(SimTime(5), Push::new(1, Phase::Check, &log));

    let mut world = DummyWorld;
    sim.run_until(SimTime(5), &mut world);

    assert_eq!(&*log.lock().expect("log lock"), &[1]);
    assert_eq!(sim.now(), SimTime(5));
}
