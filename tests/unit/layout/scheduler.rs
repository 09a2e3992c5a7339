use super::*;
use crate::foundation::rng::Rng64;
use crate::layout::force::ForceLayoutConfig;
use crate::model::data::{GraphData, GraphVertex};

fn sim(n: usize, max_iterations: usize) -> ForceSimulation {
    let g = GraphData {
        vertices: (0..n)
            .map(|i| GraphVertex {
                id: format!("v{i}"),
                label: format!("v{i}"),
                x: None,
                y: None,
                state: "default".to_string(),
                distance: None,
                parent: None,
            })
            .collect(),
        ..GraphData::default()
    };
    let cfg = ForceLayoutConfig {
        max_iterations,
        stability_threshold: 0.0,
        ..ForceLayoutConfig::default()
    };
    ForceSimulation::new(&g, cfg, &mut Rng64::new(11))
}

#[test]
fn tick_advances_each_task_once_in_id_order() {
    let mut sched = FrameScheduler::new();
    let a = sched.schedule(sim(3, 10));
    let b = sched.schedule(sim(3, 10));
    let updates = sched.tick();
    assert_eq!(updates.iter().map(|u| u.task).collect::<Vec<_>>(), vec![a, b]);
    assert!(updates.iter().all(|u| u.iteration == 1));
    assert_eq!(sched.running(), 2);
}

#[test]
fn finished_tasks_are_not_stepped_but_remain_readable() {
    let mut sched = FrameScheduler::new();
    let short = sched.schedule(sim(2, 1));
    let long = sched.schedule(sim(2, 5));
    let first = sched.tick();
    assert_eq!(first[0].state, SimulationState::Exhausted);
    let second = sched.tick();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].task, long);
    assert_eq!(sched.get(short).map(ForceSimulation::iteration), Some(1));
    assert!(sched.take(short).is_some());
    assert!(sched.get(short).is_none());
}

#[test]
fn cancelled_task_is_never_stepped_again() {
    let mut sched = FrameScheduler::new();
    let a = sched.schedule(sim(3, 100));
    let b = sched.schedule(sim(3, 100));
    sched.tick();
    assert!(sched.cancel(a));
    assert!(!sched.cancel(a));
    for _ in 0..5 {
        for u in sched.tick() {
            assert_ne!(u.task, a);
        }
    }
    assert!(sched.get(a).is_none());
    assert_eq!(sched.get(b).map(ForceSimulation::iteration), Some(6));
}

#[test]
fn cancel_all_empties_the_scheduler() {
    let mut sched = FrameScheduler::new();
    sched.schedule(sim(2, 100));
    sched.schedule(sim(2, 100));
    assert_eq!(sched.cancel_all(), 2);
    assert_eq!(sched.cancel_all(), 0);
    assert!(sched.tick().is_empty());
    assert!(sched.is_idle());
}

#[test]
fn task_ids_are_not_reused() {
    let mut sched = FrameScheduler::new();
    let a = sched.schedule(sim(1, 1));
    sched.cancel(a);
    let b = sched.schedule(sim(1, 1));
    assert_ne!(a, b);
}
