use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_clock;

/// Schedule label for one fast tick.
/// Run manually each tick via `app.world_mut().run_schedule(StrongholdTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrongholdTick;

/// Ordered phases within each tick.
///
/// Phases run in declaration order: PreUpdate < Update < PostUpdate < Reactions < Last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum StrongholdPhase {
    PreUpdate,
    Update,
    PostUpdate,
    Reactions,
    Last,
}

/// Per-domain system sets within `StrongholdPhase::Update`.
///
/// ```text
/// WorldEvents → Capture → Cellar → Siege
/// ```
///
/// The ordering only fixes what a single tick observes; cadences gated by
/// run conditions stay independent of each other.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainSet {
    WorldEvents,
    Capture,
    Cellar,
    Siege,
}

fn configure_domain_ordering(schedule: &mut Schedule) {
    schedule.configure_sets(
        (
            DomainSet::WorldEvents,
            DomainSet::Capture,
            DomainSet::Cellar,
            DomainSet::Siege,
        )
            .chain()
            .in_set(StrongholdPhase::Update),
    );
}

/// Build a configured `StrongholdTick` schedule with phase ordering.
pub fn configure_stronghold_schedule(executor: ExecutorKind) -> Schedule {
    let mut schedule = Schedule::new(StrongholdTick);
    schedule.set_executor_kind(executor);
    schedule.configure_sets(
        (
            StrongholdPhase::PreUpdate,
            StrongholdPhase::Update,
            StrongholdPhase::PostUpdate,
            StrongholdPhase::Reactions,
            StrongholdPhase::Last,
        )
            .chain(),
    );
    configure_domain_ordering(&mut schedule);
    schedule.add_systems(advance_clock.in_set(StrongholdPhase::Last));
    schedule
}
