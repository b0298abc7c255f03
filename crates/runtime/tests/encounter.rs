use combat_core::{
    ActorId, ActorState, BoundInputSource, CombatConfig, CombatEvent, InputAction, InputBindings,
    IntentSnapshot, PhysicalInput, PoolConfig, RawInputState,
};
use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use runtime::{
    Arena, ArenaEvent, CircleArena, EncounterOutcome, FixedSpawns, FrameReport, Stationary,
};

const ARENA_RADIUS: f32 = 15.0;

fn duel_arena() -> Arena {
    Arena::builder()
        .bounds(CircleArena::new(Vec2::ZERO, ARENA_RADIUS))
        .spawns(FixedSpawns::new(Vec3::new(0.0, 0.0, 6.0), Vec3::new(0.0, 0.0, -6.0)))
        .build()
        .expect("default arena should build")
}

fn collect(reports: &[FrameReport], actor: ActorId) -> Vec<CombatEvent> {
    reports
        .iter()
        .flat_map(|report| report.events_for(actor).copied())
        .collect()
}

/// Player swings three heavy attacks into a boss that never moves.
///
/// Boss: 120 HP, no defense, phase 2 at 60%. Heavy hit: 40 damage.
/// Health goes 120 -> 80 -> 40 (phase 2) -> 0 (dead).
#[test]
fn heavy_swings_kill_a_stationary_boss() {
    let mut combat = CombatConfig::default();
    combat.boss.actor.health = PoolConfig::fixed(120.0);
    combat.boss.actor.defense = 0.0;

    let mut arena = Arena::builder()
        .combat(combat)
        .bounds(CircleArena::new(Vec2::ZERO, ARENA_RADIUS))
        .spawns(FixedSpawns::new(Vec3::new(0.0, 0.0, 1.5), Vec3::ZERO))
        .boss_provider(Stationary)
        .build()
        .unwrap();

    let swing = IntentSnapshot::NEUTRAL.press(InputAction::HeavyAttack);
    let mut reports = Vec::new();
    for _ in 0..3 {
        reports.push(arena.step(&swing));
        for _ in 0..59 {
            reports.push(arena.step(&IntentSnapshot::NEUTRAL));
        }
    }

    let hits: Vec<_> = reports.iter().flat_map(|r| r.hits.iter()).collect();
    assert_eq!(hits.len(), 3, "one hit per swing");
    assert!(hits.iter().all(|hit| hit.attacker == ActorId::PLAYER));
    let health: Vec<_> = hits.iter().map(|hit| hit.outcome.health_after).collect();
    assert_eq!(health, vec![80.0, 40.0, 0.0]);

    let boss_events = collect(&reports, ActorId::BOSS);
    let phases: Vec<_> = boss_events
        .iter()
        .filter_map(|event| match event {
            CombatEvent::PhaseChanged { phase } => Some(*phase),
            _ => None,
        })
        .collect();
    assert_eq!(phases, vec![2]);
    assert_eq!(
        boss_events.iter().filter(|e| **e == CombatEvent::Died).count(),
        1
    );

    assert_eq!(arena.outcome(), Some(EncounterOutcome::PlayerVictory));
    let endings = reports.iter().filter(|r| r.outcome().is_some()).count();
    assert_eq!(endings, 1);
}

#[test]
fn boss_brain_wears_down_an_idle_player() {
    let mut arena = duel_arena();
    let mut reports = Vec::new();
    for _ in 0..(90 * 60) {
        reports.push(arena.step(&IntentSnapshot::NEUTRAL));
        if arena.is_over() {
            break;
        }
    }

    assert_eq!(arena.outcome(), Some(EncounterOutcome::PlayerDefeated));
    assert!(arena.player().actor().is_dead());
    assert_eq!(arena.player().actor().health().current(), 0.0);

    let hits: Vec<_> = reports.iter().flat_map(|r| r.hits.iter()).collect();
    assert!(hits.len() >= 5);
    assert!(hits.iter().all(|hit| hit.attacker == ActorId::BOSS));

    let player_events = collect(&reports, ActorId::PLAYER);
    assert!(player_events.iter().any(|e| matches!(e, CombatEvent::Damaged { .. })));
    assert!(player_events.contains(&CombatEvent::Died));

    // The encounter is over: nothing else happens to the player.
    let frozen = arena.player().actor().snapshot();
    for _ in 0..120 {
        let report = arena.step(&IntentSnapshot::NEUTRAL);
        assert!(report.hits.is_empty());
        assert!(report.outcome().is_none());
    }
    assert_eq!(arena.player().actor().snapshot(), frozen);
}

#[test]
fn bounds_pull_a_runaway_player_back() {
    let mut arena = Arena::builder()
        .bounds(CircleArena::new(Vec2::ZERO, ARENA_RADIUS))
        .spawns(FixedSpawns::new(Vec3::new(0.0, 0.0, 6.0), Vec3::new(0.0, 0.0, -6.0)))
        .boss_provider(Stationary)
        .build()
        .unwrap();

    // Holding "S" walks away from the camera, toward +Z.
    let mut input = BoundInputSource::new(InputBindings::default()).unwrap();
    let raw = RawInputState::default().with_down(PhysicalInput::key("S"));

    let mut corrections = 0;
    for _ in 0..(5 * 60) {
        let intent = input.update(&raw);
        let report = arena.step(&intent);
        corrections += report
            .arena_events
            .iter()
            .filter(|e| matches!(e, ArenaEvent::PositionCorrected { actor: ActorId::PLAYER, .. }))
            .count();

        let distance = arena.player_body().planar().length();
        assert!(distance <= ARENA_RADIUS + 1e-3, "player escaped to {distance}");
    }

    assert!(corrections > 0);
    assert!(arena.player_body().position.z > ARENA_RADIUS - 0.1);
    assert_eq!(arena.player().actor().state(), ActorState::Moving);
}

#[test]
fn jump_leaves_and_returns_to_the_floor() {
    let mut arena = Arena::builder()
        .bounds(CircleArena::new(Vec2::ZERO, ARENA_RADIUS))
        .spawns(FixedSpawns::new(Vec3::new(0.0, 0.0, 6.0), Vec3::new(0.0, 0.0, -6.0)))
        .boss_provider(Stationary)
        .build()
        .unwrap();

    let mut reports = vec![arena.step(&IntentSnapshot::NEUTRAL.press(InputAction::Jump))];
    let mut peak: f32 = 0.0;
    for _ in 0..120 {
        reports.push(arena.step(&IntentSnapshot::NEUTRAL));
        peak = peak.max(arena.player_body().position.y);
    }

    let states: Vec<_> = collect(&reports, ActorId::PLAYER)
        .into_iter()
        .filter_map(|event| match event {
            CombatEvent::StateChanged { new, .. } => Some(new),
            _ => None,
        })
        .collect();
    assert_eq!(
        states,
        vec![ActorState::Jumping, ActorState::Falling, ActorState::Idle]
    );
    assert!(peak > 1.0);
    assert_eq!(arena.player_body().position.y, 0.0);
    assert!(arena.player().actor().on_floor());
}

fn random_intent(rng: &mut ChaCha8Rng) -> IntentSnapshot {
    let mut intent = IntentSnapshot::moving(Vec2::new(
        rng.random_range(-1.0..=1.0),
        rng.random_range(-1.0..=1.0),
    ))
    .look(Vec2::new(rng.random_range(-1.0..=1.0), 0.0));
    for action in [
        InputAction::Dodge,
        InputAction::LightAttack,
        InputAction::HeavyAttack,
        InputAction::Jump,
        InputAction::Parry,
    ] {
        if rng.random_bool(0.05) {
            intent = intent.press(action);
        }
    }
    if rng.random_bool(0.5) {
        intent = intent.hold(InputAction::Sprint);
    }
    intent
}

#[test]
fn random_play_keeps_invariants_and_is_reproducible() {
    for seed in [1_u64, 7, 42] {
        let mut a = duel_arena();
        let mut b = duel_arena();
        let mut rng_a = ChaCha8Rng::seed_from_u64(seed);
        let mut rng_b = ChaCha8Rng::seed_from_u64(seed);

        for _ in 0..1200 {
            a.step(&random_intent(&mut rng_a));
            b.step(&random_intent(&mut rng_b));

            for actor in [a.player().actor(), a.boss().actor()] {
                for pool in [Some(actor.health()), Some(actor.poise()), actor.stamina()]
                    .into_iter()
                    .flatten()
                {
                    assert!(pool.current() >= 0.0 && pool.current() <= pool.max());
                }
            }
            assert!(a.player_body().planar().length() <= ARENA_RADIUS + 1e-3);
            assert!(a.boss_body().planar().length() <= ARENA_RADIUS + 1e-3);
            assert!(a.player_body().position.y >= 0.0);
        }

        assert_eq!(
            hex::encode(a.digest()),
            hex::encode(b.digest()),
            "seed {seed} diverged"
        );
    }
}

#[test]
fn bundled_content_builds_an_arena() {
    let config = combat_content::bundled_config().unwrap();
    let spec = combat_content::bundled_arena().unwrap();
    let combat_content::BoundsSpec::Circle { center, radius } = spec.bounds else {
        panic!("bundled arena is circular");
    };

    let mut arena = Arena::builder()
        .combat(config)
        .bounds(CircleArena::new(Vec2::new(center.0, center.1), radius))
        .spawns(FixedSpawns::new(spec.player_spawn.into(), spec.boss_spawn.into()))
        .build()
        .unwrap();
    assert_eq!(arena.dt(), 1.0 / 60.0);
    let report = arena.step(&IntentSnapshot::NEUTRAL);
    assert_eq!(report.tick, 0);
    assert_eq!(arena.tick(), 1);
}
