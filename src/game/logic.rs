//! Run logic: input handling, the per-frame step, collisions and scoring.

use rand::Rng;

use super::types::*;

/// UI-agnostic input actions during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Jump,  // Space or Up arrow
    Quit,  // Esc or q
    Other, // Anything else, ignored
}

/// How a single player/obstacle overlap is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    /// Overlap of at most half the obstacle's area. Forgiven.
    Graze,
    Fatal,
}

/// Result of checking the player against every active obstacle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub grazes: u32,
    pub fatal: bool,
}

/// Apply one input event. Quit ends the run immediately.
pub fn process_input(session: &mut GameSession, input: GameInput) {
    if session.is_over() {
        return;
    }

    match input {
        GameInput::Jump => {
            if !session.player.jump(&session.config) {
                log::debug!("Jump refused: airborne with no jumps left");
            }
        }
        GameInput::Quit => {
            log::info!("Run quit after {} frames", session.tick_count);
            session.state = SessionState::Over(EndReason::Quit);
        }
        GameInput::Other => {}
    }
}

/// Advance the run by one frame. Returns true if anything was simulated.
///
/// Order: player physics, obstacle scrolling, spawn roll, collision check,
/// then scoring of obstacles that left the screen.
pub fn step_session<R: Rng>(session: &mut GameSession, rng: &mut R) -> bool {
    if session.is_over() {
        return false;
    }

    session.tick_count += 1;

    // 1. Physics
    session.player.update(&session.config);
    // Obstacles scroll without wrapping; leaving the screen is scored below.
    for obstacle in &mut session.obstacles {
        obstacle.advance(&session.config);
    }

    // 2. Spawn
    maybe_spawn_obstacle(session, rng);

    // 3. Collisions
    let outcome = resolve_collisions(&session.player, &session.obstacles);
    if outcome.fatal {
        log::info!(
            "Fatal collision on frame {} with score {}",
            session.tick_count,
            session.score
        );
        session.state = SessionState::Over(EndReason::Collision);
    }

    // 4. Scoring
    collect_passed_obstacles(session);

    true
}

/// Roll the per-frame spawn chance. Returns true if an obstacle was added.
pub fn maybe_spawn_obstacle<R: Rng>(session: &mut GameSession, rng: &mut R) -> bool {
    let chance = session.config.spawn_chance.clamp(0.0, 1.0);
    if !rng.gen_bool(chance) {
        return false;
    }
    session.obstacles.push(Obstacle::new(&session.config));
    log::trace!(
        "Spawned obstacle on frame {} ({} active)",
        session.tick_count,
        session.obstacles.len()
    );
    true
}

/// Judge the overlap between the player and one obstacle.
pub fn classify_contact(player: &Rect, obstacle: &Rect) -> Contact {
    let Some(intersection) = player.clip(obstacle) else {
        return Contact::None;
    };

    // intersection <= 0.5 * obstacle, kept in integers.
    if intersection.area() * 2 <= obstacle.area() {
        Contact::Graze
    } else {
        Contact::Fatal
    }
}

/// Check the player against all obstacles, stopping at the first fatal hit.
pub fn resolve_collisions(player: &Player, obstacles: &[Obstacle]) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let player_rect = player.rect();

    for obstacle in obstacles {
        match classify_contact(&player_rect, &obstacle.rect()) {
            Contact::None => {}
            Contact::Graze => {
                log::debug!("Grazed obstacle at x={}", obstacle.rect.x);
                outcome.grazes += 1;
            }
            Contact::Fatal => {
                outcome.fatal = true;
                break;
            }
        }
    }

    outcome
}

/// Score and drop every obstacle that has fully left the screen.
/// Returns how many were collected this frame.
pub fn collect_passed_obstacles(session: &mut GameSession) -> u32 {
    let before = session.obstacles.len();
    session.obstacles.retain(|o| !o.is_off_screen());
    let passed = (before - session.obstacles.len()) as u32;

    if passed > 0 {
        session.score += passed;
        log::debug!("Passed {} obstacle(s), score {}", passed, session.score);
    }
    passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    /// Session that never spawns on its own, with the player resting on the floor.
    fn quiet_session() -> GameSession {
        let config = GameConfig {
            spawn_chance: 0.0,
            ..Default::default()
        };
        let mut session = GameSession::new(config);
        let floor = session.config.floor();
        session.player.rect.set_bottom(floor);
        session
    }

    fn obstacle_at(x: i32, session: &GameSession) -> Obstacle {
        let mut obstacle = Obstacle::new(&session.config);
        obstacle.rect.x = x;
        obstacle
    }

    // ── Input tests ──

    #[test]
    fn test_jump_input_jumps() {
        let mut session = quiet_session();
        process_input(&mut session, GameInput::Jump);
        assert_eq!(session.player.velocity, session.config.jump_impulse);
        assert!(!session.player.on_ground);
    }

    #[test]
    fn test_quit_input_ends_run() {
        let mut session = quiet_session();
        process_input(&mut session, GameInput::Quit);
        assert_eq!(session.state, SessionState::Over(EndReason::Quit));
    }

    #[test]
    fn test_other_input_ignored() {
        let mut session = quiet_session();
        let velocity = session.player.velocity;
        process_input(&mut session, GameInput::Other);
        assert_eq!(session.state, SessionState::Running);
        assert_eq!(session.player.velocity, velocity);
    }

    #[test]
    fn test_input_ignored_when_over() {
        let mut session = quiet_session();
        session.state = SessionState::Over(EndReason::Collision);

        process_input(&mut session, GameInput::Jump);
        assert!(session.player.on_ground);

        process_input(&mut session, GameInput::Quit);
        assert_eq!(session.state, SessionState::Over(EndReason::Collision));
    }

    // ── Jump counter tests ──

    #[test]
    fn test_jump_sequence_exhausts_counter() {
        let mut session = quiet_session();
        assert_eq!(session.config.max_jumps, 3);

        process_input(&mut session, GameInput::Jump);
        assert_eq!(session.player.jumps_remaining, 2);

        process_input(&mut session, GameInput::Jump);
        assert_eq!(session.player.jumps_remaining, 1);

        process_input(&mut session, GameInput::Jump);
        assert_eq!(session.player.jumps_remaining, 0);

        session.player.velocity = 4;
        process_input(&mut session, GameInput::Jump);
        assert_eq!(session.player.jumps_remaining, 0);
        assert_eq!(session.player.velocity, 4, "Fourth jump should be a no-op");
    }

    #[test]
    fn test_landing_restores_jumps() {
        let mut session = quiet_session();
        let mut rng = create_test_rng();

        process_input(&mut session, GameInput::Jump);
        process_input(&mut session, GameInput::Jump);
        assert_eq!(session.player.jumps_remaining, 1);

        let mut landed = false;
        for _ in 0..200 {
            step_session(&mut session, &mut rng);
            if session.player.on_ground {
                landed = true;
                assert_eq!(session.player.jumps_remaining, session.config.max_jumps);
                break;
            }
        }
        assert!(landed, "Player should land within 200 frames");
    }

    #[test]
    fn test_velocity_grows_by_gravity_while_airborne() {
        let mut session = quiet_session();
        let mut rng = create_test_rng();
        process_input(&mut session, GameInput::Jump);

        let mut previous = session.player.velocity;
        loop {
            step_session(&mut session, &mut rng);
            if session.player.on_ground {
                assert_eq!(session.player.velocity, 0);
                break;
            }
            assert_eq!(session.player.velocity, previous + session.config.gravity);
            previous = session.player.velocity;
        }
    }

    // ── Collision tests ──

    #[test]
    fn test_no_contact_when_apart() {
        let player = Rect::new(0, 0, 75, 75);
        let obstacle = Rect::new(200, 0, 50, 50);
        assert_eq!(classify_contact(&player, &obstacle), Contact::None);
    }

    #[test]
    fn test_contact_exactly_half_is_graze() {
        // 50x50 obstacle, allowed area 1250 = 25 x 50.
        let obstacle = Rect::new(100, 350, 50, 50);
        let player = Rect::new(50, 325, 75, 75);
        let clip = player.clip(&obstacle).unwrap();
        assert_eq!(clip.area(), 1250);
        assert_eq!(classify_contact(&player, &obstacle), Contact::Graze);
    }

    #[test]
    fn test_contact_just_over_half_is_fatal() {
        // 26 x 50 = 1300 > 1250.
        let obstacle = Rect::new(100, 350, 50, 50);
        let player = Rect::new(51, 325, 75, 75);
        assert_eq!(player.clip(&obstacle).unwrap().area(), 1300);
        assert_eq!(classify_contact(&player, &obstacle), Contact::Fatal);
    }

    #[test]
    fn test_contact_is_monotonic_in_overlap() {
        let obstacle = Rect::new(100, 350, 50, 50);
        let mut seen_fatal = false;
        // Slide the player right so the overlap only grows.
        for x in 0..=100 {
            let player = Rect::new(x, 325, 75, 75);
            match classify_contact(&player, &obstacle) {
                Contact::Fatal => seen_fatal = true,
                other => assert!(
                    !seen_fatal,
                    "Overlap at x={} went back to {:?} after a fatal contact",
                    x, other
                ),
            }
        }
        assert!(seen_fatal);
    }

    #[test]
    fn test_full_overlap_ends_run_that_frame() {
        let mut session = quiet_session();
        let mut rng = create_test_rng();

        // Obstacle lands squarely under the resting player after scrolling.
        let x = session.player.rect.x + session.config.obstacle_speed;
        let obstacle = obstacle_at(x, &session);
        session.obstacles.push(obstacle);

        assert!(step_session(&mut session, &mut rng));
        assert_eq!(session.state, SessionState::Over(EndReason::Collision));
    }

    #[test]
    fn test_graze_keeps_run_going() {
        let mut session = quiet_session();
        let mut rng = create_test_rng();
        // Player hovers so only the top 10 rows of the obstacle overlap.
        session.player.rect.y = session.config.floor() - 50 - 75 + 10;
        session.player.velocity = -1; // cancels gravity for one frame
        session.player.on_ground = false;
        let x = session.player.rect.x + session.config.obstacle_speed;
        session.obstacles.push(obstacle_at(x, &session));

        step_session(&mut session, &mut rng);
        assert_eq!(session.state, SessionState::Running);
        let outcome = resolve_collisions(&session.player, &session.obstacles);
        assert_eq!(outcome.grazes, 1);
        assert!(!outcome.fatal);
    }

    #[test]
    fn test_resolve_stops_at_first_fatal() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.rect = Rect::new(100, 325, 75, 75);
        let mut hit = Obstacle::new(&config);
        hit.rect.x = 110;
        let mut graze_after = Obstacle::new(&config);
        graze_after.rect.x = 160;

        let outcome = resolve_collisions(&player, &[hit, graze_after]);
        assert!(outcome.fatal);
        assert_eq!(outcome.grazes, 0);
    }

    // ── Spawn and scoring tests ──

    #[test]
    fn test_spawn_never_with_zero_chance() {
        let mut session = quiet_session();
        let mut rng = create_test_rng();
        for _ in 0..1000 {
            assert!(!maybe_spawn_obstacle(&mut session, &mut rng));
        }
        assert!(session.obstacles.is_empty());
    }

    #[test]
    fn test_spawn_always_with_full_chance() {
        let mut session = quiet_session();
        session.config.spawn_chance = 1.0;
        let mut rng = create_test_rng();

        assert!(maybe_spawn_obstacle(&mut session, &mut rng));
        let obstacle = &session.obstacles[0];
        assert_eq!(obstacle.rect.x, session.config.width);
        assert_eq!(obstacle.rect.bottom(), session.config.floor());
    }

    #[test]
    fn test_spawn_rate_is_roughly_one_percent() {
        let mut session = quiet_session();
        session.config.spawn_chance = 0.01;
        let mut rng = create_test_rng();

        let spawned = (0..20_000)
            .filter(|_| maybe_spawn_obstacle(&mut session, &mut rng))
            .count();
        assert!(
            (100..=300).contains(&spawned),
            "Expected about 200 spawns, got {}",
            spawned
        );
    }

    #[test]
    fn test_obstacle_scored_once_when_leaving_screen() {
        let mut session = quiet_session();
        // Park the player at the top of the playfield so nothing collides.
        session.config.gravity = 0;
        session.player.rect.y = 0;
        session.player.velocity = 0;
        session.player.on_ground = false;
        let width = session.config.width;
        let obstacle = obstacle_at(width, &session);
        session.obstacles.push(obstacle);
        let mut rng = create_test_rng();

        // (800 + 50) / 10 = 85 frames brings the right edge to exactly 0.
        for _ in 0..85 {
            step_session(&mut session, &mut rng);
        }
        assert_eq!(session.obstacles.len(), 1);
        assert_eq!(session.obstacles[0].rect.right(), 0);
        assert_eq!(session.score, 0);

        step_session(&mut session, &mut rng);
        assert_eq!(session.score, 1);
        assert!(session.obstacles.is_empty());

        for _ in 0..200 {
            step_session(&mut session, &mut rng);
        }
        assert_eq!(session.score, 1, "A passed obstacle must not score twice");
    }

    #[test]
    fn test_collect_counts_multiple() {
        let mut session = quiet_session();
        for x in [-100, -60, 300] {
            let obstacle = obstacle_at(x, &session);
            session.obstacles.push(obstacle);
        }

        assert_eq!(collect_passed_obstacles(&mut session), 2);
        assert_eq!(session.score, 2);
        assert_eq!(session.obstacles.len(), 1);
        assert_eq!(collect_passed_obstacles(&mut session), 0);
    }

    #[test]
    fn test_step_after_over_is_noop() {
        let mut session = quiet_session();
        session.state = SessionState::Over(EndReason::Quit);
        let obstacle = obstacle_at(-100, &session);
        session.obstacles.push(obstacle);
        let mut rng = create_test_rng();

        assert!(!step_session(&mut session, &mut rng));
        assert_eq!(session.tick_count, 0);
        assert_eq!(session.score, 0);
        assert_eq!(session.obstacles.len(), 1);
    }
}
