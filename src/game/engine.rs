use anyhow::Result;
use rand::Rng;

use super::config::GameConfig;
use super::direction::{Direction, InputSnapshot};
use super::sprite;
use super::state::{BodySegment, GameState, Position, RoundPhase};

/// What happened during one frame, for the host's bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    /// A simulation tick fired this frame.
    pub ticked: bool,
    /// The head picked up the apple this frame.
    pub ate_apple: bool,
    /// The round transitioned to GameOver this frame.
    pub game_over: bool,
    /// A restart reconstructed the round this frame.
    pub restarted: bool,
}

/// The game engine: owns the configuration and the RNG, and drives a
/// `GameState` one frame at a time.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    /// Create an engine, validating the configuration eagerly.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: rand::thread_rng(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Construct a fresh round.
    pub fn reset(&self) -> GameState {
        GameState::new(&self.config)
    }

    /// Per-frame entry point, called once per render frame by the host.
    ///
    /// While playing: capture input, advance the clock (firing at most one
    /// tick), then run the apple pickup and respawn tests. While in
    /// GameOver the simulation is frozen and only the restart trigger is
    /// honored.
    pub fn on_frame(
        &mut self,
        state: &mut GameState,
        delta: f32,
        input: &InputSnapshot,
        restart_pressed: bool,
    ) -> FrameEvents {
        match state.phase {
            RoundPhase::Playing => {
                self.query_input(state, input);

                let ticked = state.clock.advance(delta);
                let mut game_over = false;
                if ticked {
                    game_over = self.tick(state);
                }

                let ate_apple = self.check_apple_pickup(state);
                self.place_apple_if_missing(state);

                FrameEvents {
                    ticked,
                    ate_apple,
                    game_over,
                    restarted: false,
                }
            }
            RoundPhase::GameOver => {
                if restart_pressed {
                    *state = self.reset();
                    FrameEvents {
                        restarted: true,
                        ..FrameEvents::default()
                    }
                } else {
                    FrameEvents::default()
                }
            }
        }
    }

    /// Apply at most one committed direction change per tick, evaluating
    /// the pressed flags in the fixed order left, right, up, down.
    fn query_input(&self, state: &mut GameState, input: &InputSnapshot) {
        if input.left {
            Self::try_turn(state, Direction::Left);
        }
        if input.right {
            Self::try_turn(state, Direction::Right);
        }
        if input.up {
            Self::try_turn(state, Direction::Up);
        }
        if input.down {
            Self::try_turn(state, Direction::Down);
        }
    }

    /// A turn request differing from the current direction consumes the
    /// tick's latch even when it is the rejected 180-degree reversal;
    /// otherwise a quick double-tap could reverse the snake into its own
    /// neck before the body shifts.
    fn try_turn(state: &mut GameState, requested: Direction) {
        let snake = &mut state.snake;
        if snake.direction_set || snake.direction == requested {
            return;
        }
        snake.direction_set = true;
        if !snake.direction.is_opposite(requested) {
            snake.direction = requested;
        }
    }

    /// One fired simulation step. Returns true if the move ended the round.
    fn tick(&mut self, state: &mut GameState) -> bool {
        self.move_head(state);
        self.wrap_head(state);
        self.follow_head(state);
        let collided = Self::check_self_collision(state);

        state.snake.direction_set = false;
        state.ticks += 1;
        collided
    }

    /// Record the pre-move cell, then displace the head one cell in the
    /// current direction and retag its sprite.
    fn move_head(&self, state: &mut GameState) {
        let snake = &mut state.snake;
        snake.head_before_update = snake.head;
        snake.head = snake.head.moved_in(snake.direction, self.config.cell_size);
        snake.head_region = sprite::head_region(snake.direction);
    }

    /// Toroidal wrap: leaving one edge reappears on the opposite edge.
    fn wrap_head(&self, state: &mut GameState) {
        let width = self.config.width_units();
        let height = self.config.height_units();
        let cell = self.config.cell_size;
        let head = &mut state.snake.head;

        if head.x >= width {
            head.x = 0;
        }
        if head.x < 0 {
            head.x = width - cell;
        }
        if head.y >= height {
            head.y = 0;
        }
        if head.y < 0 {
            head.y = height - cell;
        }
    }

    /// Pop the tail-most segment, snap it to the cell the head vacated,
    /// classify its corner against the segment now ahead of it, and push
    /// it behind the head. The new tail-most segment is then retagged with
    /// its straight tail sprite.
    fn follow_head(&self, state: &mut GameState) {
        let snake = &mut state.snake;
        let Some(mut segment) = snake.body.pop_front() else {
            return;
        };

        let ahead_direction = snake
            .body
            .back()
            .map(|s| s.direction)
            .unwrap_or(snake.direction);

        segment.direction = snake.direction;
        segment.pos = snake.head_before_update;
        segment.region = sprite::turn_region(ahead_direction, snake.direction);
        snake.body.push_back(segment);

        if let Some(tail) = snake.body.front_mut() {
            tail.region = sprite::tail_region(tail.direction);
        }
    }

    /// The head's new cell coinciding with any segment's cell is the loss
    /// condition.
    fn check_self_collision(state: &mut GameState) -> bool {
        if state.snake.body_occupies(state.snake.head) {
            state.phase = RoundPhase::GameOver;
            true
        } else {
            false
        }
    }

    /// If the head sits on the apple, grow: a new segment takes the apple
    /// cell with the head's direction, classified against the neck's
    /// direction, and joins the queue at the front (it is dequeued and
    /// folded into the ring on the next tick). The head itself is not
    /// disturbed.
    fn check_apple_pickup(&self, state: &mut GameState) -> bool {
        let Some(apple) = state.apple else {
            return false;
        };
        if state.snake.head != apple {
            return false;
        }

        let snake = &mut state.snake;
        let neck_direction = snake
            .body
            .back()
            .map(|s| s.direction)
            .unwrap_or(snake.direction);

        snake.body.push_front(BodySegment {
            pos: apple,
            region: sprite::turn_region(neck_direction, snake.direction),
            direction: snake.direction,
        });

        state.apple = None;
        state.score += 1;
        true
    }

    /// Sample both coordinates independently and uniformly over the grid.
    /// Candidate cells are not checked against the snake body, so an apple
    /// can land under a segment; this matches the round's intended
    /// behavior rather than guaranteeing a fair spawn.
    fn place_apple_if_missing(&mut self, state: &mut GameState) {
        if state.apple.is_some() {
            return;
        }
        let cell = self.config.cell_size;
        let x = self.rng.gen_range(0..self.config.grid_width as i32) * cell;
        let y = self.rng.gen_range(0..self.config.grid_height as i32) * cell;
        state.apple = Some(Position::new(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::sprite::SheetRegion;
    use std::collections::VecDeque;

    fn engine() -> GameEngine {
        GameEngine::new(GameConfig::default()).unwrap()
    }

    /// Park the apple in the far corner so the per-frame respawn cannot
    /// put one in the snake's path mid-test.
    fn park_apple(state: &mut GameState) {
        state.apple = Some(Position::new(608, 448));
    }

    fn tick(engine: &mut GameEngine, state: &mut GameState) -> FrameEvents {
        engine.on_frame(state, 0.5, &InputSnapshot::default(), false)
    }

    fn tick_with(engine: &mut GameEngine, state: &mut GameState, dir: Direction) -> FrameEvents {
        let mut input = InputSnapshot::default();
        input.press(dir);
        engine.on_frame(state, 0.5, &input, false)
    }

    /// Deliver input without firing a tick.
    fn press(engine: &mut GameEngine, state: &mut GameState, dir: Direction) {
        let mut input = InputSnapshot::default();
        input.press(dir);
        engine.on_frame(state, 0.0, &input, false);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.cell_size = -8;
        assert!(GameEngine::new(config).is_err());
    }

    #[test]
    fn test_one_cell_per_tick() {
        let mut engine = engine();
        let mut state = engine.reset();
        park_apple(&mut state);

        let events = tick(&mut engine, &mut state);
        assert!(events.ticked);
        assert_eq!(state.snake.head, Position::new(96, 0));
        assert_eq!(state.snake.head_before_update, Position::new(64, 0));
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_subtick_frames_do_not_move() {
        let mut engine = engine();
        let mut state = engine.reset();
        park_apple(&mut state);

        engine.on_frame(&mut state, 0.2, &InputSnapshot::default(), false);
        engine.on_frame(&mut state, 0.2, &InputSnapshot::default(), false);
        assert_eq!(state.snake.head, Position::new(64, 0));

        let events = engine.on_frame(&mut state, 0.2, &InputSnapshot::default(), false);
        assert!(events.ticked);
        assert_eq!(state.snake.head, Position::new(96, 0));
    }

    #[test]
    fn test_wrap_right_edge_worked_example() {
        // Head starts at (64, 0) facing right on a 20x15-cell field of
        // 32-unit cells: after one tick it is at (96, 0), and it wraps to
        // x=0 on the tick that would reach 640.
        let mut engine = engine();
        let mut state = engine.reset();
        park_apple(&mut state);

        tick(&mut engine, &mut state);
        assert_eq!(state.snake.head, Position::new(96, 0));

        for _ in 0..16 {
            tick(&mut engine, &mut state);
        }
        assert_eq!(state.snake.head, Position::new(608, 0));

        tick(&mut engine, &mut state);
        assert_eq!(state.snake.head, Position::new(0, 0));
        assert!(state.is_playing());
    }

    #[test]
    fn test_wrap_all_edges() {
        let mut engine = engine();

        let mut state = engine.reset();
        park_apple(&mut state);
        state.snake.head = Position::new(0, 96);
        state.snake.direction = Direction::Left;
        tick(&mut engine, &mut state);
        assert_eq!(state.snake.head, Position::new(608, 96));

        let mut state = engine.reset();
        park_apple(&mut state);
        state.snake.head = Position::new(96, 0);
        state.snake.direction = Direction::Down;
        tick(&mut engine, &mut state);
        assert_eq!(state.snake.head, Position::new(96, 448));

        let mut state = engine.reset();
        park_apple(&mut state);
        state.snake.head = Position::new(96, 448);
        state.snake.direction = Direction::Up;
        tick(&mut engine, &mut state);
        assert_eq!(state.snake.head, Position::new(96, 0));
    }

    #[test]
    fn test_opposite_direction_rejected() {
        let mut engine = engine();
        let mut state = engine.reset();
        park_apple(&mut state);

        let events = tick_with(&mut engine, &mut state, Direction::Left);
        assert!(events.ticked);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head, Position::new(96, 0));
    }

    #[test]
    fn test_one_turn_per_tick() {
        let mut engine = engine();
        let mut state = engine.reset();
        park_apple(&mut state);

        press(&mut engine, &mut state, Direction::Down);
        assert_eq!(state.snake.direction, Direction::Down);

        // Second turn in the same tick is latched out.
        press(&mut engine, &mut state, Direction::Left);
        assert_eq!(state.snake.direction, Direction::Down);

        tick(&mut engine, &mut state);
        assert_eq!(state.snake.head, Position::new(64, 448)); // wrapped below y=0

        // The latch resets at the tick boundary.
        press(&mut engine, &mut state, Direction::Left);
        assert_eq!(state.snake.direction, Direction::Left);
    }

    #[test]
    fn test_rejected_reversal_still_consumes_latch() {
        let mut engine = engine();
        let mut state = engine.reset();
        park_apple(&mut state);

        press(&mut engine, &mut state, Direction::Left);
        assert_eq!(state.snake.direction, Direction::Right);
        press(&mut engine, &mut state, Direction::Down);
        assert_eq!(state.snake.direction, Direction::Right);

        tick(&mut engine, &mut state);
        assert_eq!(state.snake.head, Position::new(96, 0));
    }

    #[test]
    fn test_simultaneous_inputs_resolved_in_fixed_order() {
        let mut engine = engine();
        let mut state = engine.reset();
        park_apple(&mut state);
        state.snake.direction = Direction::Up;

        let input = InputSnapshot {
            left: true,
            down: true,
            ..InputSnapshot::default()
        };
        engine.on_frame(&mut state, 0.0, &input, false);
        assert_eq!(state.snake.direction, Direction::Left);
    }

    #[test]
    fn test_body_follows_contiguously() {
        let mut engine = engine();
        let mut state = engine.reset();
        park_apple(&mut state);

        for _ in 0..5 {
            tick(&mut engine, &mut state);
        }

        assert_eq!(state.snake.head, Position::new(224, 0));
        let cells: Vec<Position> = state.snake.body.iter().map(|s| s.pos).collect();
        assert_eq!(cells, vec![Position::new(160, 0), Position::new(192, 0)]);
        assert_eq!(
            state.snake.body.back().unwrap().pos,
            state.snake.head_before_update
        );
    }

    #[test]
    fn test_turn_retags_neck_with_corner_sprite() {
        let mut engine = engine();
        let mut state = engine.reset();
        park_apple(&mut state);

        tick(&mut engine, &mut state);
        tick_with(&mut engine, &mut state, Direction::Down);

        // The segment behind the head took the head's vacated cell and a
        // right-to-down corner piece; the tail stayed straight.
        let neck = state.snake.body.back().unwrap();
        assert_eq!(neck.pos, Position::new(96, 0));
        assert_eq!(neck.direction, Direction::Down);
        assert_eq!(neck.region, SheetRegion::new(2, 0));

        let tail = state.snake.body.front().unwrap();
        assert_eq!(tail.region, sprite::tail_region(tail.direction));
    }

    #[test]
    fn test_apple_growth() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.apple = Some(Position::new(96, 0));

        let events = tick(&mut engine, &mut state);
        assert!(events.ticked);
        assert!(events.ate_apple);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.head, Position::new(96, 0));
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.len(), 4);

        // The new segment joined at the queue front, on the apple cell,
        // tagged straight since no turn was involved.
        let grown = state.snake.body.front().unwrap();
        assert_eq!(grown.pos, Position::new(96, 0));
        assert_eq!(grown.direction, Direction::Right);
        assert_eq!(grown.region, sprite::BODY_HORIZONTAL);

        // A replacement apple appears the same frame.
        assert!(state.apple.is_some());
    }

    #[test]
    fn test_growth_folds_into_ring_next_tick() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.apple = Some(Position::new(96, 0));

        tick(&mut engine, &mut state);
        park_apple(&mut state);
        tick(&mut engine, &mut state);

        assert_eq!(state.snake.head, Position::new(128, 0));
        assert_eq!(state.snake.len(), 4);
        assert_eq!(
            state.snake.body.back().unwrap().pos,
            Position::new(96, 0)
        );
    }

    #[test]
    fn test_no_pickup_without_apple_cell_match() {
        let mut engine = engine();
        let mut state = engine.reset();
        park_apple(&mut state);

        let events = tick(&mut engine, &mut state);
        assert!(!events.ate_apple);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 3);
    }

    #[test]
    fn test_apple_spawns_cell_aligned() {
        let mut engine = engine();
        let mut state = engine.reset();

        for _ in 0..20 {
            state.apple = None;
            engine.on_frame(&mut state, 0.0, &InputSnapshot::default(), false);
            let apple = state.apple.expect("apple placed when none pending");
            assert_eq!(apple.x % 32, 0);
            assert_eq!(apple.y % 32, 0);
            assert!(apple.x >= 0 && apple.x < 640);
            assert!(apple.y >= 0 && apple.y < 480);
        }
    }

    /// A length-5 snake steered around a 2x2 loop runs into its own body.
    fn collided_state(engine: &mut GameEngine) -> GameState {
        let mut state = engine.reset();
        park_apple(&mut state);

        state.snake.head = Position::new(160, 64);
        state.snake.head_before_update = state.snake.head;
        state.snake.direction = Direction::Right;
        state.snake.body = VecDeque::from(vec![
            BodySegment {
                pos: Position::new(32, 64),
                region: sprite::tail_region(Direction::Right),
                direction: Direction::Right,
            },
            BodySegment {
                pos: Position::new(64, 64),
                region: sprite::BODY_HORIZONTAL,
                direction: Direction::Right,
            },
            BodySegment {
                pos: Position::new(96, 64),
                region: sprite::BODY_HORIZONTAL,
                direction: Direction::Right,
            },
            BodySegment {
                pos: Position::new(128, 64),
                region: sprite::BODY_HORIZONTAL,
                direction: Direction::Right,
            },
        ]);

        tick_with(engine, &mut state, Direction::Down);
        tick_with(engine, &mut state, Direction::Left);
        let events = tick_with(engine, &mut state, Direction::Up);
        assert!(events.game_over);
        state
    }

    #[test]
    fn test_self_collision_ends_round() {
        let mut engine = engine();
        let state = collided_state(&mut engine);
        assert_eq!(state.phase, RoundPhase::GameOver);
        assert!(state.snake.body_occupies(state.snake.head));
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut engine = engine();
        let mut state = collided_state(&mut engine);
        let head = state.snake.head;
        let ticks = state.ticks;

        let mut input = InputSnapshot::default();
        input.press(Direction::Right);
        let events = engine.on_frame(&mut state, 0.5, &input, false);

        assert_eq!(events, FrameEvents::default());
        assert_eq!(state.snake.head, head);
        assert_eq!(state.ticks, ticks);
        assert_eq!(state.phase, RoundPhase::GameOver);
    }

    #[test]
    fn test_restart_reconstructs_initial_round() {
        let mut engine = engine();
        let mut state = collided_state(&mut engine);

        let events = engine.on_frame(&mut state, 0.5, &InputSnapshot::default(), true);
        assert!(events.restarted);
        assert_eq!(state, engine.reset());
        assert!(state.is_playing());
        assert_eq!(state.apple, None);
    }
}
