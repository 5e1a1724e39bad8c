//! Game/level state machine
//!
//! One call to [`GameManager::tick`] advances the game by one frame:
//! input, per-actor status and position updates in registry order, the
//! collision sweep, cleanup/spawn, then the level and game-over transition
//! checks. Banners are deadlines on the frame counter.

use super::actor::{Actor, TickContext};
use super::collision;
use super::gameplay::{ActorRegistry, GameplayManager, GameplayStats, TickInput};
use super::level::{LevelAdvance, LevelRegistry};
use crate::consts::BANNER_SCROLL_PX;
use crate::error::GameError;
use crate::persistence::DifficultyStore;
use crate::settings::{Difficulty, GameConfig};

/// The two halves of an actor's per-tick update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePass {
    Status,
    Position,
}

/// Visit every actor back to front, status before position
pub fn for_each_update<F>(registry: &mut ActorRegistry, mut apply: F)
where
    F: FnMut(&mut Actor, UpdatePass),
{
    for actor in registry.iter_mut() {
        apply(actor, UpdatePass::Status);
        apply(actor, UpdatePass::Position);
    }
}

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Success banner; the next level starts at frame `until`
    ShowingLevelCompleteMessage { until: u64 },
    /// Game over banner; a new game starts at frame `until`
    ShowingGameOverMessage { until: u64 },
    /// Player quit; ticks are ignored
    Terminal,
}

#[derive(Debug)]
pub struct GameManager {
    config: GameConfig,
    /// Selected difficulty, applied from the next new game
    difficulty: Difficulty,
    store: Option<DifficultyStore>,
    levels: LevelRegistry,
    gameplay: GameplayManager,
    registry: ActorRegistry,
    phase: GamePhase,
    frame: u64,
    /// F1 was down last tick
    toggle_held: bool,
}

impl GameManager {
    /// Start a new game on the first level of `levels`
    pub fn new(levels: LevelRegistry, config: GameConfig) -> Self {
        let mut game = Self {
            difficulty: config.difficulty,
            gameplay: GameplayManager::new(&config),
            config,
            store: None,
            levels,
            registry: ActorRegistry::new(),
            phase: GamePhase::Playing,
            frame: 0,
            toggle_held: false,
        };
        game.new_game();
        game
    }

    /// Built-in levels with the difficulty persisted in `store`
    pub fn load(store: DifficultyStore) -> Result<Self, GameError> {
        let difficulty = store.read_difficulty();
        let levels = LevelRegistry::built_in()?;
        let game = Self::new(levels, GameConfig::for_difficulty(difficulty)).with_store(store);
        Ok(game)
    }

    /// Persist difficulty changes through `store`
    pub fn with_store(mut self, store: DifficultyStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Fresh score and lives on the first level
    pub fn new_game(&mut self) {
        if self.difficulty != self.config.difficulty {
            self.config = self.config.with_difficulty(self.difficulty);
        }
        self.levels.reset();
        self.gameplay.reset_stats(&self.config);
        self.phase = GamePhase::Playing;
        log::info!(
            "New game: {} difficulty, {} lives",
            self.config.difficulty.as_str(),
            self.gameplay.stats.lives
        );
        self.restart_level();
    }

    /// Rebuild the current level's actors; score and lives are kept
    pub fn restart_level(&mut self) {
        self.gameplay
            .init_level(self.levels.current(), &self.config, &mut self.registry);
    }

    /// Move to the next level and build its actors
    pub fn advance_level(&mut self) -> Result<(), GameError> {
        match self.levels.advance() {
            LevelAdvance::Next(index) => {
                log::info!(
                    "Advancing to level {} ({})",
                    index + 1,
                    self.levels.current().name()
                );
                self.restart_level();
                Ok(())
            }
            LevelAdvance::AtEnd => {
                let err = GameError::NoNextLevel {
                    current: self.levels.current_index(),
                };
                log::error!("{err}");
                Err(err)
            }
        }
    }

    /// Jump straight to the level at `index`
    pub fn jump_to_level(&mut self, index: usize) -> Result<(), GameError> {
        self.levels.select(index)?;
        self.phase = GamePhase::Playing;
        self.restart_level();
        Ok(())
    }

    /// Advance the game by one frame
    pub fn tick(&mut self, input: &TickInput) -> Result<(), GameError> {
        self.frame += 1;

        if input.quit {
            if self.phase != GamePhase::Terminal {
                log::info!("Quit at frame {}", self.frame);
            }
            self.phase = GamePhase::Terminal;
        }
        if self.phase == GamePhase::Terminal {
            return Ok(());
        }

        if input.toggle_difficulty && !self.toggle_held {
            self.toggle_difficulty();
        }
        self.toggle_held = input.toggle_difficulty;

        match self.phase {
            GamePhase::Playing => {
                self.play(input);
                Ok(())
            }
            GamePhase::ShowingLevelCompleteMessage { until } => {
                self.banner_tick();
                if self.frame >= until {
                    self.phase = GamePhase::Playing;
                    self.advance_level()?;
                }
                Ok(())
            }
            GamePhase::ShowingGameOverMessage { until } => {
                self.banner_tick();
                if self.frame >= until {
                    self.new_game();
                }
                Ok(())
            }
            GamePhase::Terminal => Ok(()),
        }
    }

    /// Cosmetic scroll and death animations while a banner shows
    fn banner_tick(&mut self) {
        self.gameplay
            .scroll_world_up(&mut self.registry, BANNER_SCROLL_PX);
        self.gameplay.advance_explosions(
            &mut self.registry,
            self.frame,
            self.config.explosion_frame_ticks,
        );
    }

    fn play(&mut self, input: &TickInput) {
        let input = if input.idle_mode {
            self.gameplay.autopilot_input(&self.registry)
        } else {
            input.clone()
        };

        self.gameplay.apply_input(&input, &mut self.registry);
        let scroll_delta = self.gameplay.advance_scroll(&self.registry);
        let ctx = TickContext::new(self.frame, scroll_delta, self.config.explosion_frame_ticks);

        let stats = &mut self.gameplay.stats;
        for_each_update(&mut self.registry, |actor, pass| match pass {
            UpdatePass::Status => actor.update_status(&ctx, stats),
            UpdatePass::Position => actor.update_position(&ctx),
        });

        collision::sweep(
            self.registry.as_mut_slice(),
            &mut self.gameplay.stats,
            &ctx,
        );
        self.gameplay.cleanup_and_spawn(&mut self.registry);

        self.check_transitions();
    }

    fn check_transitions(&mut self) {
        let end_of_level = self
            .gameplay
            .end_of_level_section_reached(self.levels.current());
        let end_of_game = self.gameplay.stats.is_out_of_lives()
            || (!self.levels.has_next_level() && end_of_level);

        if end_of_game {
            log::info!(
                "Game over on level {} with score {}",
                self.levels.current().number(),
                self.gameplay.stats.score
            );
            self.phase = GamePhase::ShowingGameOverMessage {
                until: self.frame + self.config.banner_ticks,
            };
        } else if end_of_level {
            log::info!(
                "Level {} complete, score {}",
                self.levels.current().number(),
                self.gameplay.stats.score
            );
            self.phase = GamePhase::ShowingLevelCompleteMessage {
                until: self.frame + self.config.banner_ticks,
            };
        } else if self.gameplay.player(&self.registry).is_none() {
            // Explosion finished with lives to spare
            log::info!("Restarting level {}", self.levels.current().number());
            self.restart_level();
        }
    }

    fn toggle_difficulty(&mut self) {
        self.difficulty = self.difficulty.toggled();
        log::info!(
            "Difficulty set to {} (applies from the next game)",
            self.difficulty.as_str()
        );
        if let Some(store) = &self.store {
            if let Err(err) = store.write_difficulty(self.difficulty) {
                log::warn!("Could not save difficulty, continuing: {err}");
            }
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::Terminal
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Configuration of the running game
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Selected difficulty (may differ from the running game's)
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn levels(&self) -> &LevelRegistry {
        &self.levels
    }

    pub fn gameplay(&self) -> &GameplayManager {
        &self.gameplay
    }

    pub fn stats(&self) -> &GameplayStats {
        &self.gameplay.stats
    }

    /// Live actors, back to front
    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::actor::{ActorKind, ActorState};
    use crate::sim::explosion::ExplosionState;
    use crate::sim::level::Level;
    use crate::sim::position::Position;

    const BANNER: u64 = 10;

    /// Level `number` has a land run of `number` cells on its top line
    fn test_level(number: u32) -> Level {
        let top = format!("{}{}", "L".repeat(number as usize), ".".repeat(24 - number as usize));
        let water = ".".repeat(24);
        Level::new(format!("Level {number}"), number, vec![top, water], 0, 1).unwrap()
    }

    fn test_levels(count: u32) -> LevelRegistry {
        LevelRegistry::new((1..=count).map(test_level).collect()).unwrap()
    }

    fn test_config(lives: u32) -> GameConfig {
        GameConfig {
            starting_lives: lives,
            banner_ticks: BANNER,
            ..GameConfig::default()
        }
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Static ship right on top of the player
    fn ram_player(game: &mut GameManager) {
        let id = game.gameplay.next_actor_id();
        let player = game.gameplay.player(&game.registry).unwrap().object.position;
        let cell = Position::new(player.x, player.y - 8.0);
        game.registry.insert(Actor::ship(id, cell, 1.0, None));
    }

    #[test]
    fn test_new_game_starts_on_first_level() {
        let game = GameManager::new(test_levels(3), test_config(4));
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.levels().current_index(), 0);
        assert_eq!(game.stats().lives, 4);
        assert_eq!(game.stats().score, 0);
        assert!(game.gameplay().player_alive(game.registry()));
    }

    #[test]
    fn test_last_life_lost_shows_game_over_then_resets() {
        let mut game = GameManager::new(test_levels(3), test_config(1));
        game.gameplay.stats.score = 120;
        ram_player(&mut game);

        game.tick(&idle()).unwrap();
        assert_eq!(game.stats().lives, 0);
        assert!(matches!(
            game.phase(),
            GamePhase::ShowingGameOverMessage { .. }
        ));

        // The triggering tick counts as the first banner frame
        let mut shown = 1;
        loop {
            game.tick(&idle()).unwrap();
            if !matches!(game.phase(), GamePhase::ShowingGameOverMessage { .. }) {
                break;
            }
            shown += 1;
            assert!(shown <= BANNER);
        }
        assert_eq!(shown, BANNER);

        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.stats().lives, 1);
        assert_eq!(game.stats().score, 0);
        assert_eq!(game.levels().current_index(), 0);
        assert!(game.gameplay().player_alive(game.registry()));
    }

    #[test]
    fn test_explosions_keep_animating_during_banner() {
        let config = GameConfig {
            banner_ticks: 100,
            ..test_config(1)
        };
        let mut game = GameManager::new(test_levels(2), config);
        ram_player(&mut game);
        game.tick(&idle()).unwrap();

        let player_state = |game: &GameManager| {
            game.registry()
                .iter()
                .find(|a| a.kind == ActorKind::Player)
                .map(|a| a.state)
                .unwrap()
        };
        assert!(matches!(
            player_state(&game),
            ActorState::Exploding(e) if e.frame == ExplosionState::One
        ));

        for _ in 0..EXPLOSION_FRAME_TICKS + 4 {
            game.tick(&idle()).unwrap();
        }
        assert!(matches!(
            game.phase(),
            GamePhase::ShowingGameOverMessage { .. }
        ));
        assert!(matches!(
            player_state(&game),
            ActorState::Exploding(e) if e.frame == ExplosionState::Two
        ));

        // Plays out completely before the banner ends
        for _ in 0..EXPLOSION_FRAME_TICKS * 3 * EXPLOSION_CYCLES as u64 {
            game.tick(&idle()).unwrap();
        }
        assert_eq!(player_state(&game), ActorState::Gone);
    }

    #[test]
    fn test_update_pass_visits_back_to_front() {
        let mut registry = ActorRegistry::new();
        registry.insert(Actor::player(1));
        registry.insert(Actor::land(2, Position::new(0.0, 0.0), 1));
        registry.insert(Actor::shot(3, &Actor::player(9).object));
        registry.insert(Actor::background(4));
        registry.insert(Actor::ship(5, Position::new(0.0, 0.0), 1.0, None));

        let mut visits = Vec::new();
        for_each_update(&mut registry, |actor, pass| visits.push((actor.id, pass)));

        let expected: Vec<_> = [4, 2, 5, 3, 1]
            .into_iter()
            .flat_map(|id| [(id, UpdatePass::Status), (id, UpdatePass::Position)])
            .collect();
        assert_eq!(visits, expected);
    }

    #[test]
    fn test_status_is_checked_before_moving() {
        let mut game = GameManager::new(test_levels(2), test_config(3));
        let id = game.gameplay.next_actor_id();
        let player = game.gameplay.player(&game.registry).unwrap().object.clone();
        let mut shot = Actor::shot(id, &player);
        // Bottom edge one pixel below the top of the screen
        shot.object.position.set(600.0, 1.0 - SHOT_HEIGHT);
        game.registry.insert(shot);

        // Still visible when its status is checked, then flies off screen
        game.tick(&idle()).unwrap();
        let shot = game.registry().get(id).unwrap();
        assert!(shot.is_alive());
        assert_eq!(shot.object.position.y, 1.0 - SHOT_HEIGHT - SHOT_SPEED);

        game.tick(&idle()).unwrap();
        assert!(game.registry().get(id).is_none());
    }

    #[test]
    fn test_game_over_banner_scrolls_world() {
        let mut game = GameManager::new(test_levels(2), test_config(1));
        ram_player(&mut game);
        game.tick(&idle()).unwrap();

        let land_y = |game: &GameManager| {
            game.registry()
                .iter()
                .find(|a| a.kind == ActorKind::Land)
                .map(|a| a.object.position.y)
                .unwrap()
        };
        let before = land_y(&game);
        game.tick(&idle()).unwrap();
        assert_eq!(land_y(&game), before + BANNER_SCROLL_PX);
        // Gameplay is frozen while the banner shows
        assert_eq!(game.stats().lives, 0);
    }

    #[test]
    fn test_level_complete_advances_by_one() {
        let mut game = GameManager::new(test_levels(5), test_config(3));
        game.jump_to_level(2).unwrap();
        assert_eq!(game.levels().current().number(), 3);

        let mut ticks = 0;
        while game.phase() == GamePhase::Playing {
            game.tick(&idle()).unwrap();
            ticks += 1;
            assert!(ticks < 1000);
        }
        // One block of scroll at normal speed
        assert_eq!(ticks, (BLOCK_SIZE / SCROLL_NORMAL) as u64);
        assert!(matches!(
            game.phase(),
            GamePhase::ShowingLevelCompleteMessage { .. }
        ));
        assert!(game.stats().lives > 0);
        assert_eq!(game.levels().current_index(), 2);

        for _ in 0..BANNER {
            game.tick(&idle()).unwrap();
        }
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.levels().current().number(), 4);
        assert_eq!(game.gameplay().scroll(), 0.0);

        // Actors rebuilt from level 4's grid
        let land = game
            .registry()
            .iter()
            .find(|a| a.kind == ActorKind::Land)
            .unwrap();
        assert_eq!(land.object.width, 4.0 * BLOCK_SIZE);
        assert_eq!(land.object.position, Position::new(0.0, -BLOCK_SIZE));
        let player = game.gameplay().player(game.registry()).unwrap();
        assert_eq!(player.object.position.x, (SCREEN_WIDTH - PLAYER_WIDTH) / 2.0);
    }

    #[test]
    fn test_finishing_last_level_is_game_over() {
        let mut game = GameManager::new(test_levels(2), test_config(3));
        game.jump_to_level(1).unwrap();
        while game.phase() == GamePhase::Playing {
            game.tick(&idle()).unwrap();
        }
        assert!(matches!(
            game.phase(),
            GamePhase::ShowingGameOverMessage { .. }
        ));
        assert_eq!(game.levels().current_index(), 1);
    }

    #[test]
    fn test_advance_past_last_level_is_an_error() {
        let mut game = GameManager::new(test_levels(2), test_config(3));
        game.advance_level().unwrap();
        let err = game.advance_level().unwrap_err();
        assert!(matches!(err, GameError::NoNextLevel { current: 1 }));
        // No wrap, no stall elsewhere
        assert_eq!(game.levels().current_index(), 1);
    }

    #[test]
    fn test_lost_life_restarts_level() {
        let mut game = GameManager::new(test_levels(2), test_config(3));
        for _ in 0..5 {
            game.tick(&idle()).unwrap();
        }
        ram_player(&mut game);
        game.tick(&idle()).unwrap();
        assert_eq!(game.stats().lives, 2);
        assert_eq!(game.phase(), GamePhase::Playing);

        // World stands still while the player explodes
        let scroll = game.gameplay().scroll();
        game.tick(&idle()).unwrap();
        assert_eq!(game.gameplay().scroll(), scroll);

        let mut ticks = 0;
        while !game.gameplay().player_alive(game.registry()) {
            game.tick(&idle()).unwrap();
            ticks += 1;
            assert!(ticks < 500);
        }
        assert_eq!(game.gameplay().scroll(), 0.0);
        assert_eq!(game.stats().lives, 2);
        assert_eq!(game.levels().current_index(), 0);
    }

    #[test]
    fn test_separated_actors_never_react() {
        let mut player = Actor::player(1);
        player.object.position.set(464.0, 460.0);
        // Player hitbox right edge is 492; ship hitbox starts at 493
        let ship = Actor::ship(2, Position::new(487.0, 452.0), 1.0, None);
        let mut actors = vec![player, ship];
        let mut stats = GameplayStats::new(3);

        for frame in 1..=100 {
            let ctx = TickContext::new(frame, 0.0, EXPLOSION_FRAME_TICKS);
            assert!(collision::sweep(&mut actors, &mut stats, &ctx).is_empty());
        }
        assert_eq!(stats.lives, 3);
        assert_eq!(stats.score, 0);
        assert!(actors.iter().all(|a| a.state == ActorState::Alive));
    }

    #[test]
    fn test_escape_is_terminal() {
        let mut game = GameManager::new(test_levels(2), test_config(3));
        game.tick(&TickInput {
            quit: true,
            ..TickInput::default()
        })
        .unwrap();
        assert!(game.is_terminal());

        let scroll = game.gameplay().scroll();
        game.tick(&idle()).unwrap();
        assert!(game.is_terminal());
        assert_eq!(game.gameplay().scroll(), scroll);
    }

    #[test]
    fn test_difficulty_toggle_persists_and_applies_next_game() {
        let dir = tempfile::tempdir().unwrap();
        let store = DifficultyStore::new(dir.path().join("difficulty.txt"));
        let mut game = GameManager::load(store.clone()).unwrap();
        assert_eq!(game.difficulty(), Difficulty::Standard);

        let f1 = TickInput {
            toggle_difficulty: true,
            ..TickInput::default()
        };
        game.tick(&f1).unwrap();
        // Held key does not toggle again
        game.tick(&f1).unwrap();
        assert_eq!(game.difficulty(), Difficulty::Easy);
        assert_eq!(store.read_difficulty(), Difficulty::Easy);
        assert_eq!(game.config().difficulty, Difficulty::Standard);

        game.new_game();
        assert_eq!(game.config().difficulty, Difficulty::Easy);
        assert_eq!(game.stats().lives, Difficulty::Easy.starting_lives());

        let reloaded = GameManager::load(store).unwrap();
        assert_eq!(reloaded.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_autopilot_survives_built_in_level() {
        let levels = LevelRegistry::built_in().unwrap();
        let mut game = GameManager::new(levels, GameConfig::default());
        let input = TickInput {
            idle_mode: true,
            ..TickInput::default()
        };
        for _ in 0..600 {
            game.tick(&input).unwrap();
        }
        assert!(!game.is_terminal());
        assert!(game.stats().lives <= Difficulty::Standard.starting_lives());
    }
}
