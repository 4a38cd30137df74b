//! Fixed timestep simulation tick
//!
//! One call advances the whole game by one 1/30 s step. The surrounding
//! application owns the clock; nothing in here reads time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::ActorUpdate;
use super::bait::BaitChange;
use super::event::GameEvent;
use super::grid::{HazardCause, TileEffect};
use super::snapshot::RenderSnapshot;
use super::state::{GamePhase, GameState};

/// Pointer state for one tick, computed once by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerEdge {
    #[default]
    Idle,
    Held,
    /// Lifted since the previous tick (including press-and-release within one tick)
    Released,
}

impl PointerEdge {
    pub fn is_released(self) -> bool {
        self == PointerEdge::Released
    }
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub pointer: PointerEdge,
    /// Canvas-space pointer position, already offset-corrected
    pub pointer_pos: Vec2,
    /// Snapshot of the loader's "all images ready" flag
    pub assets_loaded: bool,
}

impl TickInput {
    /// A completed tap at `(x, y)`
    pub fn tap(x: f32, y: f32) -> Self {
        Self {
            pointer: PointerEdge::Released,
            pointer_pos: Vec2::new(x, y),
            assets_loaded: true,
        }
    }
}

impl GameState {
    /// Run one tick and return what the renderer should show
    pub fn advance(&mut self, input: &TickInput) -> RenderSnapshot {
        tick(self, input);
        RenderSnapshot::capture(self)
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;
    state.last_input = input.pointer;
    let released = input.pointer.is_released();

    match state.phase {
        GamePhase::Start => {
            if input.assets_loaded && released {
                set_phase(state, GamePhase::Ready, &mut events);
            }
        }
        GamePhase::Ready => {
            if released {
                start_level(state, &mut events);
            }
        }
        GamePhase::Play => tick_play(state, input, &mut events),
        GamePhase::Victory => {
            if released {
                state.session = None;
                state.level_index += 1;
                state.attempts = 0;
                set_phase(state, GamePhase::Ready, &mut events);
            }
        }
        GamePhase::Defeat => {
            if released {
                state.session = None;
                set_phase(state, GamePhase::Ready, &mut events);
            }
        }
        GamePhase::UltraVictory => {
            if released {
                state.level_index = 0;
                state.attempts = 0;
                set_phase(state, GamePhase::Start, &mut events);
            }
        }
    }

    events
}

fn set_phase(state: &mut GameState, to: GamePhase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    if from == to {
        return;
    }
    log::info!("Phase {:?} -> {:?} (level {})", from, to, state.level_index + 1);
    state.phase = to;
    events.push(GameEvent::PhaseChanged { from, to });
}

/// Ready -> Play, or UltraVictory past the last level. A level that fails to
/// load leaves the game in Ready.
fn start_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.has_more_levels() {
        state.session = None;
        set_phase(state, GamePhase::UltraVictory, events);
        return;
    }

    match state.load_session() {
        Ok(session) => {
            log::info!(
                "Starting level {} '{}' ({} cameras)",
                state.level_index + 1,
                state.level_name().unwrap_or_default(),
                session.grid.goals_total()
            );
            state.session = Some(session);
            state.attempts += 1;
            events.push(GameEvent::LevelStarted {
                index: state.level_index,
            });
            set_phase(state, GamePhase::Play, events);
        }
        Err(e) => {
            log::warn!("Refusing to start level {}: {}", state.level_index + 1, e);
            events.push(GameEvent::LevelRejected {
                index: state.level_index,
                reason: e.to_string(),
            });
        }
    }
}

fn tick_play(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    let settings = &state.settings;
    let Some(session) = state.session.as_mut() else {
        log::warn!("Play phase without a loaded level");
        set_phase(state, GamePhase::Ready, events);
        return;
    };

    // 1. Terrain under the penguin
    let pos = session.actor.pos;
    let erosion = settings.erosion_for(session.actor.weight);
    let cell = session.grid.cell_at(pos.x, pos.y);
    let next = match session.grid.occupy(pos.x, pos.y, erosion) {
        TileEffect::OutOfBounds => Some(hazard(HazardCause::OutOfBounds, events)),
        TileEffect::Hazard => Some(hazard(HazardCause::Water, events)),
        TileEffect::Eroded { remaining } => {
            if let Some((col, row)) = cell {
                log::trace!("Ice ({}, {}) down to {}", col, row, remaining);
                events.push(GameEvent::IceEroded { col, row, remaining });
            }
            None
        }
        TileEffect::GoalReached { all_goals_reached } => {
            if let Some((col, row)) = cell {
                events.push(GameEvent::GoalReached {
                    col,
                    row,
                    completed: session.grid.goals_completed(),
                    total: session.grid.goals_total(),
                });
            }
            all_goals_reached.then_some(GamePhase::Victory)
        }
        TileEffect::Neutral => None,
    };
    if let Some(next) = next {
        set_phase(state, next, events);
        return;
    }

    // 2. Taps place or pick up fish
    if input.pointer.is_released() {
        match session.bait.handle_release(input.pointer_pos) {
            BaitChange::Placed(b) => events.push(GameEvent::BaitPlaced { pos: b.pos }),
            BaitChange::Removed(b) => events.push(GameEvent::BaitRemoved { pos: b.pos }),
        }
    }

    // 3. Physics
    if session.actor.update(session.bait.target()) == ActorUpdate::BaitConsumed {
        if let Some(bait) = session.bait.consume() {
            session.actor.gain_weight(settings.weight_gain);
            log::debug!("Fish {} eaten, weight now {}", bait.id, session.actor.weight);
            events.push(GameEvent::BaitConsumed {
                pos: bait.pos,
                weight: session.actor.weight,
            });
        }
    }

    // 4. Sliding off the canvas ends the attempt on the same tick
    let pos = session.actor.pos;
    if session.grid.cell_at(pos.x, pos.y).is_none() {
        let next = hazard(HazardCause::OutOfBounds, events);
        set_phase(state, next, events);
    }
}

fn hazard(cause: HazardCause, events: &mut Vec<GameEvent>) -> GamePhase {
    log::debug!("Hazard: {:?}", cause);
    events.push(GameEvent::Hazard { cause });
    GamePhase::Defeat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{LevelDef, LevelPack};
    use crate::settings::Settings;
    use crate::sim::grid::Tile;

    fn idle() -> TickInput {
        TickInput {
            assets_loaded: true,
            ..Default::default()
        }
    }

    fn state_with(levels: Vec<LevelDef>) -> GameState {
        GameState::new(LevelPack::new("test", levels), Settings::default())
    }

    /// Start -> Ready -> Play
    fn enter_play(state: &mut GameState) {
        tick(state, &TickInput::tap(1.0, 1.0));
        assert_eq!(state.phase, GamePhase::Ready);
        tick(state, &TickInput::tap(1.0, 1.0));
        assert_eq!(state.phase, GamePhase::Play);
    }

    #[test]
    fn test_start_waits_for_assets() {
        let mut state = state_with(vec![LevelDef::new("a", 1, 1, "S")]);
        let mut input = TickInput::tap(5.0, 5.0);
        input.assets_loaded = false;
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Start);

        // Loaded but no tap
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Start);

        let events = tick(&mut state, &TickInput::tap(5.0, 5.0));
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(
            events,
            vec![GameEvent::PhaseChanged { from: GamePhase::Start, to: GamePhase::Ready }]
        );
    }

    #[test]
    fn test_ready_to_play_loads_level() {
        let mut state = state_with(vec![LevelDef::new("a", 2, 1, "S#")]);
        enter_play(&mut state);
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.actor.pos, Vec2::new(16.0, 16.0));
        // The tap that started the level does not drop a fish
        assert!(session.bait.is_empty());
        assert_eq!(state.attempts, 1);
    }

    #[test]
    fn test_held_pointer_places_nothing() {
        let mut state = state_with(vec![LevelDef::new("a", 4, 1, "S###")]);
        enter_play(&mut state);
        let held = TickInput {
            pointer: PointerEdge::Held,
            pointer_pos: Vec2::new(100.0, 16.0),
            assets_loaded: true,
        };
        for _ in 0..3 {
            tick(&mut state, &held);
        }
        assert!(state.session.as_ref().unwrap().bait.is_empty());

        let events = tick(&mut state, &TickInput::tap(100.0, 16.0));
        assert!(events.contains(&GameEvent::BaitPlaced { pos: Vec2::new(100.0, 16.0) }));
    }

    #[test]
    fn test_last_input_is_recorded() {
        let mut state = state_with(vec![LevelDef::new("a", 1, 1, "S")]);
        assert_eq!(state.last_input, PointerEdge::Idle);

        let held = TickInput {
            pointer: PointerEdge::Held,
            ..idle()
        };
        assert_eq!(state.advance(&held).last_input, PointerEdge::Held);
        assert_eq!(state.last_input, PointerEdge::Held);

        let snap = state.advance(&TickInput::tap(3.0, 3.0));
        assert_eq!(snap.last_input, PointerEdge::Released);
        assert_eq!(state.advance(&idle()).last_input, PointerEdge::Idle);
    }

    #[test]
    fn test_second_tap_picks_fish_back_up() {
        let mut state = state_with(vec![LevelDef::new("a", 8, 1, "S#######")]);
        enter_play(&mut state);
        tick(&mut state, &TickInput::tap(200.0, 16.0));
        let events = tick(&mut state, &TickInput::tap(205.0, 20.0));
        assert!(events.contains(&GameEvent::BaitRemoved { pos: Vec2::new(200.0, 16.0) }));
        assert!(state.session.as_ref().unwrap().bait.is_empty());
    }

    #[test]
    fn test_eating_fish_adds_weight() {
        let mut state = state_with(vec![LevelDef::new("a", 4, 1, "S###")]);
        enter_play(&mut state);
        tick(&mut state, &TickInput::tap(60.0, 16.0));
        let mut eaten = None;
        for _ in 0..30 {
            let events = tick(&mut state, &idle());
            if let Some(e) = events.iter().find(|e| matches!(e, GameEvent::BaitConsumed { .. })) {
                eaten = Some(e.clone());
                break;
            }
        }
        let settings = Settings::default();
        assert_eq!(
            eaten,
            Some(GameEvent::BaitConsumed {
                pos: Vec2::new(60.0, 16.0),
                weight: settings.initial_weight + settings.weight_gain,
            })
        );
        assert_eq!(state.phase, GamePhase::Play);
    }

    /// Scenario A: two cameras reached through a single ice tile
    #[test]
    fn test_scenario_victory_on_second_goal() {
        let mut state = state_with(vec![LevelDef::new("A", 3, 3, "S   0 XX ")]);
        enter_play(&mut state);
        assert_eq!(state.session.as_ref().unwrap().grid.goals_total(), 2);

        // Diagonal onto the ice, down to the right camera, then left
        let taps = [(40.0, 40.0), (40.0, 72.0), (12.0, 72.0)];
        let mut goal_events = 0;
        let mut victory_tick_goal = None;
        for i in 0..120 {
            let input = match taps.get(i) {
                Some(&(x, y)) => TickInput::tap(x, y),
                None => idle(),
            };
            let events = tick(&mut state, &input);
            assert!(
                !events.iter().any(|e| matches!(e, GameEvent::Hazard { .. })),
                "penguin fell in: {:?}",
                events
            );
            let reached: Vec<u32> = events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::GoalReached { completed, .. } => Some(*completed),
                    _ => None,
                })
                .collect();
            goal_events += reached.len();
            if state.phase != GamePhase::Play {
                victory_tick_goal = reached.last().copied();
                break;
            }
        }

        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(goal_events, 2);
        // Victory fires on the very tick the second camera is reached
        assert_eq!(victory_tick_goal, Some(2));
        let grid = &state.session.as_ref().unwrap().grid;
        assert_eq!(grid.goals_completed(), 2);
        assert_eq!(grid.get(0, 2), Some(Tile::GoalDone));
        assert_eq!(grid.get(1, 2), Some(Tile::GoalDone));
    }

    /// Scenario B: sliding past the right edge
    #[test]
    fn test_scenario_defeat_when_crossing_edge() {
        let mut state = state_with(vec![LevelDef::new("B", 3, 1, "S##")]);
        enter_play(&mut state);
        {
            let actor = &mut state.session.as_mut().unwrap().actor;
            actor.pos = Vec2::new(90.0, 16.0);
            actor.vel = Vec2::new(8.0, 0.0);
        }

        let events = tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Defeat);
        assert!(events.contains(&GameEvent::Hazard { cause: HazardCause::OutOfBounds }));
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Play,
            to: GamePhase::Defeat
        }));
        assert!(state.session.as_ref().unwrap().actor.pos.x >= 96.0);
    }

    /// Scenario C: standing still on strength-10 ice at weight 1
    #[test]
    fn test_scenario_ice_gives_way() {
        let mut state = state_with(vec![LevelDef::new("C", 2, 1, "0X")]);
        enter_play(&mut state);
        assert_eq!(state.session.as_ref().unwrap().actor.weight, 1);

        for t in 1..=10u8 {
            let events = tick(&mut state, &idle());
            assert_eq!(
                events,
                vec![GameEvent::IceEroded { col: 0, row: 0, remaining: 10 - t }]
            );
            assert_eq!(state.phase, GamePhase::Play);
        }

        let events = tick(&mut state, &idle());
        assert!(events.contains(&GameEvent::Hazard { cause: HazardCause::Water }));
        assert_eq!(state.phase, GamePhase::Defeat);
    }

    /// Scenario D: tapping through Ready with no levels left
    #[test]
    fn test_scenario_ultra_victory_past_last_level() {
        let mut state = state_with(vec![LevelDef::new("a", 1, 1, "S")]);
        state.phase = GamePhase::Ready;
        state.level_index = 1;
        tick(&mut state, &TickInput::tap(0.0, 0.0));
        assert_eq!(state.phase, GamePhase::UltraVictory);
        assert!(state.session.is_none());

        tick(&mut state, &TickInput::tap(0.0, 0.0));
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.level_index, 0);
    }

    #[test]
    fn test_victory_advances_and_defeat_retries() {
        let mut state = state_with(vec![
            LevelDef::new("one", 2, 1, "0X"),
            LevelDef::new("two", 1, 1, "S"),
        ]);
        state.settings.weight_gain = 0;
        state.settings.erosion_rate = 100;
        enter_play(&mut state);

        // Strength 10 ice vs erosion 100: gone after one tick
        tick(&mut state, &idle());
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Defeat);

        tick(&mut state, &TickInput::tap(0.0, 0.0));
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.level_index, 0);
        tick(&mut state, &TickInput::tap(0.0, 0.0));
        assert_eq!(state.attempts, 2);

        // Jump to a cleared state and move on
        state.phase = GamePhase::Victory;
        tick(&mut state, &TickInput::tap(0.0, 0.0));
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.attempts, 0);
        assert!(state.session.is_none());
    }

    #[test]
    fn test_level_without_cameras_never_clears() {
        let mut state = state_with(vec![LevelDef::new("empty", 1, 1, "S")]);
        enter_play(&mut state);
        for _ in 0..10 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.phase, GamePhase::Play);
    }

    #[test]
    fn test_broken_level_stays_ready() {
        let mut state = state_with(vec![LevelDef::new("broken", 0, 0, "")]);
        tick(&mut state, &TickInput::tap(0.0, 0.0));
        let events = tick(&mut state, &TickInput::tap(0.0, 0.0));
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.session.is_none());
        assert!(matches!(
            events.as_slice(),
            [GameEvent::LevelRejected { index: 0, .. }]
        ));
    }

    #[test]
    fn test_determinism() {
        let level = LevelDef::from_rows("d", 6, &["S99999", "999999", "99999X"]);
        let mut state1 = state_with(vec![level.clone()]);
        let mut state2 = state_with(vec![level]);

        let inputs = [
            TickInput::tap(0.0, 0.0),
            TickInput::tap(0.0, 0.0),
            TickInput::tap(150.0, 60.0),
            idle(),
            TickInput::tap(170.0, 80.0),
            idle(),
            idle(),
        ];

        for input in &inputs {
            let a = state1.advance(input);
            let b = state2.advance(input);
            assert_eq!(a, b);
        }
        assert_eq!(state1.time_ticks, inputs.len() as u64);
    }
}
