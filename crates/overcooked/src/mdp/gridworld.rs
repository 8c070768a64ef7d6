//! The Overcooked MDP: start states, joint-action transitions and rendering.

use rand::seq::SliceRandom;
use rand::Rng;

use super::layout::{Layout, Terrain};
use super::{
    Action, Direction, MdpParams, ObjectState, OvercookedState, PlayerState, Position, Recipe,
    Soup,
};
use crate::{OvercookedError, Result};

/// Per-agent rewards produced by a single transition
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionInfo {
    /// Delivery rewards, attributed to the delivering player
    pub sparse_reward_by_agent: Vec<f32>,
    /// Shaping bonuses, attributed to the acting player
    pub shaped_reward_by_agent: Vec<f32>,
    /// Soups handed in at a serving location, ordered or not
    pub soups_delivered: u32,
}

impl TransitionInfo {
    fn new(num_players: usize) -> Self {
        Self {
            sparse_reward_by_agent: vec![0.0; num_players],
            shaped_reward_by_agent: vec![0.0; num_players],
            soups_delivered: 0,
        }
    }

    /// Team sparse reward
    pub fn sparse_reward(&self) -> f32 {
        self.sparse_reward_by_agent.iter().sum()
    }
}

/// Kitchen rules bound to a specific layout
#[derive(Clone, Debug)]
pub struct OvercookedGridworld {
    layout: Layout,
    params: MdpParams,
}

impl OvercookedGridworld {
    /// Build the MDP for a built-in layout with default parameters
    pub fn from_layout_name(name: &str) -> Result<Self> {
        Self::from_layout_name_with(name, MdpParams::default())
    }

    /// Build the MDP for a built-in layout with custom parameters
    pub fn from_layout_name_with(name: &str, params: MdpParams) -> Result<Self> {
        Self::from_layout(Layout::named(name)?, params)
    }

    pub fn from_layout(layout: Layout, params: MdpParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { layout, params })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn params(&self) -> &MdpParams {
        &self.params
    }

    pub fn layout_name(&self) -> &str {
        self.layout.name()
    }

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn height(&self) -> usize {
        self.layout.height()
    }

    pub fn num_players(&self) -> usize {
        self.layout.num_players()
    }

    fn start_orders(&self) -> Vec<Recipe> {
        self.params
            .start_orders
            .iter()
            .map(|ingredients| Recipe::new(ingredients.clone()))
            .collect()
    }

    /// Players on their layout start cells, facing north, empty kitchen
    pub fn get_standard_start_state(&self) -> OvercookedState {
        let players = self
            .layout
            .start_positions()
            .iter()
            .map(|&pos| PlayerState::new(pos, Direction::North))
            .collect();
        OvercookedState::new(players, self.start_orders())
    }

    /// Players on distinct random floor cells with random orientations
    pub fn get_random_start_state<R: Rng>(&self, rng: &mut R) -> OvercookedState {
        let mut floor = self.layout.positions_of(Terrain::Floor);
        floor.shuffle(rng);
        let players = floor
            .into_iter()
            .take(self.num_players())
            .map(|pos| {
                let orientation = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
                PlayerState::new(pos, orientation)
            })
            .collect();
        OvercookedState::new(players, self.start_orders())
    }

    /// Actions available to each player. Every action is always available.
    pub fn get_actions(&self, state: &OvercookedState) -> Vec<Vec<Action>> {
        state.players.iter().map(|_| Action::ALL.to_vec()).collect()
    }

    /// Apply a joint action and return the successor state with its rewards.
    ///
    /// Interactions resolve first, in player order, then movement, then pots
    /// cook for one tick.
    pub fn get_state_transition(
        &self,
        state: &OvercookedState,
        joint_action: &[Action],
    ) -> Result<(OvercookedState, TransitionInfo)> {
        if joint_action.len() != state.players.len() {
            return Err(OvercookedError::WrongNumberOfActions {
                expected: state.players.len(),
                actual: joint_action.len(),
            });
        }

        let mut next = state.clone();
        let mut info = TransitionInfo::new(state.players.len());

        self.resolve_interacts(&mut next, joint_action, &mut info);
        self.resolve_movement(&mut next, joint_action);
        self.step_environment_effects(&mut next);
        next.timestep += 1;

        Ok((next, info))
    }

    fn resolve_interacts(
        &self,
        state: &mut OvercookedState,
        joint_action: &[Action],
        info: &mut TransitionInfo,
    ) {
        let shaping = &self.params.shaping;

        for (i, action) in joint_action.iter().enumerate() {
            if *action != Action::Interact {
                continue;
            }
            let Some(target) = state.players[i].facing() else {
                continue;
            };
            let Some(terrain) = self.layout.terrain(target) else {
                continue;
            };

            match terrain {
                Terrain::Floor => {}
                Terrain::Counter => {
                    let player = &mut state.players[i];
                    if player.has_object() && !state.objects.contains_key(&target) {
                        if let Some(obj) = player.held_object.take() {
                            state.objects.insert(target, obj);
                        }
                    } else if !player.has_object() {
                        if let Some(obj) = state.objects.remove(&target) {
                            player.held_object = Some(obj);
                        }
                    }
                }
                Terrain::OnionDispenser => {
                    let player = &mut state.players[i];
                    if !player.has_object() {
                        player.held_object = Some(ObjectState::Onion);
                    }
                }
                Terrain::TomatoDispenser => {
                    let player = &mut state.players[i];
                    if !player.has_object() {
                        player.held_object = Some(ObjectState::Tomato);
                    }
                }
                Terrain::DishDispenser => {
                    if !state.players[i].has_object() {
                        if self.is_dish_pickup_useful(state) {
                            info.shaped_reward_by_agent[i] += shaping.dish_pickup;
                        }
                        state.players[i].held_object = Some(ObjectState::Dish);
                    }
                }
                Terrain::Pot => self.interact_with_pot(state, i, target, info),
                Terrain::Serving => {
                    let player = &mut state.players[i];
                    if !matches!(player.held_object, Some(ObjectState::Soup(_))) {
                        continue;
                    }
                    if let Some(ObjectState::Soup(soup)) = player.held_object.take() {
                        let recipe = soup.recipe();
                        let reward = if state.all_orders.contains(&recipe) {
                            self.params.delivery_reward
                        } else {
                            0.0
                        };
                        tracing::debug!(player = i, %recipe, reward, "Soup delivered");
                        info.sparse_reward_by_agent[i] += reward;
                        info.soups_delivered += 1;
                    }
                }
            }
        }
    }

    fn interact_with_pot(
        &self,
        state: &mut OvercookedState,
        i: usize,
        pot: Position,
        info: &mut TransitionInfo,
    ) {
        let shaping = &self.params.shaping;
        let held = state.players[i].held_object.clone();

        match held {
            Some(ObjectState::Dish) => {
                if state.soup_at(pot).is_some_and(Soup::is_ready) {
                    if let Some(soup) = state.objects.remove(&pot) {
                        state.players[i].held_object = Some(soup);
                        info.shaped_reward_by_agent[i] += shaping.soup_pickup;
                    }
                }
            }
            Some(obj) => {
                let Some(ingredient) = obj.as_ingredient() else {
                    return;
                };
                let accepts = match state.soup_at(pot) {
                    None => !state.objects.contains_key(&pot),
                    Some(soup) => {
                        soup.is_idle() && soup.ingredients().len() < self.params.max_ingredients
                    }
                };
                if accepts {
                    let entry = state
                        .objects
                        .entry(pot)
                        .or_insert_with(|| ObjectState::Soup(Soup::new(self.params.cook_time)));
                    if let ObjectState::Soup(soup) = entry {
                        soup.add_ingredient(ingredient);
                    }
                    state.players[i].held_object = None;
                    info.shaped_reward_by_agent[i] += shaping.placement_in_pot;
                }
            }
            None => {
                if let Some(ObjectState::Soup(soup)) = state.objects.get_mut(&pot) {
                    if soup.is_idle() && !soup.ingredients().is_empty() {
                        soup.begin_cooking();
                    }
                }
            }
        }
    }

    /// A dish is worth fetching when fewer dishes are out than soups cooking or ready
    fn is_dish_pickup_useful(&self, state: &OvercookedState) -> bool {
        let dishes = state
            .all_objects()
            .filter(|(_, o)| matches!(o, ObjectState::Dish))
            .count();
        let soups_in_progress = self
            .layout
            .positions_of(Terrain::Pot)
            .into_iter()
            .filter_map(|p| state.soup_at(p))
            .filter(|s| s.is_cooking() || s.is_ready())
            .count();
        dishes < soups_in_progress
    }

    fn resolve_movement(&self, state: &mut OvercookedState, joint_action: &[Action]) {
        let old_positions = state.player_positions();
        let mut new_positions = old_positions.clone();

        for (i, action) in joint_action.iter().enumerate() {
            if let Action::Move(direction) = action {
                state.players[i].orientation = *direction;
                if let Some(target) = direction.step_from(old_positions[i]) {
                    if self.layout.is_walkable(target) {
                        new_positions[i] = target;
                    }
                }
            }
        }

        if !Self::is_collision(&old_positions, &new_positions) {
            for (player, pos) in state.players.iter_mut().zip(new_positions) {
                player.position = pos;
            }
        }
    }

    /// Two players ending on the same cell, or swapping cells
    fn is_collision(old: &[Position], new: &[Position]) -> bool {
        for i in 0..new.len() {
            for j in (i + 1)..new.len() {
                if new[i] == new[j] {
                    return true;
                }
                if new[i] == old[j] && new[j] == old[i] {
                    return true;
                }
            }
        }
        false
    }

    fn step_environment_effects(&self, state: &mut OvercookedState) {
        for pot in self.layout.positions_of(Terrain::Pot) {
            if let Some(ObjectState::Soup(soup)) = state.objects.get_mut(&pot) {
                soup.tick();
            }
        }
    }

    /// Text rendering: two characters per cell, one row per line.
    ///
    /// Players show as an orientation arrow followed by the held object's
    /// letter, or their index when empty-handed. Counters holding an object
    /// show its letter. Pots show `P` followed by the ingredient count while
    /// idle, `~` while cooking and `!` when ready.
    pub fn state_string(&self, state: &OvercookedState) -> String {
        let mut rows = Vec::with_capacity(self.height());
        for y in 0..self.height() {
            let mut row = String::with_capacity(self.width() * 2);
            for x in 0..self.width() {
                let pos = (x, y);
                if let Some((idx, player)) = state
                    .players
                    .iter()
                    .enumerate()
                    .find(|(_, p)| p.position == pos)
                {
                    row.push(player.orientation.arrow());
                    match &player.held_object {
                        Some(obj) => row.push(obj.symbol()),
                        None => row.push_str(&idx.to_string()),
                    }
                    continue;
                }

                let terrain = self.layout.terrain(pos).unwrap_or(Terrain::Counter);
                match (terrain, state.get_object(pos)) {
                    (Terrain::Pot, Some(ObjectState::Soup(soup))) => {
                        row.push('P');
                        if soup.is_ready() {
                            row.push('!');
                        } else if soup.is_cooking() {
                            row.push('~');
                        } else {
                            row.push_str(&soup.ingredients().len().to_string());
                        }
                    }
                    (_, Some(obj)) => {
                        row.push(obj.symbol());
                        row.push(' ');
                    }
                    (t, None) => {
                        row.push(t.symbol());
                        row.push(' ');
                    }
                }
            }
            rows.push(row);
        }
        rows.join("\n")
    }
}
