//! Dynamic simulation state: players, objects, soups and orders.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Direction, Position};

/// Soup ingredient
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ingredient {
    Onion,
    Tomato,
}

impl Ingredient {
    pub const fn name(self) -> &'static str {
        match self {
            Ingredient::Onion => "onion",
            Ingredient::Tomato => "tomato",
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An order: an unordered multiset of ingredients
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Recipe {
    ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(mut ingredients: Vec<Ingredient>) -> Self {
        ingredients.sort();
        Self { ingredients }
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.ingredients.iter().map(|i| i.name()).collect();
        write!(f, "Recipe({})", names.join(", "))
    }
}

/// Contents of a pot, or a soup carried in a dish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Soup {
    ingredients: Vec<Ingredient>,
    /// `None` while idle; ticks elapsed since cooking started otherwise
    cooking_tick: Option<u32>,
    cook_time: u32,
}

impl Soup {
    /// An empty, idle soup
    pub fn new(cook_time: u32) -> Self {
        Self {
            ingredients: Vec::new(),
            cooking_tick: None,
            cook_time,
        }
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        debug_assert!(self.is_idle(), "cannot add ingredients to a cooking soup");
        self.ingredients.push(ingredient);
    }

    pub fn begin_cooking(&mut self) {
        debug_assert!(self.is_idle() && !self.ingredients.is_empty());
        self.cooking_tick = Some(0);
    }

    /// Advance cooking by one tick; no-op when idle or already done
    pub fn tick(&mut self) {
        if let Some(t) = self.cooking_tick {
            if t < self.cook_time {
                self.cooking_tick = Some(t + 1);
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        self.cooking_tick.is_none()
    }

    pub fn is_cooking(&self) -> bool {
        matches!(self.cooking_tick, Some(t) if t < self.cook_time)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.cooking_tick, Some(t) if t >= self.cook_time)
    }

    /// Ticks left until ready; zero when idle or done
    pub fn cook_time_remaining(&self) -> u32 {
        self.cooking_tick
            .map(|t| self.cook_time.saturating_sub(t))
            .unwrap_or(0)
    }

    pub fn count(&self, ingredient: Ingredient) -> usize {
        self.ingredients.iter().filter(|&&i| i == ingredient).count()
    }

    pub fn recipe(&self) -> Recipe {
        Recipe::new(self.ingredients.clone())
    }
}

impl fmt::Display for Soup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.ingredients.iter().map(|i| i.name()).collect();
        let status = match self.cooking_tick {
            None => "idle".to_string(),
            Some(_) if self.is_ready() => "ready".to_string(),
            Some(t) => format!("cooking {}/{}", t, self.cook_time),
        };
        write!(f, "soup[{}]({})", names.join(", "), status)
    }
}

/// A movable object, either held by a player or lying on a cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectState {
    Onion,
    Tomato,
    Dish,
    Soup(Soup),
}

impl ObjectState {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectState::Onion => "onion",
            ObjectState::Tomato => "tomato",
            ObjectState::Dish => "dish",
            ObjectState::Soup(_) => "soup",
        }
    }

    /// The ingredient this object is, if it is a raw ingredient
    pub fn as_ingredient(&self) -> Option<Ingredient> {
        match self {
            ObjectState::Onion => Some(Ingredient::Onion),
            ObjectState::Tomato => Some(Ingredient::Tomato),
            _ => None,
        }
    }

    /// Single-letter code used by the text renderer
    pub fn symbol(&self) -> char {
        match self {
            ObjectState::Onion => 'o',
            ObjectState::Tomato => 't',
            ObjectState::Dish => 'd',
            ObjectState::Soup(_) => 's',
        }
    }
}

impl fmt::Display for ObjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectState::Soup(soup) => write!(f, "{}", soup),
            other => f.write_str(other.name()),
        }
    }
}

/// A single player
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    pub position: Position,
    pub orientation: Direction,
    pub held_object: Option<ObjectState>,
}

impl PlayerState {
    pub fn new(position: Position, orientation: Direction) -> Self {
        Self {
            position,
            orientation,
            held_object: None,
        }
    }

    pub fn has_object(&self) -> bool {
        self.held_object.is_some()
    }

    /// Cell the player is facing
    pub fn facing(&self) -> Option<Position> {
        self.orientation.step_from(self.position)
    }
}

/// Full dynamic state of a kitchen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OvercookedState {
    pub players: Vec<PlayerState>,
    /// Objects not held by a player: counter items and pot contents
    pub objects: BTreeMap<Position, ObjectState>,
    /// Orders that can currently be fulfilled
    pub all_orders: Vec<Recipe>,
    pub timestep: u32,
}

impl OvercookedState {
    pub fn new(players: Vec<PlayerState>, all_orders: Vec<Recipe>) -> Self {
        Self {
            players,
            objects: BTreeMap::new(),
            all_orders,
            timestep: 0,
        }
    }

    pub fn player_positions(&self) -> Vec<Position> {
        self.players.iter().map(|p| p.position).collect()
    }

    pub fn has_object(&self, pos: Position) -> bool {
        self.objects.contains_key(&pos)
    }

    pub fn get_object(&self, pos: Position) -> Option<&ObjectState> {
        self.objects.get(&pos)
    }

    /// Soup stored at `pos`, if any
    pub fn soup_at(&self, pos: Position) -> Option<&Soup> {
        match self.objects.get(&pos) {
            Some(ObjectState::Soup(soup)) => Some(soup),
            _ => None,
        }
    }

    /// Objects held by players, paired with the holder's position
    pub fn held_objects(&self) -> impl Iterator<Item = (Position, &ObjectState)> {
        self.players
            .iter()
            .filter_map(|p| p.held_object.as_ref().map(|o| (p.position, o)))
    }

    /// Every object in the kitchen with its location
    pub fn all_objects(&self) -> impl Iterator<Item = (Position, &ObjectState)> {
        self.objects
            .iter()
            .map(|(&pos, obj)| (pos, obj))
            .chain(self.held_objects())
    }
}
