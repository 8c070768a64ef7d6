//! Human-readable console summaries of an `Overcooked` environment.
//!
//! Each `print_*` method writes the matching `String` builder to stdout.

use std::fmt;

use overcooked::mdp::{format_actions, Terrain};

use crate::Overcooked;

const RULE_WIDTH: usize = 60;

struct Rule;

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..RULE_WIDTH {
            f.write_str("=")?;
        }
        Ok(())
    }
}

struct InitSummary<'a>(&'a Overcooked);

impl fmt::Display for InitSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mdp = &self.0.mdp;
        writeln!(f, "{}", Rule)?;
        writeln!(f, "OVERCOOKED ENVIRONMENT INITIALIZED")?;
        writeln!(f, "{}", Rule)?;
        writeln!(f, "\nLayout: {}", mdp.layout_name())?;
        write!(f, "Grid dimensions: {}x{}", mdp.width(), mdp.height())
    }
}

struct StateInfo<'a>(&'a Overcooked);

impl fmt::Display for StateInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0.env.state();
        let pots = self.0.mdp.layout().positions_of(Terrain::Pot);

        writeln!(f, "\n--- Player Information ---")?;
        for (i, player) in state.players.iter().enumerate() {
            writeln!(f, "Player {}:", i)?;
            writeln!(f, "  Position: {:?}", player.position)?;
            writeln!(f, "  Orientation: {}", player.orientation)?;
            match &player.held_object {
                Some(obj) => writeln!(f, "  Held object: {}", obj)?,
                None => writeln!(f, "  Held object: None")?,
            }
        }

        writeln!(f, "\n--- Objects on Counters ---")?;
        let mut loose = state
            .objects
            .iter()
            .filter(|(pos, _)| !pots.contains(*pos))
            .peekable();
        if loose.peek().is_none() {
            writeln!(f, "  No objects on counters")?;
        }
        for (pos, obj) in loose {
            writeln!(f, "  Position {:?}: {}", pos, obj)?;
        }

        writeln!(f, "\n--- Pots State ---")?;
        for pot in &pots {
            match state.soup_at(*pot) {
                Some(soup) => writeln!(f, "  Pot {:?}: {}", pot, soup)?,
                None => writeln!(f, "  Pot {:?}: empty", pot)?,
            }
        }
        let orders: Vec<String> = state.all_orders.iter().map(|r| r.to_string()).collect();
        write!(f, "  Current orders: [{}]", orders.join(", "))
    }
}

struct ActionsSummary<'a>(&'a Overcooked);

impl fmt::Display for ActionsSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}", Rule)?;
        writeln!(f, "\n--- Available Actions ---")?;
        write!(f, "\n--- Environment Spaces ---")?;

        for (i, actions) in self.0.mdp.get_actions(self.0.env.state()).iter().enumerate() {
            let indices: Vec<String> = (0..actions.len()).map(|j| j.to_string()).collect();
            write!(f, "\nActions for player {}", i)?;
            write!(f, "\n- Number of actions: {}", actions.len())?;
            write!(f, "\n- Action indices: [{}]", indices.join(", "))?;
            write!(f, "\n- Action mappings: {}", format_actions(actions))?;
        }
        Ok(())
    }
}

impl Overcooked {
    /// Banner with the layout name and grid dimensions
    pub fn init_summary(&self) -> String {
        InitSummary(self).to_string()
    }

    pub fn print_init_summary(&self) {
        println!("{}", InitSummary(self));
    }

    /// Players, loose objects, pots and orders of the current state
    pub fn state_info(&self) -> String {
        StateInfo(self).to_string()
    }

    pub fn print_state_info(&self) {
        println!("{}", StateInfo(self));
    }

    /// Text rendering of the current state
    pub fn layout_visualization(&self) -> String {
        format!(
            "\nLayout Visualization:\n{}",
            self.mdp.state_string(self.env.state())
        )
    }

    pub fn visualize_layout(&self) {
        println!("{}", self.layout_visualization());
    }

    /// Actions available to each player in the current state
    pub fn actions_summary(&self) -> String {
        ActionsSummary(self).to_string()
    }

    pub fn display_actions(&self) {
        println!("{}", ActionsSummary(self));
    }
}
