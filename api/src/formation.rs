use crate::Position;

pub const MIN_GOALKEEPERS: u8 = 1;
pub const MIN_DEFENDERS: u8 = 3;
pub const MIN_FORWARDS: u8 = 1;
pub const MAX_PLAYERS: u8 = 11;

/// Legal starting shape: at least one goalkeeper, three defenders and one
/// forward, no more than eleven in total. Lines have no individual cap.
pub fn is_valid(gk: u8, def: u8, mid: u8, fwd: u8) -> bool {
    gk >= MIN_GOALKEEPERS
        && def >= MIN_DEFENDERS
        && fwd >= MIN_FORWARDS
        && u16::from(gk) + u16::from(def) + u16::from(mid) + u16::from(fwd)
            <= u16::from(MAX_PLAYERS)
}

/// Count tuple (goalkeepers, defenders, midfielders, forwards).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Formation {
    pub gk: u8,
    pub def: u8,
    pub mid: u8,
    pub fwd: u8,
}

impl Formation {
    /// Unknown positions are not counted.
    pub fn count(positions: impl IntoIterator<Item = Position>) -> Self {
        let mut formation = Formation::default();
        for position in positions {
            formation.add(position);
        }
        formation
    }

    pub fn add(&mut self, position: Position) {
        if let Some(line) = self.line_mut(position) {
            *line = line.saturating_add(1);
        }
    }

    pub fn remove(&mut self, position: Position) {
        if let Some(line) = self.line_mut(position) {
            *line = line.saturating_sub(1);
        }
    }

    /// Shape after swapping `out` for `incoming`.
    pub fn with_swap(mut self, out: Position, incoming: Position) -> Self {
        self.remove(out);
        self.add(incoming);
        self
    }

    pub fn is_valid(&self) -> bool {
        is_valid(self.gk, self.def, self.mid, self.fwd)
    }

    fn line_mut(&mut self, position: Position) -> Option<&mut u8> {
        match position {
            Position::Goalkeeper => Some(&mut self.gk),
            Position::Defender => Some(&mut self.def),
            Position::Midfielder => Some(&mut self.mid),
            Position::Forward => Some(&mut self.fwd),
            Position::Unknown => None,
        }
    }
}
