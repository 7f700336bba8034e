/// Predefined patterns for initializing the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// A 2x2 still life
    Block,
    /// A period-2 oscillator, vertical phase
    Blinker,
    /// A diagonal spaceship heading down-right
    Glider,
}

/// Patterns placed on the grid at startup, with their top-left origins.
pub const STARTUP_LAYOUT: [(Pattern, (usize, usize)); 3] = [
    (Pattern::Block, (1, 1)),
    (Pattern::Blinker, (6, 1)),
    (Pattern::Glider, (11, 1)),
];

impl Pattern {
    /// Live-cell offsets `(dx, dy)` from the pattern's top-left corner
    pub fn offsets(&self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Block => &[
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ],
            Pattern::Blinker => &[
                (0, 0),
                (0, 1),
                (0, 2),
            ],
            Pattern::Glider => &[
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
        }
    }

    /// Absolute cell positions for the pattern placed at `origin`
    pub fn cells(&self, origin: (usize, usize)) -> impl Iterator<Item = (usize, usize)> {
        let (ox, oy) = origin;
        self.offsets().iter().map(move |&(dx, dy)| (ox + dx, oy + dy))
    }
}
