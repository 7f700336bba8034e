use crate::config::Config;
use crate::grid::Grid;
use crate::patterns::{Pattern, STARTUP_LAYOUT};
use crate::rules;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Discrete user inputs understood by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleCell { x: usize, y: usize },
    SeedRandom { x: usize, y: usize },
    TogglePause,
    Step,
}

/// Cells the renderer has to repaint since it last asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Damage {
    None,
    Full,
    /// Flat indices of changed cells; may contain duplicates.
    Cells(Vec<usize>),
}

impl Damage {
    fn extend(&mut self, cells: impl IntoIterator<Item = usize>) {
        match self {
            Damage::Full => {}
            Damage::Cells(list) => list.extend(cells),
            Damage::None => {
                let list: Vec<usize> = cells.into_iter().collect();
                if !list.is_empty() {
                    *self = Damage::Cells(list);
                }
            }
        }
    }
}

/// Everything the control loop owns about the running automaton.
pub struct Simulation {
    current: Grid,
    next: Grid,
    running: bool,
    step_requested: bool,
    generation: u64,
    damage: Damage,
    seed_radius: usize,
    seed_probability: f64,
    rng: StdRng,
}

impl Simulation {
    /// Empty simulation sized from `config`, running, with nothing seeded.
    pub fn new(config: &Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::from_grid(Grid::new(config.grid_width(), config.grid_height()), config, rng)
    }

    /// Simulation seeded with the startup block, blinker and glider.
    pub fn with_startup_pattern(config: &Config) -> Self {
        let mut sim = Self::new(config);
        for (pattern, origin) in STARTUP_LAYOUT {
            sim.current.seed(pattern, origin);
        }
        log::info!(
            "Seeded {}x{} grid with {} live cells",
            sim.current.width(),
            sim.current.height(),
            sim.current.live_count()
        );
        sim
    }

    pub fn from_grid(grid: Grid, config: &Config, rng: StdRng) -> Self {
        let next = Grid::new(grid.width(), grid.height());
        Self {
            current: grid,
            next,
            running: true,
            step_requested: false,
            generation: 0,
            damage: Damage::Full,
            seed_radius: config.seed_radius,
            seed_probability: config.seed_probability,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn seed(&mut self, pattern: Pattern, origin: (usize, usize)) {
        let born: Vec<usize> = pattern
            .cells(origin)
            .filter(|&(x, y)| self.current.in_bounds(x, y) && !self.current.get(x, y))
            .map(|(x, y)| self.current.index(x, y))
            .collect();
        self.current.seed(pattern, origin);
        self.damage.extend(born);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::TogglePause => {
                self.running = !self.running;
                self.step_requested = false;
                log::info!("{} at generation {}", if self.running { "Resumed" } else { "Paused" }, self.generation);
            }
            Command::Step => {
                if !self.running {
                    self.step_requested = true;
                }
            }
            Command::ToggleCell { x, y } => {
                if self.current.in_bounds(x, y) {
                    let alive = self.current.toggle(x, y);
                    self.damage.extend([self.current.index(x, y)]);
                    log::debug!("Toggled cell ({x}, {y}) to {}", if alive { "alive" } else { "dead" });
                }
            }
            Command::SeedRandom { x, y } => {
                if self.current.in_bounds(x, y) {
                    let born = self.current.random_fill(x, y, self.seed_radius, self.seed_probability, &mut self.rng);
                    log::info!("Seeded {} random cells around ({x}, {y})", born.len());
                    self.damage.extend(born);
                }
            }
        }
    }

    /// Advance one generation if running or if a single step was requested.
    /// Called once per frame; returns whether a generation was computed.
    pub fn tick(&mut self) -> bool {
        if self.running || std::mem::take(&mut self.step_requested) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Compute the next generation, record the changed cells and swap buffers.
    pub fn advance(&mut self) {
        rules::step(&self.current, &mut self.next);

        let changed = self
            .current
            .cells()
            .iter()
            .zip(self.next.cells())
            .enumerate()
            .filter(|(_, (old, new))| old != new)
            .map(|(idx, _)| idx);
        self.damage.extend(changed);

        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        log::trace!("Generation {}: {} live cells", self.generation, self.current.live_count());
    }

    /// Hand the accumulated damage to the renderer and start a fresh list.
    pub fn take_damage(&mut self) -> Damage {
        std::mem::replace(&mut self.damage, Damage::None)
    }
}
