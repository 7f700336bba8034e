use life_view::patterns::STARTUP_LAYOUT;
use life_view::{rules, Command, Config, Grid, Pattern, Simulation};

fn seeded_config() -> Config {
    Config { rng_seed: Some(2024), ..Config::default() }
}

#[test]
fn lone_blinker_returns_after_100_generations() {
    let config = seeded_config();
    let mut grid = Grid::new(80, 60);
    grid.seed(Pattern::Blinker, (6, 1));
    let initial = grid.clone();

    let mut sim = Simulation::new(&config);
    sim.seed(Pattern::Blinker, (6, 1));
    assert_eq!(sim.grid(), &initial);

    for _ in 0..100 {
        assert!(sim.tick());
    }
    assert_eq!(sim.generation(), 100);
    assert_eq!(sim.grid(), &initial);
}

#[test]
fn startup_block_and_blinker_survive_the_glider() {
    let mut sim = Simulation::with_startup_pattern(&seeded_config());
    for _ in 0..2 {
        sim.tick();
    }
    let grid = sim.grid();
    for (x, y) in Pattern::Block.cells((1, 1)) {
        assert!(grid.get(x, y), "block cell ({x}, {y})");
    }
    for (x, y) in Pattern::Blinker.cells((6, 1)) {
        assert!(grid.get(x, y), "blinker cell ({x}, {y})");
    }
}

#[test]
fn glider_keeps_five_cells_until_it_reaches_the_edge() {
    let mut grid = Grid::new(80, 60);
    grid.seed(Pattern::Glider, (11, 1));
    for generation in 1..=40 {
        grid = rules::evolve(&grid);
        assert_eq!(grid.live_count(), 5, "generation {generation}");
    }
    let mut cells: Vec<_> = grid.live_cells().collect();
    cells.sort();
    let mut expected: Vec<_> = Pattern::Glider.cells((21, 11)).collect();
    expected.sort();
    assert_eq!(cells, expected);
}

#[test]
fn paused_session_driven_by_commands() {
    let mut sim = Simulation::with_startup_pattern(&seeded_config());
    sim.apply(Command::TogglePause);
    let frozen = sim.grid().clone();

    for _ in 0..10 {
        sim.tick();
    }
    assert_eq!(sim.grid(), &frozen);

    sim.apply(Command::ToggleCell { x: 40, y: 30 });
    sim.apply(Command::ToggleCell { x: 40, y: 30 });
    assert_eq!(sim.grid(), &frozen);

    sim.apply(Command::Step);
    sim.tick();
    assert_eq!(sim.generation(), 1);
    assert_eq!(sim.grid(), &rules::evolve(&frozen));

    sim.apply(Command::SeedRandom { x: 60, y: 40 });
    let seeded = sim.grid().clone();
    for (x, y) in rules::evolve(&frozen).live_cells() {
        assert!(seeded.get(x, y));
    }
}

#[test]
fn startup_layout_fits_the_default_grid() {
    let config = Config::default();
    let grid = Grid::new(config.grid_width(), config.grid_height());
    for (pattern, origin) in STARTUP_LAYOUT {
        for (x, y) in pattern.cells(origin) {
            assert!(grid.in_bounds(x, y));
        }
    }
}
