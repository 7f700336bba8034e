use std::time::Duration;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const CELL_SIZE: u32 = 10;
/// Height of the header strip above the grid, in physical pixels.
pub const HEADER_HEIGHT: u32 = 40;
pub const FRAMES_PER_SECOND: u32 = 144;

/// Half-width of the square filled by a random seed, in cells.
pub const SEED_RADIUS: usize = 5;
pub const SEED_PROBABILITY: f64 = 0.5;

pub const LIVE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const DEAD_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
pub const HOVER_COLOR: [f32; 4] = [0.35, 0.35, 0.45, 1.0];

#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    /// Size of the grid area in pixels. The window adds the header on top.
    pub window_width: u32,
    pub window_height: u32,
    pub cell_size: u32,
    pub header_height: u32,
    pub frames_per_second: u32,
    pub seed_radius: usize,
    pub seed_probability: f64,
    /// Fixed seed for random fills; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
    pub live_color: [f32; 4],
    pub dead_color: [f32; 4],
    pub hover_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Game of Life".to_string(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            cell_size: CELL_SIZE,
            header_height: HEADER_HEIGHT,
            frames_per_second: FRAMES_PER_SECOND,
            seed_radius: SEED_RADIUS,
            seed_probability: SEED_PROBABILITY,
            rng_seed: None,
            live_color: LIVE_COLOR,
            dead_color: DEAD_COLOR,
            hover_color: HOVER_COLOR,
        }
    }
}

impl Config {
    pub fn grid_width(&self) -> usize {
        (self.window_width / self.cell_size) as usize
    }

    pub fn grid_height(&self) -> usize {
        (self.window_height / self.cell_size) as usize
    }

    /// Inner window size including the header strip.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height + self.header_height)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_is_80_by_60() {
        let config = Config::default();
        assert_eq!(config.grid_width(), 80);
        assert_eq!(config.grid_height(), 60);
        assert_eq!(config.window_size(), (800, 640));
    }

    #[test]
    fn frame_interval_never_divides_by_zero() {
        let config = Config { frames_per_second: 0, ..Config::default() };
        assert_eq!(config.frame_interval(), Duration::from_secs(1));
    }
}
