use life_view::{Command, Simulation};

/// Header bar above the grid. Returns the commands triggered by its buttons.
pub fn header(
    ctx: &egui::Context,
    sim: &Simulation,
    hover: Option<(usize, usize)>,
    height: f32,
) -> Vec<Command> {
    let mut commands = Vec::new();

    egui::TopBottomPanel::top("header")
        .exact_height(height)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let label = if sim.is_running() { "⏸ Pause" } else { "▶ Resume" };
                if ui.button(label).clicked() {
                    commands.push(Command::TogglePause);
                }
                if ui
                    .add_enabled(!sim.is_running(), egui::Button::new("⏭ Step"))
                    .clicked()
                {
                    commands.push(Command::Step);
                }

                ui.separator();
                ui.label(format!("Generation: {}", sim.generation()));
                ui.label(format!("Live Cells: {}", sim.grid().live_count()));
                if let Some((x, y)) = hover {
                    ui.separator();
                    ui.label(format!("Cell: ({x}, {y})"));
                }
            });
        });

    commands
}
