use eframe::egui;

/// Lets the player pick a level of the loaded collection.
pub struct LevelSelectModal {
    level: usize, // 1-based, as shown
    count: usize,
}

impl LevelSelectModal {
    /// `selected` is the 0-based index preselected out of `count` levels.
    pub fn new(selected: usize, count: usize) -> Self {
        let count = count.max(1);
        Self {
            level: selected.min(count - 1) + 1,
            count,
        }
    }

    pub fn update(&mut self, ui: &mut egui::Ui) -> Option<LevelSelectModalEvent> {
        egui::Modal::new(egui::Id::new("Modal Select Level"))
            .show(ui.ctx(), |ui| {
                ui.set_width(300.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Sokoban");
                    ui.separator();
                    ui.add_space(32.0);
                    egui::Grid::new("Level")
                        .num_columns(2)
                        .spacing([20.0, 20.0])
                        .show(ui, |ui| {
                            ui.label("Level");
                            ui.add(egui::Slider::new(&mut self.level, 1..=self.count));
                            ui.end_row();
                        });
                    ui.add_space(10.0);
                    ui.label("Arrow keys move, U undoes a move, R restarts the level.");
                });

                ui.add_space(20.0);

                ui.with_layout(egui::Layout::right_to_left(Default::default()), |ui| {
                    if ui
                        .add_sized([80., 30.], egui::Button::new("Start"))
                        .clicked()
                    {
                        Some(LevelSelectModalEvent::Start(self.level - 1))
                    } else {
                        None
                    }
                })
                .inner
            })
            .inner
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LevelSelectModalEvent {
    /// Start the level with the given 0-based index.
    Start(usize),
}

#[derive(Default)]
pub struct PauseModal {}

impl PauseModal {
    pub fn new() -> Self {
        Self {}
    }

    pub fn update(&mut self, ui: &mut egui::Ui) -> Option<PauseModalEvent> {
        egui::Modal::new(egui::Id::new("Game Paused"))
            .show(ui.ctx(), |ui| {
                ui.set_width(200.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Game Paused");
                    ui.separator();
                    ui.add_space(15.0);
                    let buttons = [
                        ("Restart", PauseModalEvent::Restart),
                        ("Choose Level", PauseModalEvent::ChooseLevel),
                        ("Continue", PauseModalEvent::Continue),
                    ];
                    let mut event = None;
                    for (text, button_event) in buttons {
                        if ui.add_sized([110., 30.], egui::Button::new(text)).clicked() {
                            event = Some(button_event);
                        }
                    }
                    ui.add_space(15.0);
                    event
                })
                .inner
            })
            .inner
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PauseModalEvent {
    Continue,
    ChooseLevel,
    Restart,
}

pub struct LevelSolvedModal {
    time: std::time::Duration,
    moves: usize,
}

impl LevelSolvedModal {
    pub fn new(time: std::time::Duration, moves: usize) -> Self {
        LevelSolvedModal { time, moves }
    }

    pub fn update(&mut self, ui: &mut egui::Ui) -> Option<LevelSolvedModalEvent> {
        egui::Modal::new(egui::Id::new("Level Solved"))
            .show(ui.ctx(), |ui| {
                ui.set_width(200.0);
                ui.vertical_centered(|ui| {
                    ui.heading("Level Solved");
                    ui.separator();
                    ui.add_space(15.0);
                    ui.vertical_centered(|ui| {
                        ui.style_mut().spacing.item_spacing.y = 10.0;
                        let seconds = self.time.as_secs();
                        ui.label(format!("Time {:02}:{:02}", seconds / 60, seconds % 60));
                        ui.label(format!("Moves {}", self.moves));
                    });
                    ui.add_space(15.0);
                    let buttons = [
                        ("Next Level", LevelSolvedModalEvent::NextLevel),
                        ("Play Again", LevelSolvedModalEvent::PlayAgain),
                        ("Choose Level", LevelSolvedModalEvent::ChooseLevel),
                    ];
                    let mut event = None;
                    for (text, button_event) in buttons {
                        if ui.add_sized([110., 30.], egui::Button::new(text)).clicked() {
                            event = Some(button_event);
                        }
                    }
                    event
                })
                .inner
            })
            .inner
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LevelSolvedModalEvent {
    NextLevel,
    PlayAgain,
    ChooseLevel,
}
