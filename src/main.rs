use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use sokoban::game::{Game, GameEvent, Settings};
use sokoban::levels::Levels;
use sokoban::modals::{LevelSelectModal, LevelSelectModalEvent};

#[derive(Parser)]
#[command(name = "sokoban")]
#[command(about = "The Sokoban puzzle game", long_about = None)]
struct Args {
    /// Path to a level file; the built-in levels are played if omitted
    #[arg(value_name = "FILE")]
    levels_file: Option<PathBuf>,

    /// Level number to start with (1-indexed), skips the level selection
    #[arg(short, long)]
    level: Option<usize>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let levels = match &args.levels_file {
        Some(path) => Levels::from_file(path),
        None => Levels::builtin(),
    };
    let levels = match levels {
        Ok(levels) => levels,
        Err(err) => {
            log::error!("could not load levels: {err}");
            std::process::exit(1);
        }
    };

    if levels.is_empty() {
        log::error!("the level file contains no levels");
        std::process::exit(1);
    }
    if let Some(level) = args.level.filter(|&level| level == 0 || level > levels.len()) {
        log::error!("level {level} not found (there are {} levels)", levels.len());
        std::process::exit(1);
    }
    log::info!("loaded {} levels", levels.len());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sokoban",
        native_options,
        Box::new(move |cc| Ok(Box::new(Application::new(cc, levels, args.level)))),
    )
}

struct Application {
    levels: Levels,
    settings: Settings,
    state: ApplicationState,
    level_select_modal: LevelSelectModal,
}

impl Application {
    fn new(cc: &eframe::CreationContext<'_>, levels: Levels, start_level: Option<usize>) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = cc.storage.map(Settings::read).unwrap_or_default();

        let mut application = Application {
            level_select_modal: LevelSelectModal::new(settings.last_level, levels.len()),
            levels,
            settings,
            state: ApplicationState::ShowingLevelSelect,
        };
        if let Some(level) = start_level {
            application.start_level(level - 1);
        }
        application
    }

    fn start_level(&mut self, index: usize) {
        match self.levels.get(index) {
            Some(level) => {
                log::info!("starting level {}", index + 1);
                self.settings.last_level = index;
                let game = Game::new(level, index, self.settings);
                self.state = ApplicationState::RunningGame(Box::new(game));
            }
            None => self.show_level_select(index),
        }
    }

    fn show_level_select(&mut self, selected: usize) {
        self.level_select_modal = LevelSelectModal::new(selected, self.levels.len());
        self.state = ApplicationState::ShowingLevelSelect;
    }
}

impl eframe::App for Application {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            match &mut self.state {
                ApplicationState::ShowingLevelSelect => {
                    if let Some(LevelSelectModalEvent::Start(index)) =
                        self.level_select_modal.update(ui)
                    {
                        self.start_level(index);
                    }
                }
                ApplicationState::RunningGame(game) => {
                    let index = game.level_index();
                    for event in game.update(ui) {
                        match event {
                            GameEvent::ChooseLevel => self.show_level_select(index),
                            GameEvent::NextLevel => self.start_level(index + 1),
                            GameEvent::SettingsChanged(settings) => {
                                self.settings.tile_size = settings.tile_size
                            }
                        }
                    }
                }
            };
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.write(storage);
    }
}

enum ApplicationState {
    ShowingLevelSelect,
    RunningGame(Box<Game>),
}
