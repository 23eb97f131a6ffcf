use crate::libflagfinder::question::QuizKind;
use crate::libflagfinder::session::Session;
use crate::libflagfinder::settings::{Settings, Theme};
use crate::Error;
use eframe::egui;
use eframe::egui::{Color32, Key, ProgressBar, RichText, Ui};
use log::debug;
use std::time::Duration;

struct GuiState {
    session: Session,
}

impl GuiState {
    fn new(ctx: &eframe::CreationContext, session: Session, theme: Theme) -> Self {
        egui_extras::install_image_loaders(&ctx.egui_ctx);
        match theme {
            Theme::Dark => ctx.egui_ctx.set_visuals(egui::Visuals::dark()),
            Theme::Light => ctx.egui_ctx.set_visuals(egui::Visuals::light()),
            Theme::System => {}
        }
        Self { session }
    }

    fn draw_header(&self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(format!(
                "Score : {}/{}",
                self.session.correct_count, self.session.answered_count
            ));
            if let Some(remaining) = self.session.timer.remaining() {
                let total = self.session.timer.duration().as_secs_f32();
                let frac = if total > 0.0 {
                    remaining.as_secs_f32() / total
                } else {
                    0.0
                };
                ui.add(ProgressBar::new(frac).text(format!("{} s", remaining.as_secs())));
            }
        });
    }

    fn draw_prompt(&self, ui: &mut Ui) {
        match self.session.kind() {
            // the flag comes straight from the CDN; a failed fetch just
            // leaves the loader's placeholder
            QuizKind::Flags => {
                ui.add(
                    egui::Image::from_uri(self.session.question.correct.image_url())
                        .max_height(160.0),
                );
            }
            QuizKind::Scripts => {
                if let Some(sentence) = &self.session.question.sentence {
                    ui.label(RichText::new(sentence).size(28.0).strong());
                }
            }
        }
    }

    fn draw_options(&mut self, ui: &mut Ui) {
        let answered = self.session.answered();
        let correct = self.session.question.correct.code.clone();
        let selected = self.session.selected_code().map(String::from);
        let options = self.session.question.options.clone();

        for option in &options {
            let mut button = egui::Button::new(RichText::new(&option.name).size(18.0));
            if answered {
                if option.code == correct {
                    button = button.fill(Color32::from_rgb(22, 163, 74));
                } else if selected.as_deref() == Some(option.code.as_str()) {
                    button = button.fill(Color32::from_rgb(220, 38, 38));
                }
            }
            let response = ui.add_enabled(!answered, button.min_size(egui::vec2(240.0, 32.0)));
            if response.clicked() {
                debug!("[Gui] Selected {}", option.code);
                self.session.select(&option.code);
            }
        }
    }
}

impl eframe::App for GuiState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.timer.poll() {
            self.session.time_up();
        }
        if ctx.input(|i| i.key_pressed(Key::Enter)) {
            self.session.handle_enter();
        }

        egui::TopBottomPanel::top("entete").show(ctx, |ui| {
            self.draw_header(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                self.draw_prompt(ui);
                ui.add_space(12.0);
                self.draw_options(ui);
                ui.add_space(12.0);
                let next = ui.add_enabled(
                    self.session.answered(),
                    egui::Button::new("Question suivante"),
                );
                if next.clicked() {
                    self.session.next_question();
                }
            });
        });

        if self.session.timer.running() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

pub fn run(session: Session, settings: &Settings) -> Result<(), Error> {
    let title = match session.kind() {
        QuizKind::Flags => "FlagFinder — Drapeaux",
        QuizKind::Scripts => "FlagFinder — Langues",
    };
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 560.0])
            .with_min_inner_size([320.0, 420.0]),
        ..Default::default()
    };
    let theme = settings.theme;
    eframe::run_native(
        title,
        native_options,
        Box::new(move |cc| Ok(Box::new(GuiState::new(cc, session, theme)))),
    )?;

    Ok(())
}
