//! Admin login screen.

use eframe::egui::{self, Key, RichText, Ui};
use egui_phosphor::regular::{LOCK, SIGN_IN};

use super::app::{Tasks, UiMessage};
use super::components::{colors, primary_button_with_icon};
use crate::Result;
use crate::client::ApiClient;
use crate::login::LoginForm;
use crate::models::LoginResponse;

pub struct LoginView {
    form: LoginForm,
    api: ApiClient,
    tasks: Tasks,
}

impl LoginView {
    pub fn new(api: ApiClient, tasks: Tasks) -> Self {
        Self {
            form: LoginForm::default(),
            api,
            tasks,
        }
    }

    pub fn finished(&mut self, result: Result<LoginResponse>) -> Option<LoginResponse> {
        self.form.finished(result)
    }

    fn submit(&mut self) {
        let Some((username, password)) = self.form.submit() else {
            return;
        };
        tracing::info!("Login attempt for {}", username);
        let api = self.api.clone();
        self.tasks
            .spawn(async move { UiMessage::Login(api.login(&username, &password).await) });
    }

    pub fn show(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.heading(RichText::new(format!("{LOCK} Administration")).size(28.0));
            ui.add_space(20.0);

            egui::Frame::group(ui.style()).inner_margin(20.0).show(ui, |ui| {
                ui.set_max_width(360.0);

                let in_flight = self.form.is_in_flight();
                egui::Grid::new("login_grid")
                    .num_columns(2)
                    .spacing([20.0, 10.0])
                    .show(ui, |ui| {
                        ui.label("Utilisateur :");
                        ui.add_enabled(
                            !in_flight,
                            egui::TextEdit::singleline(&mut self.form.username).desired_width(200.0),
                        );
                        ui.end_row();

                        ui.label("Mot de passe :");
                        let response = ui.add_enabled(
                            !in_flight,
                            egui::TextEdit::singleline(&mut self.form.password)
                                .password(true)
                                .desired_width(200.0),
                        );
                        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                            self.submit();
                        }
                        ui.end_row();
                    });

                ui.add_space(12.0);
                if let Some(error) = self.form.error() {
                    ui.colored_label(colors::ERROR, format!("❌ {error}"));
                    ui.add_space(8.0);
                }

                ui.horizontal(|ui| {
                    if primary_button_with_icon(ui, self.form.can_submit(), SIGN_IN, "Se connecter").clicked() {
                        self.submit();
                    }
                    if self.form.is_in_flight() {
                        ui.spinner();
                    }
                });
            });
        });
    }
}
