//! Self-service check-in screen.

use std::time::{Duration, Instant};

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{INFO, MAGNIFYING_GLASS, PHONE};

use super::app::{Tasks, UiMessage};
use super::components::{colors, feedback_banner};
use crate::client::ApiClient;
use crate::config::KioskConfig;
use crate::debounce::Debouncer;
use crate::kiosk::{KioskEvent, KioskState, SearchAction};
use crate::models::Member;

pub struct KioskView {
    state: KioskState,
    debouncer: Debouncer,
    api: ApiClient,
    tasks: Tasks,
    min_search_len: usize,
}

impl KioskView {
    pub fn new(config: &KioskConfig, api: ApiClient, tasks: Tasks) -> Self {
        Self {
            state: KioskState::new(config),
            debouncer: Debouncer::new(Duration::from_millis(config.debounce_ms)),
            api,
            tasks,
            min_search_len: config.min_search_len,
        }
    }

    pub fn handle(&mut self, event: KioskEvent, now: Instant) {
        self.state.handle(event, now);
    }

    pub fn tick(&mut self, now: Instant) {
        if self.state.tick(now) {
            self.debouncer.cancel();
        }
    }

    pub fn has_deadline(&self) -> bool {
        self.state.awaiting_reset()
    }

    /// Drop any pending lookup while another view is shown.
    pub fn suspend(&mut self) {
        self.debouncer.cancel();
    }

    fn phone_changed(&mut self) {
        match self.state.on_phone_changed() {
            SearchAction::Cancel => self.debouncer.cancel(),
            SearchAction::Schedule(fragment) => {
                let api = self.api.clone();
                let task = self.tasks.deliver(async move {
                    let result = api.search_members(&fragment).await;
                    UiMessage::Kiosk(KioskEvent::SearchCompleted { fragment, result })
                });
                self.debouncer.schedule(self.tasks.handle(), task);
            }
        }
    }

    fn check_in(&mut self, member: &Member) {
        let Some(membre_id) = self.state.select(member) else {
            return;
        };
        self.debouncer.cancel();
        let api = self.api.clone();
        self.tasks.spawn(async move {
            UiMessage::Kiosk(KioskEvent::CheckInCompleted(api.check_in(membre_id).await))
        });
    }

    pub fn show(&mut self, ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(30.0);
            ui.heading(RichText::new("Pointage").size(32.0).strong());
            ui.label(RichText::new("Entrée / sortie de la bibliothèque").color(colors::NEUTRAL));
            ui.add_space(20.0);
        });

        let width = ui.available_width().min(520.0);
        ui.vertical_centered(|ui| {
            ui.set_max_width(width);

            feedback_banner(ui, self.state.feedback(), 20.0);

            ui.horizontal(|ui| {
                ui.label(RichText::new(PHONE).size(24.0));
                let submitting = self.state.is_submitting();
                let response = ui.add_enabled(
                    !submitting,
                    egui::TextEdit::singleline(&mut self.state.phone)
                        .hint_text("Votre numéro de téléphone")
                        .font(egui::TextStyle::Heading)
                        .desired_width(width - 80.0),
                );
                if response.changed() {
                    self.phone_changed();
                }
                if submitting || self.debouncer.is_pending() {
                    ui.spinner();
                }
            });

            ui.add_space(12.0);
            self.show_suggestions(ui);

            if self.state.shows_not_found() {
                egui::Frame::group(ui.style()).inner_margin(12.0).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        RichText::new(format!("{MAGNIFYING_GLASS} Aucune personne trouvée"))
                            .size(18.0)
                            .color(colors::WARNING),
                    );
                    ui.label("Adressez-vous à l'accueil pour vous inscrire.");
                });
            }

            ui.add_space(20.0);
            egui::Frame::group(ui.style()).inner_margin(12.0).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(format!("{INFO} Comment pointer ?")).strong());
                ui.label(format!("1. Tapez au moins {} chiffres de votre numéro.", self.min_search_len));
                ui.label("2. Touchez votre nom dans la liste.");
                ui.label("3. Votre entrée ou sortie est enregistrée.");
            });
        });
    }

    fn show_suggestions(&mut self, ui: &mut Ui) {
        let mut chosen = None;
        let submitting = self.state.is_submitting();

        ScrollArea::vertical()
            .id_salt("kiosk_suggestions")
            .max_height(320.0)
            .show(ui, |ui| {
                for member in self.state.suggestions() {
                    let text = RichText::new(format!(
                        "{icon}  {name}   {phone}   ({lien})",
                        icon = member.lien.icon(),
                        name = member.display_name(),
                        phone = member.telephone,
                        lien = member.lien.as_str(),
                    ))
                    .size(18.0);
                    let button = egui::Button::new(text).min_size(egui::vec2(ui.available_width(), 44.0));
                    if ui.add_enabled(!submitting, button).clicked() {
                        chosen = Some(member.clone());
                    }
                    ui.add_space(4.0);
                }
            });

        if let Some(member) = chosen {
            self.check_in(&member);
        }
    }
}
