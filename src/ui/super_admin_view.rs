//! Superadmin console: every admin tab plus account management and password change.

use std::time::Instant;

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, KEY, TRASH, USER_PLUS};

use super::admin_view::AdminView;
use super::components::{
    colors, confirm_dialog, danger_action_button, primary_button_with_icon, styled_button_with_icon,
};
use crate::admin::{AdminEvent, AdminRequest, AdminTab};
use crate::client::ApiClient;
use crate::config::AdminConfig;
use crate::models::{MIN_PASSWORD_LEN, format_timestamp};

use super::app::Tasks;

pub struct SuperAdminView {
    inner: AdminView,
}

impl SuperAdminView {
    pub fn new(config: &AdminConfig, api: ApiClient, tasks: Tasks) -> Self {
        Self {
            inner: AdminView::with_role(config, api, tasks, true),
        }
    }

    pub fn handle(&mut self, event: AdminEvent, now: Instant) {
        self.inner.handle(event, now);
    }

    pub fn tick(&mut self, now: Instant) {
        self.inner.tick(now);
    }

    pub fn has_deadline(&self) -> bool {
        self.inner.has_deadline()
    }

    pub fn show(&mut self, ui: &mut Ui) {
        self.inner.show_chrome(ui, "Super Administration");
        match self.inner.state.tab {
            AdminTab::Accounts => self.show_accounts(ui),
            AdminTab::Password => self.show_password(ui),
            _ => self.inner.show_tab(ui),
        }
        self.inner.show_dialogs(ui.ctx());
        self.show_dialogs(ui.ctx());
    }

    fn show_accounts(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Nouvel admin").strong());
        ui.add_space(6.0);
        let form = &mut self.inner.state.admin_form;
        egui::Grid::new("admin_form_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Utilisateur :");
                ui.add(egui::TextEdit::singleline(&mut form.username).desired_width(200.0));
                ui.end_row();

                ui.label("Mot de passe :");
                ui.add(
                    egui::TextEdit::singleline(&mut form.password)
                        .password(true)
                        .hint_text(format!("{MIN_PASSWORD_LEN} caractères minimum"))
                        .desired_width(200.0),
                );
                ui.end_row();
            });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if primary_button_with_icon(ui, true, USER_PLUS, "Créer").clicked() {
                let request = self.inner.state.submit_admin(Instant::now());
                self.dispatch_opt(request);
            }
            ui.add_space(10.0);
            if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Actualiser").clicked() {
                self.inner.dispatch(AdminRequest::LoadAdmins);
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let mut delete = None;
        ScrollArea::vertical().id_salt("admins_scroll").show(ui, |ui| {
            egui::Grid::new("admins_grid")
                .num_columns(4)
                .striped(true)
                .min_col_width(80.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Utilisateur");
                    ui.strong("Rôle");
                    ui.strong("Créé le");
                    ui.strong("Actions");
                    ui.end_row();

                    for admin in &self.inner.state.admins {
                        ui.label(&admin.username);
                        ui.label(admin.role.label());
                        ui.label(admin.date_creation.as_deref().map(format_timestamp).unwrap_or_default());
                        if admin.can_be_deleted() {
                            if danger_action_button(ui, TRASH, "Supprimer").clicked() {
                                delete = Some(admin.clone());
                            }
                        } else {
                            ui.colored_label(colors::NEUTRAL, "Protégé");
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some(admin) = delete {
            self.inner.state.request_admin_deletion(&admin);
        }
    }

    fn show_password(&mut self, ui: &mut Ui) {
        let form = &mut self.inner.state.password_form;
        egui::Grid::new("password_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Mot de passe actuel :");
                ui.add(
                    egui::TextEdit::singleline(&mut form.old_password)
                        .password(true)
                        .desired_width(220.0),
                );
                ui.end_row();

                ui.label("Nouveau mot de passe :");
                ui.add(
                    egui::TextEdit::singleline(&mut form.new_password)
                        .password(true)
                        .desired_width(220.0),
                );
                ui.end_row();

                ui.label("Confirmation :");
                ui.add(
                    egui::TextEdit::singleline(&mut form.confirm_password)
                        .password(true)
                        .desired_width(220.0),
                );
                ui.end_row();
            });

        ui.add_space(15.0);
        if primary_button_with_icon(ui, true, KEY, "Changer le mot de passe").clicked() {
            let request = self.inner.state.submit_password(Instant::now());
            self.dispatch_opt(request);
        }
    }

    fn dispatch_opt(&mut self, request: Option<AdminRequest>) {
        if let Some(request) = request {
            self.inner.dispatch(request);
        }
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(pending) = self.inner.state.pending_admin_delete().cloned() {
            let message = format!("Supprimer l'admin « {} » ?", pending.label);
            match confirm_dialog(ctx, "Supprimer un admin", &message, "Supprimer") {
                Some(true) => {
                    let request = self.inner.state.confirm_admin_deletion();
                    self.dispatch_opt(request);
                }
                Some(false) => self.inner.state.cancel_admin_deletion(),
                None => {}
            }
        }
    }
}
