//! Administration console: members, import, presence and history tabs.

use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_phosphor::regular::{
    ARROWS_CLOCKWISE, DOWNLOAD_SIMPLE, FILE_XLS, FOLDER_OPEN, USER_MINUS, USER_PLUS,
};

use super::app::{Tasks, UiMessage};
use super::components::{
    colors, confirm_dialog, danger_action_button, feedback_banner, panel_header, primary_button_with_icon,
    styled_button_with_icon, tab_button,
};
use crate::admin::{AdminEvent, AdminRequest, AdminState, AdminTab};
use crate::client::{ApiClient, ExportKind};
use crate::config::AdminConfig;
use crate::export;
use crate::models::{Lien, format_timestamp};

pub struct AdminView {
    pub(super) state: AdminState,
    api: ApiClient,
    tasks: Tasks,
    export_dir: PathBuf,
    movements_limit: u32,
}

impl AdminView {
    pub fn new(config: &AdminConfig, api: ApiClient, tasks: Tasks) -> Self {
        Self::with_role(config, api, tasks, false)
    }

    /// Console for either role; fetches its lists right away.
    pub(super) fn with_role(config: &AdminConfig, api: ApiClient, tasks: Tasks, super_admin: bool) -> Self {
        let mut view = Self {
            state: AdminState::new(super_admin, Duration::from_secs(config.message_timeout_secs)),
            api,
            tasks,
            export_dir: config.export_dir(),
            movements_limit: config.movements_limit,
        };
        for request in view.state.initial_requests() {
            view.dispatch(request);
        }
        view
    }

    pub fn handle(&mut self, event: AdminEvent, now: Instant) {
        for request in self.state.handle(event, now) {
            self.dispatch(request);
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.state.tick(now);
    }

    pub fn has_deadline(&self) -> bool {
        self.state.feedback().has_deadline()
    }

    fn run<F>(&self, task: F)
    where
        F: Future<Output = AdminEvent> + Send + 'static,
    {
        self.tasks.spawn(async move { UiMessage::Admin(task.await) });
    }

    /// Issue a request on the runtime.
    pub(super) fn dispatch(&mut self, request: AdminRequest) {
        tracing::debug!("Admin request: {:?}", request);
        let api = self.api.clone();
        match request {
            AdminRequest::LoadMembers => self.run(async move { AdminEvent::MembersLoaded(api.list_members().await) }),
            AdminRequest::LoadMovements => {
                let limit = self.movements_limit;
                self.run(async move { AdminEvent::MovementsLoaded(api.list_movements(limit).await) });
            }
            AdminRequest::LoadPresents => self.run(async move { AdminEvent::PresentsLoaded(api.list_presents().await) }),
            AdminRequest::LoadAdmins => self.run(async move { AdminEvent::AdminsLoaded(api.list_admins().await) }),
            AdminRequest::CreateMember(member) => {
                self.run(async move { AdminEvent::MemberCreated(api.create_member(&member).await) });
            }
            AdminRequest::DeactivateMember(id) => {
                self.run(async move { AdminEvent::MemberDeactivated(api.deactivate_member(id).await) });
            }
            AdminRequest::Import(path) => {
                self.run(async move { AdminEvent::ImportFinished(api.import_members(&path).await) });
            }
            AdminRequest::Export(kind) => {
                let dir = self.export_dir.clone();
                self.run(async move {
                    let result = api
                        .export(kind)
                        .await
                        .and_then(|bytes| export::save_export(&dir, kind.filename(), &bytes));
                    AdminEvent::Exported(result)
                });
            }
            AdminRequest::CreateAdmin(admin) => {
                self.run(async move { AdminEvent::AdminCreated(api.create_admin(&admin).await) });
            }
            AdminRequest::DeleteAdmin(id) => self.run(async move { AdminEvent::AdminDeleted(api.delete_admin(id).await) }),
            AdminRequest::ChangePassword(body) => {
                self.run(async move { AdminEvent::PasswordChanged(api.change_password(&body).await) });
            }
        }
    }

    fn dispatch_opt(&mut self, request: Option<AdminRequest>) {
        if let Some(request) = request {
            self.dispatch(request);
        }
    }

    pub(super) fn tab_label(&self, tab: AdminTab) -> String {
        match tab {
            AdminTab::AddMember => "Ajouter un membre".to_string(),
            AdminTab::Import => "Import".to_string(),
            AdminTab::Members => format!("Membres ({})", self.state.members.len()),
            AdminTab::Presents => format!("Présents ({})", self.state.presents.len()),
            AdminTab::History => format!("Historique ({})", self.state.movements.len()),
            AdminTab::Accounts => format!("Admins ({})", self.state.admins.len()),
            AdminTab::Password => "Mot de passe".to_string(),
        }
    }

    /// Header, message banner and tab strip.
    pub(super) fn show_chrome(&mut self, ui: &mut Ui, title: &str) {
        panel_header(ui, title);
        feedback_banner(ui, self.state.feedback(), 15.0);

        ui.horizontal_wrapped(|ui| {
            for &tab in self.state.tabs() {
                let label = self.tab_label(tab);
                if tab_button(ui, self.state.tab == tab, &label) {
                    self.state.tab = tab;
                }
            }
        });
        ui.separator();
        ui.add_space(10.0);
    }

    pub fn show(&mut self, ui: &mut Ui) {
        self.show_chrome(ui, "Administration");
        self.show_tab(ui);
        self.show_dialogs(ui.ctx());
    }

    /// Render the member-side tabs.
    pub(super) fn show_tab(&mut self, ui: &mut Ui) {
        match self.state.tab {
            AdminTab::AddMember => self.show_add_member(ui),
            AdminTab::Import => self.show_import(ui),
            AdminTab::Members => self.show_members(ui),
            AdminTab::Presents => self.show_presents(ui),
            AdminTab::History => self.show_history(ui),
            // Account tabs are rendered by the superadmin console
            AdminTab::Accounts | AdminTab::Password => {}
        }
    }

    fn show_add_member(&mut self, ui: &mut Ui) {
        let form = &mut self.state.member_form;
        egui::Grid::new("member_form_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Nom :");
                ui.add(egui::TextEdit::singleline(&mut form.nom).desired_width(250.0));
                ui.end_row();

                ui.label("Prénom :");
                ui.add(egui::TextEdit::singleline(&mut form.prenom).desired_width(250.0));
                ui.end_row();

                ui.label("Téléphone :");
                ui.add(egui::TextEdit::singleline(&mut form.telephone).desired_width(180.0));
                ui.end_row();

                ui.label("Lien :");
                egui::ComboBox::from_id_salt("member_lien")
                    .width(180.0)
                    .selected_text(form.lien.as_str().to_string())
                    .show_ui(ui, |ui| {
                        for lien in Lien::CHOICES {
                            let label = format!("{} {}", lien.icon(), lien.as_str());
                            ui.selectable_value(&mut form.lien, lien, label);
                        }
                    });
                ui.end_row();
            });

        ui.add_space(15.0);
        if primary_button_with_icon(ui, true, USER_PLUS, "Ajouter").clicked() {
            let request = self.state.submit_member(Instant::now());
            self.dispatch_opt(request);
        }
    }

    fn show_import(&mut self, ui: &mut Ui) {
        ui.label("Importez une liste de membres depuis un fichier Excel (.xlsx, .xls) ou CSV.");
        ui.label(
            RichText::new(format!("Colonnes attendues : {}", export::TEMPLATE_HEADERS.join(", "))).color(colors::NEUTRAL),
        );
        ui.add_space(15.0);

        ui.horizontal(|ui| {
            let importing = self.state.is_importing();
            if primary_button_with_icon(ui, !importing, FOLDER_OPEN, "Choisir un fichier").clicked()
                && let Some(path) = export::pick_import_file()
            {
                tracing::info!("Importing members from {}", path.display());
                let request = self.state.start_import(path, Instant::now());
                self.dispatch_opt(request);
            }
            if importing {
                ui.spinner();
                ui.label("Import en cours...");
            }
        });

        ui.add_space(10.0);
        if styled_button_with_icon(ui, DOWNLOAD_SIMPLE, "Télécharger le modèle").clicked()
            && let Some(path) = export::show_save_dialog("modele_import.xlsx")
        {
            let now = Instant::now();
            match export::write_import_template(&path) {
                Ok(()) => self
                    .state
                    .feedback_mut()
                    .success(format!("Modèle enregistré : {}", path.display()), now),
                Err(e) => {
                    tracing::error!("Failed to write import template: {}", e);
                    self.state.feedback_mut().error(e.to_string(), now);
                }
            }
        }
    }

    fn export_button(&mut self, ui: &mut Ui, kind: ExportKind, label: &str) {
        let exporting = self.state.is_exporting();
        if ui
            .add_enabled(!exporting, egui::Button::new(format!("{FILE_XLS} {label}")))
            .on_hover_text(format!("Enregistré dans {}", self.export_dir.display()))
            .clicked()
        {
            let request = self.state.start_export(kind);
            self.dispatch_opt(request);
        }
        if exporting {
            ui.spinner();
        }
    }

    fn show_members(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Actualiser").clicked() {
                self.dispatch(AdminRequest::LoadMembers);
            }
            ui.add_space(10.0);
            self.export_button(ui, ExportKind::Members, "Exporter les membres");
        });
        ui.add_space(10.0);

        let mut deactivate = None;
        ScrollArea::vertical().id_salt("members_scroll").show(ui, |ui| {
            egui::Grid::new("members_grid")
                .num_columns(6)
                .striped(true)
                .min_col_width(60.0)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Nom");
                    ui.strong("Prénom");
                    ui.strong("Téléphone");
                    ui.strong("Lien");
                    ui.strong("Statut");
                    ui.strong("Actions");
                    ui.end_row();

                    for member in &self.state.members {
                        ui.label(&member.nom);
                        ui.label(&member.prenom);
                        ui.label(&member.telephone);
                        ui.label(format!("{} {}", member.lien.icon(), member.lien.as_str()));
                        let color = if member.can_deactivate() { colors::SUCCESS } else { colors::NEUTRAL };
                        ui.colored_label(color, member.statut.label());
                        if member.can_deactivate() {
                            if danger_action_button(ui, USER_MINUS, "Désactiver").clicked() {
                                deactivate = Some(member.clone());
                            }
                        } else {
                            ui.label("-");
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some(member) = deactivate {
            self.state.request_deactivation(&member);
        }
    }

    fn show_presents(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Actualiser").clicked() {
                self.dispatch(AdminRequest::LoadPresents);
            }
            ui.add_space(10.0);
            if styled_button_with_icon(ui, FILE_XLS, "Exporter les présents").clicked()
                && let Some(path) = export::show_save_dialog(&export::generate_export_filename("presents"))
            {
                let now = Instant::now();
                match export::export_presents_to_excel(&self.state.presents, &path) {
                    Ok(()) => self
                        .state
                        .feedback_mut()
                        .success(format!("Export réussi : {}", path.display()), now),
                    Err(e) => {
                        tracing::error!("Presents export failed: {}", e);
                        self.state.feedback_mut().error(e.to_string(), now);
                    }
                }
            }
        });
        ui.add_space(10.0);

        if self.state.presents.is_empty() {
            ui.label(RichText::new("Personne n'est présent actuellement.").color(colors::NEUTRAL));
            return;
        }

        ScrollArea::vertical().id_salt("presents_scroll").show(ui, |ui| {
            egui::Grid::new("presents_grid")
                .num_columns(4)
                .striped(true)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Nom");
                    ui.strong("Prénom");
                    ui.strong("Téléphone");
                    ui.strong("Entrée");
                    ui.end_row();

                    for present in &self.state.presents {
                        ui.label(&present.nom);
                        ui.label(&present.prenom);
                        ui.label(&present.telephone);
                        ui.label(format_timestamp(&present.heure_entree));
                        ui.end_row();
                    }
                });
        });
    }

    fn show_history(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Actualiser").clicked() {
                self.dispatch(AdminRequest::LoadMovements);
            }
            ui.add_space(10.0);
            self.export_button(ui, ExportKind::Movements, "Exporter l'historique");
            ui.label(
                RichText::new(format!("{} derniers mouvements", self.movements_limit)).color(colors::NEUTRAL),
            );
        });
        ui.add_space(10.0);

        let movements = &self.state.movements;
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(150.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(120.0))
            .column(Column::remainder())
            .header(22.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Date / heure");
                });
                header.col(|ui| {
                    ui.strong("Nom");
                });
                header.col(|ui| {
                    ui.strong("Prénom");
                });
                header.col(|ui| {
                    ui.strong("Type");
                });
            })
            .body(|body| {
                body.rows(22.0, movements.len(), |mut row| {
                    let movement = &movements[row.index()];
                    row.col(|ui| {
                        ui.label(format_timestamp(&movement.date_heure));
                    });
                    row.col(|ui| {
                        ui.label(&movement.nom);
                    });
                    row.col(|ui| {
                        ui.label(&movement.prenom);
                    });
                    row.col(|ui| {
                        ui.label(format!("{} {}", movement.kind.marker(), movement.kind.label()));
                    });
                });
            });
    }

    /// Render confirmation dialogs.
    pub(super) fn show_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(pending) = self.state.pending_deactivation().cloned() {
            let message = format!("Désactiver le membre « {} » ?", pending.label);
            match confirm_dialog(ctx, "Désactiver un membre", &message, "Désactiver") {
                Some(true) => {
                    let request = self.state.confirm_deactivation();
                    self.dispatch_opt(request);
                }
                Some(false) => self.state.cancel_deactivation(),
                None => {}
            }
        }
    }
}
