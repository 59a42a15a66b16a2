//! Application shell: header navigation, async plumbing and view mounting.

use std::future::Future;
use std::time::Instant;

use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{LOCK_KEY, SIGN_OUT, USER_CHECK};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::admin::AdminEvent;
use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::kiosk::KioskEvent;
use crate::models::LoginResponse;
use crate::session::{ActiveView, Mode, SessionController};

use super::admin_view::AdminView;
use super::components::colors;
use super::kiosk_view::KioskView;
use super::login_view::LoginView;
use super::super_admin_view::SuperAdminView;

/// Messages from async tasks to UI.
#[derive(Debug)]
pub enum UiMessage {
    Kiosk(KioskEvent),
    Login(crate::Result<LoginResponse>),
    Admin(AdminEvent),
}

/// Spawns request futures and routes their result back to the UI thread.
#[derive(Clone)]
pub struct Tasks {
    handle: Handle,
    tx: mpsc::UnboundedSender<UiMessage>,
    ctx: egui::Context,
}

impl Tasks {
    pub fn new(handle: Handle, tx: mpsc::UnboundedSender<UiMessage>, ctx: egui::Context) -> Self {
        Self { handle, tx, ctx }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Run `task` and deliver its message on the next frame.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = UiMessage> + Send + 'static,
    {
        self.handle.spawn(self.deliver(task));
    }

    /// Wrap `task` so its message reaches the UI, for callers that schedule it themselves.
    pub fn deliver<F>(&self, task: F) -> impl Future<Output = ()> + Send + 'static
    where
        F: Future<Output = UiMessage> + Send + 'static,
    {
        let tx = self.tx.clone();
        let ctx = self.ctx.clone();
        async move {
            let _ = tx.send(task.await);
            ctx.request_repaint();
        }
    }
}

/// Admin console currently mounted.
enum Console {
    Admin(AdminView),
    SuperAdmin(SuperAdminView),
}

/// Main application state.
pub struct PointageApp {
    // Runtime is kept alive for the lifetime of the window
    _rt: tokio::runtime::Runtime,
    rx: mpsc::UnboundedReceiver<UiMessage>,
    tasks: Tasks,

    config: AppConfig,
    api: ApiClient,
    session: SessionController,

    kiosk: KioskView,
    login: LoginView,
    console: Option<Console>,
    mounted: ActiveView,

    /// Shown once at the top when the config file could not be used.
    config_warning: Option<String>,
}

impl PointageApp {
    pub fn new(
        ctx: &egui::Context,
        rt: tokio::runtime::Runtime,
        config: AppConfig,
        api: ApiClient,
        session: SessionController,
        config_warning: Option<String>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let tasks = Tasks::new(rt.handle().clone(), tx, ctx.clone());
        let kiosk = KioskView::new(&config.kiosk, api.clone(), tasks.clone());
        let login = LoginView::new(api.clone(), tasks.clone());

        Self {
            _rt: rt,
            rx,
            tasks,
            config,
            api,
            session,
            kiosk,
            login,
            console: None,
            mounted: ActiveView::Kiosk,
            config_warning,
        }
    }

    fn poll_async_results(&mut self) {
        let now = Instant::now();
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::Kiosk(event) => self.kiosk.handle(event, now),
                UiMessage::Login(result) => {
                    if let Some(response) = self.login.finished(result) {
                        self.session.login_succeeded(response.token, response.role);
                    }
                }
                UiMessage::Admin(event) => match &mut self.console {
                    Some(Console::Admin(view)) => view.handle(event, now),
                    Some(Console::SuperAdmin(view)) => view.handle(event, now),
                    // Result of a request issued before logout
                    None => tracing::debug!("Dropping admin result without console: {:?}", event),
                },
            }
        }
    }

    /// Mount or drop the admin console when the active view changes.
    fn sync_views(&mut self) {
        let view = self.session.active_view();
        if view == self.mounted {
            return;
        }
        tracing::debug!("View changed: {:?} -> {:?}", self.mounted, view);

        self.console = match (view, self.session.token()) {
            (ActiveView::Admin, Some(token)) => Some(Console::Admin(AdminView::new(
                &self.config.admin,
                self.api.with_token(token),
                self.tasks.clone(),
            ))),
            (ActiveView::SuperAdmin, Some(token)) => Some(Console::SuperAdmin(SuperAdminView::new(
                &self.config.admin,
                self.api.with_token(token),
                self.tasks.clone(),
            ))),
            _ => None,
        };
        if view != ActiveView::Kiosk {
            self.kiosk.suspend();
        }
        self.mounted = view;
    }

    /// Render header bar with the mode switch.
    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .min_height(48.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Pointage Bibliothèque").strong());

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if self.session.is_authenticated() {
                            if ui
                                .button(RichText::new(format!("{SIGN_OUT} Déconnexion")).color(colors::ERROR))
                                .clicked()
                            {
                                self.session.logout();
                            }
                            if let Some(role) = self.session.role() {
                                ui.label(RichText::new(role.label()).color(colors::NEUTRAL));
                            }
                        }

                        let mode = self.session.mode();
                        if ui
                            .selectable_label(mode == Mode::Admin, format!("{LOCK_KEY} Administration"))
                            .clicked()
                        {
                            self.session.set_mode(Mode::Admin);
                        }
                        if ui
                            .selectable_label(mode == Mode::Kiosk, format!("{USER_CHECK} Pointage"))
                            .clicked()
                        {
                            self.session.set_mode(Mode::Kiosk);
                        }
                    });
                });
                ui.add_space(6.0);
            });
    }
}

impl eframe::App for PointageApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();
        self.sync_views();

        let now = Instant::now();
        self.kiosk.tick(now);
        if let Some(console) = &mut self.console {
            match console {
                Console::Admin(view) => view.tick(now),
                Console::SuperAdmin(view) => view.tick(now),
            }
        }

        // Wake up for reset and message deadlines
        let deadline_pending = self.kiosk.has_deadline()
            || match &self.console {
                Some(Console::Admin(view)) => view.has_deadline(),
                Some(Console::SuperAdmin(view)) => view.has_deadline(),
                None => false,
            };
        if deadline_pending {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }

        self.show_header(ctx);

        if let Some(warning) = self.config_warning.clone() {
            egui::TopBottomPanel::top("config_warning").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(colors::WARNING, format!("⚠ {warning}"));
                    if ui.small_button("OK").clicked() {
                        self.config_warning = None;
                    }
                });
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.mounted {
            ActiveView::Kiosk => self.kiosk.show(ui),
            ActiveView::Login => self.login.show(ui),
            ActiveView::Admin | ActiveView::SuperAdmin => match &mut self.console {
                Some(Console::Admin(view)) => view.show(ui),
                Some(Console::SuperAdmin(view)) => view.show(ui),
                None => {
                    ui.centered_and_justified(|ui| ui.spinner());
                }
            },
        });
    }
}
