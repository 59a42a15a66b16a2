//! Shared UI components.

use eframe::egui::{self, Color32, Response, RichText, Ui};

use crate::feedback::{FeedbackSlot, Tone};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
    pub const PRIMARY: Color32 = Color32::from_rgb(0x44, 0x72, 0xC4);
}

pub fn tone_color(tone: Tone) -> Color32 {
    match tone {
        Tone::Success => colors::SUCCESS,
        Tone::Warning => colors::WARNING,
        Tone::Error => colors::ERROR,
    }
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Render the current message of `slot`, if any.
pub fn feedback_banner(ui: &mut Ui, slot: &FeedbackSlot, size: f32) {
    if let Some(feedback) = slot.current() {
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(1.0, tone_color(feedback.tone)))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(feedback.display())
                        .size(size)
                        .color(tone_color(feedback.tone)),
                );
            });
        ui.add_space(10.0);
    }
}

/// Button with an icon and a label.
pub fn styled_button_with_icon(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.button(RichText::new(format!("{icon} {label}")).size(14.0))
}

/// Filled button for the main action of a form.
pub fn primary_button_with_icon(ui: &mut Ui, enabled: bool, icon: &str, label: &str) -> Response {
    ui.add_enabled(
        enabled,
        egui::Button::new(
            RichText::new(format!("{icon} {label}"))
                .size(15.0)
                .color(Color32::WHITE),
        )
        .fill(colors::PRIMARY)
        .min_size(egui::vec2(140.0, 32.0)),
    )
}

/// Small red action inside a table row.
pub fn danger_action_button(ui: &mut Ui, icon: &str, label: &str) -> Response {
    ui.button(RichText::new(format!("{icon} {label}")).color(colors::ERROR))
}

/// Tab selector; returns true when clicked.
pub fn tab_button(ui: &mut Ui, selected: bool, label: &str) -> bool {
    ui.selectable_label(selected, RichText::new(label).size(15.0))
        .clicked()
}

/// Centered confirmation window. Returns `Some(true)` on confirm,
/// `Some(false)` on cancel.
pub fn confirm_dialog(ctx: &egui::Context, title: &str, message: &str, confirm_label: &str) -> Option<bool> {
    let mut choice = None;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Annuler").clicked() {
                    choice = Some(false);
                }
                if ui
                    .button(RichText::new(confirm_label).color(colors::ERROR))
                    .clicked()
                {
                    choice = Some(true);
                }
            });
        });
    choice
}
