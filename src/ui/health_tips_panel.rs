//! Health tips library with search, categories, and saved tips.

use eframe::egui::{self, RichText, Ui};
use egui_phosphor::regular::{BOOKMARK_SIMPLE, BOOKMARKS_SIMPLE, CLOCK};

use super::app::{App, TipTab};
use super::components::{back_button, badge, card, colors, panel_header, search_box};
use crate::models::HealthTip;

/// Show the health tips panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Health Tips");

    ui.horizontal(|ui| {
        for (tab, label) in [
            (TipTab::All, "All Tips"),
            (TipTab::Categories, "Categories"),
            (TipTab::Saved, "Saved"),
        ] {
            if ui
                .selectable_label(app.tip_tab == tab, RichText::new(label).size(15.0))
                .clicked()
            {
                app.tip_tab = tab;
            }
        }

        if app.tip_tab == TipTab::All {
            ui.add_space(20.0);
            search_box(ui, &mut app.tip_search, "Search tips...");
        }
    });

    ui.add_space(15.0);

    let mut toggled = None;
    match app.tip_tab {
        TipTab::All => {
            let tips = app.tips.filtered(&app.tip_search);
            if tips.is_empty() {
                ui.label(RichText::new("No tips match your search").weak());
            }
            for tip in tips {
                if tip_card(ui, tip, app.tips.is_saved(tip.id)) {
                    toggled = Some(tip.id);
                }
            }
        }
        TipTab::Categories => {
            for summary in app.tips.categories() {
                card(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(summary.category.label()).size(16.0).strong());
                        ui.label(RichText::new(format!("{} articles", summary.count)).weak());
                    });
                    for title in &summary.titles {
                        ui.label(format!("\u{2022} {title}"));
                    }
                });
            }
        }
        TipTab::Saved => {
            let saved = app.tips.saved();
            if saved.is_empty() {
                ui.label(RichText::new("You haven't saved any tips yet").weak());
            }
            for tip in saved {
                if tip_card(ui, tip, true) {
                    toggled = Some(tip.id);
                }
            }
        }
    }

    if let Some(id) = toggled {
        let saved = app.tips.toggle_saved(id);
        app.log_info(if saved { "Tip saved" } else { "Tip removed from saved" });
    }

    go_back
}

/// Render a tip. Returns `true` if the save toggle was clicked.
fn tip_card(ui: &mut Ui, tip: &HealthTip, saved: bool) -> bool {
    card(ui, |ui| {
        ui.set_min_width(ui.available_width());
        let mut clicked = false;

        ui.horizontal(|ui| {
            badge(ui, tip.category.label(), colors::PRIMARY);
            ui.label(RichText::new(format!("{CLOCK} {}", tip.read_time())).small().weak());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (icon, hover) = if saved {
                    (BOOKMARKS_SIMPLE, "Remove from saved")
                } else {
                    (BOOKMARK_SIMPLE, "Save")
                };
                if ui.small_button(icon).on_hover_text(hover).clicked() {
                    clicked = true;
                }
            });
        });
        ui.label(RichText::new(&tip.title).size(16.0).strong());
        ui.label(RichText::new(&tip.excerpt).weak());

        clicked
    })
}
