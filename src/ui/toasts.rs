//! Transient notifications drawn in the bottom-right corner.

use std::time::{Duration, Instant};

use eframe::egui::{self, Align2, Color32, CornerRadius, Margin, RichText};

use super::components::colors;
use crate::notify::{Notification, NotificationSink, Severity};

/// Toasts visible at once; older ones are dropped first.
const MAX_VISIBLE: usize = 5;

struct Toast {
    notification: Notification,
    shown_at: Instant,
}

/// On-screen notification queue.
pub struct Toasts {
    entries: Vec<Toast>,
    lifetime: Duration,
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            entries: Vec::new(),
            lifetime,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent notification still on screen.
    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last().map(|t| &t.notification)
    }

    /// Drop toasts older than the configured lifetime.
    fn prune(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.entries
            .retain(|t| now.saturating_duration_since(t.shown_at) < lifetime);
    }

    /// Draw the queue. Keeps repainting while anything is visible.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.prune(Instant::now());
        if self.entries.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_max_width(320.0);
                for (idx, toast) in self.entries.iter().enumerate() {
                    let n = &toast.notification;
                    let accent = match n.severity {
                        Severity::Info => colors::PRIMARY,
                        Severity::Success => colors::SUCCESS,
                        Severity::Destructive => colors::ERROR,
                    };

                    egui::Frame::new()
                        .fill(ui.style().visuals.window_fill)
                        .stroke(egui::Stroke::new(1.0, accent))
                        .inner_margin(Margin::same(12))
                        .corner_radius(CornerRadius::same(6))
                        .show(ui, |ui| {
                            ui.set_width(296.0);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&n.title).strong().color(accent));
                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                    if ui.small_button("x").clicked() {
                                        dismissed = Some(idx);
                                    }
                                });
                            });
                            if !n.description.is_empty() {
                                ui.label(RichText::new(&n.description).color(Color32::GRAY));
                            }
                        });
                    ui.add_space(6.0);
                }
            });

        if let Some(idx) = dismissed {
            self.entries.remove(idx);
        }
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl NotificationSink for Toasts {
    fn notify(&mut self, notification: Notification) {
        tracing::debug!("Toast: {} - {}", notification.title, notification.description);
        self.entries.push(Toast {
            notification,
            shown_at: Instant::now(),
        });
        if self.entries.len() > MAX_VISIBLE {
            self.entries.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_capped() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        for i in 0..8 {
            toasts.notify(Notification::info(format!("toast {i}"), ""));
        }
        assert_eq!(toasts.len(), MAX_VISIBLE);
        assert_eq!(toasts.latest().unwrap().title, "toast 7");
    }

    #[test]
    fn test_expired_toasts_are_pruned() {
        let mut toasts = Toasts::new(Duration::from_secs(4));
        toasts.notify(Notification::success("Saved", "done"));

        toasts.prune(Instant::now());
        assert_eq!(toasts.len(), 1);

        toasts.prune(Instant::now() + Duration::from_secs(5));
        assert!(toasts.is_empty());
    }
}
