use bevy_egui::{egui, EguiContexts};

/// Dark slate panels with a signal-green accent.
pub fn apply_panel_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgb(28, 32, 36);
    let inactive = egui::Color32::from_rgb(46, 52, 58);
    let hover = egui::Color32::from_rgb(62, 74, 80);
    let active = egui::Color32::from_rgb(60, 170, 110);

    for (widget, fill) in [
        (&mut style.visuals.widgets.inactive, inactive),
        (&mut style.visuals.widgets.hovered, hover),
        (&mut style.visuals.widgets.active, active),
    ] {
        widget.bg_fill = fill;
        widget.weak_bg_fill = fill;
        widget.corner_radius = egui::CornerRadius::same(4);
    }
    style.visuals.widgets.noninteractive.bg_fill = panel;
    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(4);

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.extreme_bg_color = egui::Color32::from_rgb(20, 22, 26);

    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, active);

    ctx.set_style(style);
}
