/// Virtualised vault tree widget.
///
/// Only rows inside the viewport are painted, using the flat
/// `visible_rows` list maintained by `AppState`. Clicks are collected while
/// painting and applied afterwards so the row list is never mutated while
/// it is being read.
use crate::state::{AppPhase, AppState};
use crate::theme::NotepaneTheme;
use egui::{Rect, Response, Sense, Ui, Vec2};

/// Height of each row in pixels.
const ROW_HEIGHT: f32 = 24.0;

/// Indentation per depth level in pixels.
const INDENT_PX: f32 = 16.0;

/// Width reserved for the expand arrow / bullet.
const ICON_WIDTH: f32 = 18.0;

/// Draw the tree view.
pub fn tree_view(ui: &mut Ui, state: &mut AppState) -> Response {
    if state.tree.is_none() {
        let message = match state.phase {
            AppPhase::Scanning => "Scanning vault...",
            _ => "No vault loaded",
        };
        ui.centered_and_justified(|ui| {
            ui.label(egui::RichText::new(message).color(ui.visuals().weak_text_color()));
        });
        return ui.interact(ui.max_rect(), ui.id().with("empty_tree"), Sense::click());
    }

    if state.visible_rows.is_empty() {
        ui.label(
            egui::RichText::new("No markdown files in this vault")
                .color(ui.visuals().weak_text_color()),
        );
    }

    let theme = NotepaneTheme::for_mode(state.theme);
    let (activated, copy_path) = render_rows(ui, state, &theme);

    if let Some(path) = activated {
        state.activate(&path);
    }
    if let Some(path) = copy_path {
        ui.ctx().copy_text(path);
    }

    ui.interact(ui.max_rect(), ui.id().with("tree_bg"), Sense::hover())
}

/// Paint the visible rows. Returns the path of a clicked row and the path
/// chosen for "Copy Path", for deferred handling.
fn render_rows(
    ui: &mut Ui,
    state: &AppState,
    theme: &NotepaneTheme,
) -> (Option<String>, Option<String>) {
    let total_rows = state.visible_rows.len();
    let total_height = total_rows as f32 * ROW_HEIGHT;

    let mut activated: Option<String> = None;
    let mut copy_path: Option<String> = None;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            // Reserve the full virtual height so the scrollbar is correct.
            let (response, painter) = ui.allocate_painter(
                Vec2::new(ui.available_width(), total_height),
                Sense::hover(),
            );

            let viewport = ui.clip_rect();
            let top_y = response.rect.top();

            let first_visible = ((viewport.top() - top_y) / ROW_HEIGHT).floor().max(0.0) as usize;
            let last_visible = ((viewport.bottom() - top_y) / ROW_HEIGHT)
                .ceil()
                .clamp(0.0, total_rows as f32) as usize;

            for row_idx in first_visible..last_visible {
                let row = &state.visible_rows[row_idx];

                let row_rect = Rect::from_min_size(
                    egui::pos2(response.rect.left(), top_y + row_idx as f32 * ROW_HEIGHT),
                    Vec2::new(response.rect.width(), ROW_HEIGHT),
                );

                let row_response = ui.interact(
                    row_rect,
                    ui.id().with(("tree_row", row_idx)),
                    Sense::click(),
                );

                let is_selected = state.selected.as_deref() == Some(row.path.as_str());
                if is_selected {
                    painter.rect_filled(row_rect, 0.0, theme.selection);
                    if state.tree_focused {
                        painter.rect_stroke(
                            row_rect.shrink(0.5),
                            0.0,
                            egui::Stroke::new(1.0, theme.accent),
                            egui::StrokeKind::Inside,
                        );
                    }
                } else if row_response.hovered() {
                    painter.rect_filled(row_rect, 0.0, theme.surface_hover);
                }

                if row_response.clicked() {
                    activated = Some(row.path.clone());
                }
                row_response
                    .on_hover_text(row.path.as_str())
                    .context_menu(|ui| {
                        if ui.button("📋 Copy Path").clicked() {
                            copy_path = Some(row.path.clone());
                            ui.close_menu();
                        }
                    });

                // Root children sit at depth 1 and start flush left.
                let indent = INDENT_PX * row.depth.saturating_sub(1) as f32;
                let icon_x = row_rect.left() + indent + 6.0;
                let text_y = row_rect.center().y;

                let icon = match (row.is_dir, row.is_expanded) {
                    (true, true) => "▼",
                    (true, false) => "▶",
                    (false, _) => "•",
                };
                painter.text(
                    egui::pos2(icon_x, text_y),
                    egui::Align2::LEFT_CENTER,
                    icon,
                    egui::FontId::proportional(11.0),
                    theme.text_muted,
                );

                let name_color = if row.is_dir {
                    theme.accent
                } else {
                    theme.text_primary
                };
                let name_x = icon_x + ICON_WIDTH;
                let max_name_w = (row_rect.right() - name_x - 4.0).max(20.0);
                let galley = painter.layout_no_wrap(
                    row.name.to_string(),
                    egui::FontId::proportional(13.0),
                    name_color,
                );
                let name_pos = egui::pos2(name_x, text_y - galley.size().y / 2.0);

                if galley.size().x <= max_name_w {
                    painter.galley(name_pos, galley, name_color);
                } else {
                    // Clip long names and add an ellipsis.
                    let clip = Rect::from_min_size(
                        egui::pos2(name_x, row_rect.top()),
                        Vec2::new(max_name_w - 12.0, ROW_HEIGHT),
                    );
                    painter
                        .with_clip_rect(painter.clip_rect().intersect(clip))
                        .galley(name_pos, galley, name_color);
                    painter.text(
                        egui::pos2(name_x + max_name_w - 12.0, text_y),
                        egui::Align2::LEFT_CENTER,
                        "…",
                        egui::FontId::proportional(13.0),
                        theme.text_muted,
                    );
                }
            }

            response
        });

    (activated, copy_path)
}
