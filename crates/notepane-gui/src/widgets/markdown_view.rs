/// Read-only markdown renderer for the block model.
use crate::markdown::{Block, Span};
use crate::theme::NotepaneTheme;
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId, Stroke, Ui};

/// Body text size in points.
pub const BODY_SIZE: f32 = 14.0;

/// Heading sizes for levels 1-4; deeper levels use the body size.
const HEADING_SIZES: [f32; 4] = [28.0, 24.0, 20.0, 16.0];

const LIST_INDENT: f32 = 18.0;
const QUOTE_INDENT: f32 = 12.0;

pub fn heading_size(level: u8) -> f32 {
    match level {
        1..=4 => HEADING_SIZES[usize::from(level) - 1],
        _ => BODY_SIZE,
    }
}

/// Render `blocks`. Link spans open in the system browser when clicked.
pub fn markdown_view(ui: &mut Ui, blocks: &[Block], theme: &NotepaneTheme) {
    for block in blocks {
        match block {
            Block::Heading { level, spans } => {
                ui.add_space(6.0);
                let job = spans_job(spans, heading_size(*level), theme, true);
                ui.label(job);
                ui.add_space(2.0);
            }
            Block::Paragraph(spans) => {
                paragraph(ui, spans, theme);
                ui.add_space(6.0);
            }
            Block::ListItem {
                depth,
                marker,
                spans,
            } => {
                ui.horizontal_wrapped(|ui| {
                    ui.add_space(LIST_INDENT * *depth as f32);
                    ui.label(
                        egui::RichText::new(format!("{marker:>3}"))
                            .size(BODY_SIZE)
                            .color(theme.text_muted),
                    );
                    paragraph(ui, spans, theme);
                });
            }
            Block::Code { language, text } => {
                egui::Frame::new()
                    .fill(theme.surface)
                    .stroke(Stroke::new(1.0, theme.selection))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(4.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        if let Some(language) = language {
                            ui.label(
                                egui::RichText::new(language)
                                    .size(11.0)
                                    .color(theme.text_muted),
                            );
                        }
                        ui.label(
                            egui::RichText::new(text)
                                .font(FontId::monospace(13.0))
                                .color(theme.text_primary),
                        );
                    });
                ui.add_space(6.0);
            }
            Block::Quote { depth, spans } => {
                ui.horizontal_wrapped(|ui| {
                    for _ in 0..*depth {
                        ui.label(egui::RichText::new("▍").color(theme.text_muted));
                        ui.add_space(QUOTE_INDENT - 8.0);
                    }
                    let muted = quoted(spans);
                    paragraph(ui, &muted, theme);
                });
                ui.add_space(6.0);
            }
            Block::Rule => {
                ui.separator();
            }
        }
    }
}

/// Lay out one paragraph. Paragraphs with links are drawn span by span so
/// each link is clickable; plain paragraphs use a single wrapped job.
fn paragraph(ui: &mut Ui, spans: &[Span], theme: &NotepaneTheme) {
    if spans.iter().all(|span| span.link.is_none()) {
        ui.label(spans_job(spans, BODY_SIZE, theme, false));
        return;
    }

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            let job = spans_job(std::slice::from_ref(span), BODY_SIZE, theme, false);
            match &span.link {
                Some(url) => {
                    if ui.link(job).on_hover_text(url.as_str()).clicked() {
                        ui.ctx().open_url(egui::OpenUrl::new_tab(url));
                    }
                }
                None => {
                    ui.label(job);
                }
            }
        }
    });
}

/// Quote text is drawn in italics.
fn quoted(spans: &[Span]) -> Vec<Span> {
    spans
        .iter()
        .cloned()
        .map(|span| Span {
            emphasis: true,
            ..span
        })
        .collect()
}

fn spans_job(spans: &[Span], size: f32, theme: &NotepaneTheme, bold: bool) -> LayoutJob {
    let mut job = LayoutJob::default();
    for span in spans {
        job.append(&span.text, 0.0, span_format(span, size, theme, bold));
    }
    job
}

fn span_format(span: &Span, size: f32, theme: &NotepaneTheme, bold: bool) -> TextFormat {
    let font_id = if span.code {
        FontId::monospace(size - 1.0)
    } else {
        FontId::proportional(size)
    };

    let mut color = theme.text_primary;
    if span.strong || bold {
        color = strong_color(theme);
    }
    if span.link.is_some() {
        color = theme.accent;
    }

    TextFormat {
        font_id,
        color,
        italics: span.emphasis,
        background: if span.code {
            theme.selection
        } else {
            Color32::TRANSPARENT
        },
        strikethrough: if span.strikethrough {
            Stroke::new(1.0, color)
        } else {
            Stroke::NONE
        },
        underline: if span.link.is_some() {
            Stroke::new(1.0, color)
        } else {
            Stroke::NONE
        },
        ..Default::default()
    }
}

/// egui has no bold weight for the default font, so strong text is drawn
/// at full contrast instead.
fn strong_color(theme: &NotepaneTheme) -> Color32 {
    if theme.background.r() < 128 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}
