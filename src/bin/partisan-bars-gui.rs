/*!
 * Live view for partisan-bars
 *
 * Shows the chart with its sort toggle, hover tooltips and the staggered
 * re-ordering animation. Wall-clock time since start-up drives the chart's
 * virtual clock, so the automatic sort happens two seconds after launch
 * unless the checkbox is used first.
 *
 * Usage: partisan-bars-gui [dataset.json|dataset.csv]
 */

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use partisan_bars::viz::{Anchor, Element, Frame, Layer};
use partisan_bars::{Chart, ChartConfig, storage};
use std::time::Instant;

const DEMO_DATA: &str = include_str!("../../data/states.json");

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let dataset = match std::env::args().nth(1) {
        Some(path) => storage::load_dataset(&path),
        None => storage::parse_json(DEMO_DATA),
    };
    let chart = dataset.and_then(|ds| Chart::new(ds, ChartConfig::default()));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1140.0, 700.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Median income by state - partisan-bars"),
        ..Default::default()
    };

    eframe::run_native(
        "partisan-bars",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(chart)))),
    )
}

struct App {
    chart: Option<Chart>,
    error_message: String,
    started: Instant,
    sorted: bool,
}

impl App {
    fn new(chart: anyhow::Result<Chart>) -> Self {
        let (chart, error_message) = match chart {
            Ok(c) => (Some(c), String::new()),
            Err(e) => (None, format!("{e:#}")),
        };
        Self {
            chart,
            error_message,
            started: Instant::now(),
            sorted: false,
        }
    }

    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = self.elapsed_ms();
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(chart) = self.chart.as_mut() else {
                ui.colored_label(Color32::RED, &self.error_message);
                return;
            };

            if let Err(e) = chart.advance_to(now) {
                self.error_message = format!("{e:#}");
            }
            // auto-sort flips the checkbox too
            self.sorted = chart.is_checked();

            ui.horizontal(|ui| {
                if ui
                    .checkbox(&mut self.sorted, "Sort by median income")
                    .changed()
                    && let Err(e) = chart.toggle(self.sorted)
                {
                    self.error_message = format!("{e:#}");
                }
                if !self.error_message.is_empty() {
                    ui.colored_label(Color32::RED, &self.error_message);
                }
            });
            ui.separator();

            let frame = chart.frame();
            paint_frame(ui, &frame);

            if chart.is_animating() || chart.pending_events() > 0 {
                ctx.request_repaint();
            }
        });
    }
}

fn color32(c: plotters::style::RGBColor, opacity: f64) -> Color32 {
    Color32::from_rgba_unmultiplied(c.0, c.1, c.2, (opacity.clamp(0.0, 1.0) * 255.0) as u8)
}

fn paint_frame(ui: &mut egui::Ui, frame: &Frame) {
    let size = Vec2::new(frame.width as f32, frame.height as f32);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let at = |x: f64, y: f64| Pos2::new(origin.x + x as f32, origin.y + y as f32);

    painter.rect_filled(response.rect, 0.0, Color32::WHITE);

    for item in &frame.items {
        match &item.element {
            Element::Bar(b) => {
                let rect = Rect::from_min_size(at(b.x, b.y), Vec2::new(b.width as f32, b.height as f32));
                painter.rect_filled(rect, 0.0, color32(b.fill, b.opacity));
                let id = ui.id().with(("bar", item.key.key.as_str()));
                ui.interact(rect, id, Sense::hover()).on_hover_ui(|ui| {
                    ui.strong(&b.tooltip.title);
                    ui.label(&b.tooltip.content);
                });
            }
            Element::Rule(r) => {
                let stroke = Stroke::new(1.0, color32(r.color, 1.0));
                let pts = [at(r.from.0, r.from.1), at(r.to.0, r.to.1)];
                match r.dash {
                    Some((on, off)) => {
                        painter.extend(egui::Shape::dashed_line(&pts, stroke, on as f32, off as f32));
                    }
                    None => {
                        painter.line_segment(pts, stroke);
                    }
                }
            }
            Element::Label(l) => {
                let color = color32(l.color, 1.0);
                let font = FontId::proportional(l.font_px as f32);
                if l.rotated {
                    let galley = painter.layout_no_wrap(l.text.clone(), font, color);
                    // rotate about the baseline start; shift so glyphs centre on x
                    let half_h = galley.size().y / 2.0;
                    let pos = at(l.x, l.y) + Vec2::new(half_h, 0.0);
                    painter.add(
                        egui::epaint::TextShape::new(pos, galley, color)
                            .with_angle(std::f32::consts::FRAC_PI_2),
                    );
                } else {
                    let align = match l.anchor {
                        Anchor::Start => Align2::LEFT_BOTTOM,
                        Anchor::Middle => Align2::CENTER_BOTTOM,
                        Anchor::End => Align2::RIGHT_BOTTOM,
                    };
                    painter.text(at(l.x, l.y), align, &l.text, font, color);
                }
            }
        }
    }

    if frame.layer(Layer::Bars).next().is_none() {
        painter.text(
            response.rect.center(),
            Align2::CENTER_CENTER,
            "no data",
            FontId::proportional(16.0),
            Color32::GRAY,
        );
    }
}
