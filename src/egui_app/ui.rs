//! egui renderer for the forecasting dashboard.

use eframe::egui::{
    self, Color32, Frame, Margin, RichText, SliderClamping, Ui, Vec2,
};

use crate::egui_app::controller::ForecastController;
use crate::egui_app::state::{ActiveTab, StatusTone};
use crate::egui_app::view_model;
use crate::forecast::PRICE_SENSITIVITY_MAX;

/// Minimum window size the layout is designed for.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(760.0, 480.0);

const PANEL_FILL: Color32 = Color32::from_rgb(16, 16, 16);
const CARD_FILL: Color32 = Color32::from_rgb(26, 26, 26);
const TEXT_MUTED: Color32 = Color32::from_gray(150);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: ForecastController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app, loading configuration and the model artifact.
    pub fn new() -> Result<Self, String> {
        let controller = ForecastController::from_config()?;
        Ok(Self::with_controller(controller))
    }

    /// Wrap an existing controller.
    pub fn with_controller(controller: ForecastController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgb(12, 12, 12);
        visuals.panel_fill = PANEL_FILL;
        visuals.widgets.noninteractive.bg_fill = PANEL_FILL;
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_parameters(&mut self, ctx: &egui::Context) {
        let mut run_clicked = false;
        egui::SidePanel::left("parameters")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                ui.heading("Model Parameters");
                ui.add_space(12.0);

                let inputs = &mut self.controller.ui.inputs;

                ui.label(RichText::new("Inventory Level").color(TEXT_MUTED));
                ui.add(egui::DragValue::new(&mut inputs.inventory_level).speed(1.0))
                    .on_hover_text("Current on-hand inventory units");
                ui.add_space(8.0);

                ui.label(RichText::new("Price (USD)").color(TEXT_MUTED));
                ui.add(
                    egui::DragValue::new(&mut inputs.price)
                        .speed(0.05)
                        .range(0.0..=f64::MAX)
                        .prefix("$")
                        .fixed_decimals(2),
                )
                .on_hover_text("Selling price per unit");
                ui.add_space(8.0);

                ui.label(RichText::new("Summer Season").color(TEXT_MUTED));
                egui::ComboBox::from_id_salt("summer_season_combo")
                    .selected_text(if inputs.seasonality_summer { "Yes" } else { "No" })
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut inputs.seasonality_summer, false, "No");
                        ui.selectable_value(&mut inputs.seasonality_summer, true, "Yes");
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Demand").color(TEXT_MUTED));
                ui.add(egui::DragValue::new(&mut inputs.inventory_demand).speed(1.0))
                    .on_hover_text("Current customer demand for inventory");
                ui.add_space(8.0);

                ui.label(RichText::new("Price Sensitivity").color(TEXT_MUTED));
                let slider = egui::Slider::new(
                    &mut inputs.units_sold_price,
                    0.0..=PRICE_SENSITIVITY_MAX,
                )
                .step_by(0.5)
                .fixed_decimals(1)
                .clamping(SliderClamping::Always);
                ui.add(slider)
                    .on_hover_text("Units sold influenced by price sensitivity");
                ui.add_space(16.0);

                if ui
                    .button(RichText::new("Generate Forecast").strong())
                    .clicked()
                {
                    run_clicked = true;
                }
            });
        if run_clicked {
            self.controller.run_forecast();
        }
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let status = self.controller.ui.status.clone();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::none().fill(Color32::from_rgb(0, 0, 0)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(10.0, 18.0), egui::Sense::hover());
                    ui.painter()
                        .circle_filled(rect.center(), 4.0, status_color(status.tone));
                    ui.label(RichText::new(&status.text).color(Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new(concat!("Demandcast v", env!("CARGO_PKG_VERSION")))
                                .color(TEXT_MUTED)
                                .size(11.0),
                        );
                    });
                });
            });
    }

    fn render_central(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                let tab = self.controller.ui.active_tab;
                if ui
                    .selectable_label(tab == ActiveTab::Dashboard, "Forecast Dashboard")
                    .clicked()
                {
                    self.controller.ui.active_tab = ActiveTab::Dashboard;
                }
                if ui
                    .selectable_label(tab == ActiveTab::InputAnalysis, "Input Analysis")
                    .clicked()
                {
                    self.controller.ui.active_tab = ActiveTab::InputAnalysis;
                }
            });
            ui.separator();
            ui.add_space(8.0);
            match self.controller.ui.active_tab {
                ActiveTab::Dashboard => self.render_dashboard(ui),
                ActiveTab::InputAnalysis => self.render_input_analysis(ui),
            }
        });
    }

    fn render_dashboard(&mut self, ui: &mut Ui) {
        ui.heading("Forecast Results");
        ui.add_space(8.0);
        match self.controller.ui.forecast {
            Some(forecast) => {
                ui.columns(2, |columns| {
                    metric_card(
                        &mut columns[0],
                        "Units Sold",
                        &view_model::group_thousands(forecast.units_sold),
                    );
                    metric_card(
                        &mut columns[1],
                        "Demand Forecast",
                        &view_model::group_thousands(forecast.demand_forecast),
                    );
                });
            }
            None => {
                ui.label(
                    RichText::new("Run a forecast to see predicted units sold and demand.")
                        .color(TEXT_MUTED),
                );
            }
        }
    }

    fn render_input_analysis(&mut self, ui: &mut Ui) {
        ui.heading("Input Parameters");
        ui.add_space(8.0);
        let input = self.controller.current_input();
        egui::Grid::new("input_analysis_grid")
            .striped(true)
            .num_columns(2)
            .min_col_width(140.0)
            .show(ui, |ui| {
                for row in view_model::input_rows(&input) {
                    ui.label(RichText::new(row.name).color(TEXT_MUTED));
                    ui.label(row.value);
                    ui.end_row();
                }
            });
        ui.add_space(8.0);
        ui.label(
            RichText::new(format!(
                "Total potential inventory value: {}",
                view_model::format_usd(input.potential_inventory_value())
            ))
            .color(TEXT_MUTED)
            .size(12.0),
        );
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_parameters(ctx);
        self.render_status(ctx);
        self.render_central(ctx);
    }
}

fn metric_card(ui: &mut Ui, label: &str, value: &str) {
    Frame::none()
        .fill(CARD_FILL)
        .inner_margin(Margin::symmetric(16, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(label).color(TEXT_MUTED).size(13.0));
            ui.label(RichText::new(value).size(30.0).strong());
        });
}

fn status_color(tone: StatusTone) -> Color32 {
    match tone {
        StatusTone::Idle => Color32::from_gray(120),
        StatusTone::Ready => Color32::from_rgb(80, 180, 100),
        StatusTone::Error => Color32::from_rgb(210, 80, 80),
    }
}
