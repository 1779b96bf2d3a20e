use std::time::Instant;

use egui::FontDefinitions;
use egui_wgpu_backend::RenderPass;
use egui_wgpu_backend::ScreenDescriptor;
use egui_winit_platform::PlatformDescriptor;
use wgpu::SurfaceConfiguration;

use predictor::{format_usd, Gender, RequestStatus};

use crate::app_state::AppState;
use crate::config::CONFIG;

pub struct Hud {
    platform: egui_winit_platform::Platform,
    rpass: RenderPass,
    started: Instant,
    ui: HudUi,
}

impl Hud {
    pub fn new(
        window: &winit::window::Window,
        device: &mut wgpu::Device,
        surface_config: &SurfaceConfiguration,
    ) -> Self {
        // We use the egui_winit_platform crate as the platform.
        let size = window.inner_size();
        let platform = egui_winit_platform::Platform::new(PlatformDescriptor {
            physical_width: size.width as u32,
            physical_height: size.height as u32,
            scale_factor: window.scale_factor(),
            font_definitions: FontDefinitions::default(),
            style: Default::default(),
        });
        // We use the egui_wgpu_backend crate as the render backend.
        let rpass = RenderPass::new(device, surface_config.format, 1);

        let ui = HudUi {
            form_window: FormWindow { open: true },
            estimate_window: EstimateWindow { open: true },
            stats_window: StatsWindow {
                open: CONFIG.general.display_framerate,
            },
            quit: false,
        };

        Self {
            platform,
            rpass,
            started: Instant::now(),
            ui,
        }
    }

    pub fn paint(
        &mut self,
        app_state: &mut AppState,
        window: &winit::window::Window,
        device: &mut wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        frame: &wgpu::SurfaceTexture,
    ) {
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Begin to draw the UI frame.
        self.platform.update_time(self.started.elapsed().as_secs_f64());
        self.platform.begin_frame();

        self.ui.ui(&self.platform.context(), app_state);

        // End the UI frame. We could now handle the output and draw the UI with the backend.
        let full_output = self.platform.end_frame(Some(window));
        let paint_jobs = self.platform.context().tessellate(full_output.shapes);

        // Upload all resources for the GPU.
        let size = window.inner_size();
        let screen_descriptor = ScreenDescriptor {
            physical_width: size.width,
            physical_height: size.height,
            scale_factor: window.scale_factor() as f32,
        };
        let tdelta: egui::TexturesDelta = full_output.textures_delta;
        self.rpass
            .add_textures(device, queue, &tdelta)
            .expect("add texture ok");
        self.rpass
            .update_buffers(device, queue, &paint_jobs, &screen_descriptor);

        // Record all render passes.
        self.rpass
            .execute(
                encoder,
                &view,
                &paint_jobs,
                &screen_descriptor,
                Some(wgpu::Color {
                    r: 0.016,
                    g: 0.024,
                    b: 0.059,
                    a: 1.0,
                }),
            )
            .unwrap();
        self.rpass
            .remove_textures(tdelta)
            .expect("remove texture ok");
    }

    pub fn interact(&mut self, event: &winit::event::Event<()>) -> bool {
        self.platform.handle_event(event);
        self.platform.captures_event(event)
    }

    pub fn quit_requested(&self) -> bool {
        self.ui.quit
    }
}

struct HudUi {
    form_window: FormWindow,
    estimate_window: EstimateWindow,
    stats_window: StatsWindow,
    quit: bool,
}

impl HudUi {
    pub fn ui(&mut self, ctx: &egui::Context, app_state: &mut AppState) {
        // Draw menubar.
        egui::TopBottomPanel::top("Main Menu Bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        self.quit = true;
                        ui.close_menu();
                    }
                });

                ui.label(&format!(
                    "Frametime {:.2}",
                    app_state.stats.average_frametime()
                ));
            });
        });

        self.form_window.ui(ctx, app_state);

        self.estimate_window.ui(ctx, app_state);

        self.stats_window.ui(ctx, app_state);
    }
}

struct FormWindow {
    open: bool,
}

impl FormWindow {
    pub fn ui(&mut self, ctx: &egui::Context, app_state: &mut AppState) {
        egui::Window::new("Customer Details")
            .default_pos([40.0, 60.0])
            .default_width(420.0)
            .open(&mut self.open)
            .show(ctx, |ui| {
                let mut edited = false;

                egui::Grid::new("customer details")
                    .num_columns(2)
                    .spacing([24.0, 8.0])
                    .show(ui, |ui| {
                        let form = &mut app_state.form;

                        ui.label("Country");
                        edited |= ui.text_edit_singleline(&mut form.country).changed();
                        ui.end_row();

                        ui.label("Gender");
                        egui::ComboBox::from_id_source("gender")
                            .selected_text(form.gender.as_str())
                            .show_ui(ui, |ui| {
                                edited |= ui
                                    .selectable_value(&mut form.gender, Gender::Male, "Male")
                                    .changed();
                                edited |= ui
                                    .selectable_value(&mut form.gender, Gender::Female, "Female")
                                    .changed();
                            });
                        ui.end_row();

                        ui.label("Age");
                        edited |= ui.text_edit_singleline(&mut form.age).changed();
                        ui.end_row();

                        ui.label("Annual Salary");
                        edited |= ui.text_edit_singleline(&mut form.annual_salary).changed();
                        ui.end_row();

                        ui.label("Credit Card Debt");
                        edited |= ui
                            .text_edit_singleline(&mut form.credit_card_debt)
                            .changed();
                        ui.end_row();

                        ui.label("Net Worth");
                        edited |= ui.text_edit_singleline(&mut form.net_worth).changed();
                        ui.end_row();
                    });

                if edited {
                    app_state.tracker.acknowledge_edit();
                }

                ui.separator();

                let loading = app_state.tracker.is_loading();
                let label = if loading {
                    "Processing..."
                } else {
                    "Predict Car Price"
                };
                if ui
                    .add_enabled(!loading, egui::Button::new(label))
                    .clicked()
                {
                    app_state.submit();
                }
            });
    }
}

struct EstimateWindow {
    open: bool,
}

impl EstimateWindow {
    pub fn ui(&mut self, ctx: &egui::Context, app_state: &mut AppState) {
        egui::Window::new("Estimate")
            .default_pos([520.0, 60.0])
            .default_width(400.0)
            .default_height(120.0)
            .open(&mut self.open)
            .show(ctx, |ui| match app_state.tracker.status() {
                RequestStatus::Idle => {
                    ui.label("Complete the form to see the prediction here.");
                }
                RequestStatus::Loading => {
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new());
                        ui.label("Processing...");
                    });
                }
                RequestStatus::Success(amount) => {
                    ui.label("Estimated Purchase");
                    ui.heading(
                        egui::RichText::new(format_usd(*amount))
                            .size(28.0)
                            .color(egui::Color32::from_rgb(16, 185, 129)),
                    );
                }
                RequestStatus::Failure(message) => {
                    ui.colored_label(
                        egui::Color32::from_rgb(239, 68, 68),
                        format!("Error: {}", message),
                    );
                }
            });
    }
}

struct StatsWindow {
    open: bool,
}

impl StatsWindow {
    pub fn ui(&mut self, ctx: &egui::Context, app_state: &mut AppState) {
        egui::Window::new("Stats")
            .default_pos([60.0, 420.0])
            .default_width(400.0)
            .default_height(100.0)
            .open(&mut self.open)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Frametime {:.2}",
                    app_state.stats.average_frametime()
                ));
                match app_state.stats.last_round_trip() {
                    Some(elapsed) => {
                        ui.label(format!("Last prediction took {} ms", elapsed.as_millis()));
                    }
                    None => {
                        ui.label("No prediction sent yet.");
                    }
                }
            });
    }
}
