mod app_state;
mod config;
mod drawing;
mod stats;

use crate::config::CONFIG;
use winit::{
    event::{Event, KeyboardInput, VirtualKeyCode, WindowEvent},
    event_loop::ControlFlow,
};

fn main() {
    log::set_max_level(CONFIG.general.log_level.to_level_filter());
    pretty_env_logger::init();

    let event_loop = winit::event_loop::EventLoop::new();

    let mut app_state = app_state::AppState::new();
    let mut painter =
        drawing::Painter::init(&event_loop, CONFIG.window.width, CONFIG.window.height);
    let mut hud = drawing::ui::Hud::new(
        &painter.window,
        &mut painter.device,
        &painter.surface_config,
    );

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        let route_keyboard = !hud.interact(&event);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Destroyed | WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(physical_size) => {
                    painter.resize(physical_size.width, physical_size.height);
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(keycode),
                            ..
                        },
                    ..
                } => {
                    if route_keyboard {
                        if let VirtualKeyCode::Escape = keycode {
                            *control_flow = ControlFlow::Exit;
                        }
                    }
                }
                _ => (),
            },
            Event::MainEventsCleared => {
                app_state.update();
                painter.paint(&mut hud, &mut app_state);

                if hud.quit_requested() {
                    *control_flow = ControlFlow::Exit;
                }

                app_state.stats.capture_frame();
                if CONFIG.general.display_framerate {
                    println!("Frametime {:.2}", app_state.stats.average_frametime());
                }
            }
            _ => (),
        }
    });
}
