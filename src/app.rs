use std::sync::Arc;
use std::time::Instant;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::error::VitrineError;
use crate::gfx::picking::SceneRayCaster;
use crate::gfx::render_engine::RenderEngine;
use crate::gfx::scene::Scene;
use crate::gfx::viewport::{sync_viewport, DrawSurface};
use crate::input::DragSelector;
use crate::scenes::{SceneKind, SceneScript};

pub struct VitrineApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    script: Box<dyn SceneScript>,
    selector: DragSelector,
    /// Last pointer position in logical pixels.
    cursor: (f64, f64),
    started: Instant,
    last_frame: Instant,
}

impl VitrineApp {
    /// Builds the scene and prepares the event loop. The window and GPU
    /// context come up when the loop starts.
    pub fn new(kind: SceneKind) -> Result<Self, VitrineError> {
        let event_loop = EventLoop::new()?;

        let mut script = kind.script();
        let scene = script.build();
        info!(
            "scene `{}` ready: {} objects, {} model loads in flight",
            script.name(),
            scene.objects.len(),
            scene.pending_loads()
        );

        let now = Instant::now();
        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                scene,
                script,
                selector: DragSelector::new(),
                cursor: (0.0, 0.0),
                started: now,
                last_frame: now,
            },
        })
    }

    /// Runs the application (consumes self and starts the event loop).
    pub fn run(mut self) -> Result<(), VitrineError> {
        let event_loop = self.event_loop.take().expect("Event loop already consumed");
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;
        Ok(())
    }
}

/// The window/engine pair as the viewport driver sees it: a layout size,
/// a scale factor, and a resizable backing buffer.
struct EngineSurface<'a> {
    window: &'a Window,
    engine: &'a mut RenderEngine,
}

impl DrawSurface for EngineSurface<'_> {
    fn display_size(&self) -> (f64, f64) {
        let size = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        (size.width, size.height)
    }

    fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    fn backing_size(&self) -> (u32, u32) {
        self.engine.size()
    }

    fn resize_backing(&mut self, width: u32, height: u32) {
        self.engine.resize(width, height);
    }
}

impl AppState {
    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(engine) = self.render_engine.as_mut() else {
            return;
        };
        let Some(window) = self.window.as_ref() else {
            return;
        };

        // Viewport sync first, so the projection matches the backing
        // buffer before anything draws.
        {
            let mut surface = EngineSurface { window, engine };
            sync_viewport(&mut surface, &mut self.scene.camera_rig.camera);
        }

        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        let elapsed = (now - self.started).as_secs_f32();

        self.script.update(&mut self.scene, elapsed, dt);
        self.scene.update(dt);
        engine.prepare_scene(&mut self.scene);

        match engine.render_frame(&self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("render surface lost, reconfiguring");
                let (width, height) = engine.size();
                engine.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("render surface out of memory, shutting down");
                event_loop.exit();
            }
            Err(err) => warn!("frame skipped: {err}"),
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title(format!("vitrine - {}", self.script.name()))
            .with_inner_size(winit::dpi::LogicalSize::new(1200, 800));

        match event_loop.create_window(attributes) {
            Ok(window) => {
                let window_handle = Arc::new(window);
                self.window = Some(window_handle.clone());

                let (width, height) = window_handle.inner_size().into();
                let window_clone = window_handle.clone();
                let renderer = pollster::block_on(async move {
                    RenderEngine::new(window_clone, width, height).await
                });

                self.render_engine = Some(renderer);
            }
            Err(err) => {
                error!("failed to create window: {err}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.as_ref().cloned() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event:
                    winit::event::KeyEvent {
                        physical_key:
                            winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                // The viewport driver reconciles sizes at the top of the
                // next frame.
                window.request_redraw();
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(window.scale_factor());
                self.cursor = (logical.x, logical.y);

                self.selector
                    .on_pointer_move(logical.x, logical.y, &mut self.scene.objects);
                if self.scene.camera_rig.process_event(&event) || self.selector.is_dragging() {
                    window.request_redraw();
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                match state {
                    ElementState::Pressed => {
                        let size = window
                            .inner_size()
                            .to_logical::<f64>(window.scale_factor());
                        let caster =
                            SceneRayCaster::new(&self.scene, &self.scene.camera_rig.camera);
                        self.selector.on_pointer_down(
                            self.cursor.0,
                            self.cursor.1,
                            (size.width, size.height),
                            &caster,
                        );
                    }
                    ElementState::Released => self.selector.on_pointer_up(),
                }
                self.scene.camera_rig.process_event(&event);
            }
            WindowEvent::MouseWheel { .. } => {
                if self.scene.camera_rig.process_event(&event) {
                    window.request_redraw();
                }
            }
            WindowEvent::CursorLeft { .. } => {
                // A drag that leaves the window would otherwise stay open
                // forever; release it.
                self.selector.on_pointer_up();
                self.scene.camera_rig.process_event(&event);
            }
            WindowEvent::Focused(false) => {
                self.selector.on_pointer_up();
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
