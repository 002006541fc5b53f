//! Dorayaki entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent};

    use dorayaki::Settings;
    use dorayaki::renderer::{RenderState, scene_vertices};
    use dorayaki::sim::{Camera, SimEvent, SimState, pick, spawn_dorayaki, tick};

    /// App instance holding all state shared by the timer, input and frame callbacks
    struct App {
        state: SimState,
        camera: Camera,
        render_state: Option<RenderState>,
        /// Live counts last logged
        last_logged: (usize, usize),
    }

    impl App {
        fn new(settings: &Settings, seed: u64, width: f32, height: f32) -> Self {
            Self {
                state: SimState::with_config(settings.variant, seed, settings.sim_config()),
                camera: Camera::new(width, height),
                render_state: None,
                last_logged: (0, 0),
            }
        }

        /// Advance one frame and hand lifecycle events to the scene
        fn update(&mut self) {
            tick(&mut self.state, &self.camera);

            for event in self.state.drain_events() {
                match event {
                    SimEvent::DorayakiSpawned(id) => log::trace!("scene add dorayaki {}", id),
                    SimEvent::DorayakiRemoved(id) => log::trace!("scene remove dorayaki {}", id),
                    SimEvent::BeamFired { id, .. } => log::trace!("scene add beam {}", id),
                    SimEvent::BeamRemoved(id) => log::trace!("scene remove beam {}", id),
                }
            }

            let counts = (self.state.dorayakis.len(), self.state.beams.len());
            if self.state.frame % 600 == 0 && counts != self.last_logged {
                log::debug!("Live: {} dorayaki, {} beams", counts.0, counts.1);
                self.last_logged = counts;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene_vertices(&self.state, &self.camera);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn resize(&mut self, css_w: f32, css_h: f32, px_w: u32, px_h: u32) {
            self.camera.set_viewport(css_w, css_h);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(px_w, px_h);
            }
        }
    }

    fn browser_window() -> Result<web_sys::Window, JsValue> {
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
    }

    /// Canvas pixel size for the current window size
    fn viewport_size(window: &web_sys::Window) -> Result<(f32, f32, u32, u32), JsValue> {
        let css_w = window.inner_width()?.as_f64().unwrap_or(1.0);
        let css_h = window.inner_height()?.as_f64().unwrap_or(1.0);
        let dpr = window.device_pixel_ratio();
        Ok((
            css_w as f32,
            css_h as f32,
            (css_w * dpr).max(1.0) as u32,
            (css_h * dpr).max(1.0) as u32,
        ))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dorayaki starting...");

        let window = browser_window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let mut settings = Settings::load();
        settings.apply_query(&window.location().search()?);
        settings.save();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let (css_w, css_h, width, height) = viewport_size(&window)?;
        canvas.set_width(width);
        canvas.set_height(height);

        let app = Rc::new(RefCell::new(App::new(&settings, seed, css_w, css_h)));
        log::info!(
            "Variant '{}' initialized with seed: {}",
            settings.variant.as_str(),
            seed
        );

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        app.borrow_mut().render_state = Some(render_state);

        setup_spawn_timer(&window, app.clone(), settings.spawn_interval_ms)?;
        setup_resize_handler(&window, &canvas, app.clone())?;
        if settings.variant.picking_enabled() {
            setup_click_handler(&canvas, app.clone())?;
        }

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        request_animation_frame(app);

        log::info!("Dorayaki running!");
        Ok(())
    }

    fn setup_spawn_timer(
        window: &web_sys::Window,
        app: Rc<RefCell<App>>,
        interval_ms: u32,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut a = app.borrow_mut();
            let App { state, camera, .. } = &mut *a;
            spawn_dorayaki(state, camera);
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms.min(i32::MAX as u32) as i32,
        )?;
        closure.forget();
        Ok(())
    }

    fn setup_resize_handler(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) -> Result<(), JsValue> {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Ok(window) = browser_window() else {
                return;
            };
            match viewport_size(&window) {
                Ok((css_w, css_h, px_w, px_h)) => {
                    canvas.set_width(px_w);
                    canvas.set_height(px_h);
                    app.borrow_mut().resize(css_w, css_h, px_w, px_h);
                }
                Err(e) => log::warn!("Resize failed: {:?}", e),
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_click_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let x = event.client_x() as f32 - rect.left() as f32;
            let y = event.client_y() as f32 - rect.top() as f32;
            let ndc = Camera::viewport_to_ndc(x, y, rect.width() as f32, rect.height() as f32);

            let mut a = app.borrow_mut();
            let App { state, camera, .. } = &mut *a;
            pick(state, camera, ndc);
        });
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Ok(window) = browser_window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            a.update();
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_app::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dorayaki::Settings;

    env_logger::init();
    log::info!("Dorayaki (native) starting...");
    log::info!("Native mode runs the simulation headless - run with `trunk serve` for the web version");

    // Optional query-style overrides, e.g. `variant=bounce&seed=7`
    let mut settings = Settings::default();
    if let Some(query) = std::env::args().nth(1) {
        settings.apply_query(&query);
    }

    run_headless(&settings, 30);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate `seconds` of wall time at the nominal frame rate, spawning on the timer cadence
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(settings: &dorayaki::Settings, seconds: u32) {
    use dorayaki::consts::NOMINAL_FPS;
    use dorayaki::sim::{Camera, SimEvent, SimState, spawn_dorayaki, tick};

    let seed = settings.seed.unwrap_or(0x5EED);
    let camera = Camera::new(1280.0, 720.0);
    let mut state = SimState::with_config(settings.variant, seed, settings.sim_config());

    let ms_per_frame = 1000.0 / NOMINAL_FPS as f64;
    let mut next_spawn_ms = settings.spawn_interval_ms as f64;
    let (mut spawned, mut removed, mut beams) = (0u32, 0u32, 0u32);

    for frame in 0..(seconds * NOMINAL_FPS) as u64 {
        let now_ms = frame as f64 * ms_per_frame;
        while now_ms >= next_spawn_ms {
            spawn_dorayaki(&mut state, &camera);
            next_spawn_ms += settings.spawn_interval_ms.max(1) as f64;
        }

        tick(&mut state, &camera);

        for event in state.drain_events() {
            match event {
                SimEvent::DorayakiSpawned(_) => spawned += 1,
                SimEvent::DorayakiRemoved(_) => removed += 1,
                SimEvent::BeamFired { .. } => beams += 1,
                SimEvent::BeamRemoved(_) => {}
            }
        }

        if (frame + 1) % NOMINAL_FPS as u64 == 0 {
            log::info!(
                "t={}s live={} beams={} (spawned {}, removed {}, fired {})",
                (frame + 1) / NOMINAL_FPS as u64,
                state.dorayakis.len(),
                state.beams.len(),
                spawned,
                removed,
                beams
            );
        }
    }

    println!(
        "{} variant: {} spawned, {} removed, {} beams fired, {} live after {}s",
        settings.variant.as_str(),
        spawned,
        removed,
        beams,
        state.dorayakis.len(),
        seconds
    );
}
