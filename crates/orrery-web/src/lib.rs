use std::cell::RefCell;

use orrery::{BodyId, InputEvent, OrreryConfig};
use wasm_bindgen::prelude::*;

pub mod runner;

pub use runner::OrreryRunner;

thread_local! {
    static RUNNER: RefCell<Option<OrreryRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut OrreryRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Orrery not initialized. Call orrery_init() first.");
        f(runner)
    })
}

/// Build the Sol session. `config_json` may override any `OrreryConfig`
/// field; a bad config is logged and the defaults are used instead.
#[wasm_bindgen]
pub fn orrery_init(config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = match config_json.as_deref().map(OrreryConfig::from_json) {
        None => OrreryConfig::default(),
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            log::error!("orrery: bad config, using defaults: {e}");
            OrreryConfig::default()
        }
    };

    let runner = match OrreryRunner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("orrery: catalog rejected: {e}");
            panic!("orrery: catalog rejected: {e}");
        }
    };
    log::info!("orrery: initialized with {} bodies", runner.session().catalog().len());

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
}

#[wasm_bindgen]
pub fn orrery_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Input ----

#[wasm_bindgen]
pub fn orrery_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn orrery_wheel(ticks: f32) {
    with_runner(|r| r.push_input(InputEvent::Wheel { ticks }));
}

#[wasm_bindgen]
pub fn orrery_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

#[wasm_bindgen]
pub fn orrery_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr())
}

#[wasm_bindgen]
pub fn get_bodies_ptr() -> *const f32 {
    with_runner(|r| r.bodies_ptr())
}

#[wasm_bindgen]
pub fn get_body_count() -> u32 {
    with_runner(|r| r.body_count())
}

#[wasm_bindgen]
pub fn get_ribbon_vertices_ptr() -> *const f32 {
    with_runner(|r| r.ribbon_vertices_ptr())
}

#[wasm_bindgen]
pub fn get_ribbon_vertex_count() -> u32 {
    with_runner(|r| r.ribbon_vertex_count())
}

#[wasm_bindgen]
pub fn get_ribbon_indices_ptr() -> *const u32 {
    with_runner(|r| r.ribbon_indices_ptr())
}

#[wasm_bindgen]
pub fn get_ribbon_index_count() -> u32 {
    with_runner(|r| r.ribbon_index_count())
}

#[wasm_bindgen]
pub fn get_ribbon_spans_ptr() -> *const f32 {
    with_runner(|r| r.ribbon_spans_ptr())
}

#[wasm_bindgen]
pub fn get_ribbon_span_count() -> u32 {
    with_runner(|r| r.ribbon_span_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

/// Body names indexed by body id, the same order as the instance buffer.
#[wasm_bindgen]
pub fn get_body_names() -> js_sys::Array {
    with_runner(|r| r.body_names().map(JsValue::from_str).collect())
}

#[wasm_bindgen]
pub fn get_body_name(index: u32) -> Option<String> {
    with_runner(|r| r.session().catalog().get_name(BodyId(index)).map(str::to_owned))
}

#[wasm_bindgen]
pub fn get_focus() -> u32 {
    with_runner(|r| r.session().observer().focus.0)
}

#[wasm_bindgen]
pub fn get_sim_seconds() -> f64 {
    with_runner(|r| r.session().time())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_bodies() -> u32 {
    with_runner(|r| r.max_bodies())
}

#[wasm_bindgen]
pub fn get_max_ribbon_vertices() -> u32 {
    with_runner(|r| r.max_ribbon_vertices())
}

#[wasm_bindgen]
pub fn get_max_ribbon_indices() -> u32 {
    with_runner(|r| r.max_ribbon_indices())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}
