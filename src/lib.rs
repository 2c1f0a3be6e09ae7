#[macro_use]
mod utils;

pub mod beam;
pub mod color;
pub mod config;
pub mod geometry;
pub mod lasers;
pub mod particle;
pub mod surface;
pub mod tip;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, CanvasRenderingContext2d, HtmlCanvasElement};

pub use beam::{Beam, BeamState, Direction, LaserId, Phase};
pub use color::Color;
pub use config::{BeamConfig, BeamOptions, BeamStyle, ParticleConfig, ParticleOptions, TipStyle};
pub use lasers::LaserBeams;
pub use surface::Surface;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// Direction used when JS leaves it out, `fire()` shoots coords1 -> coords2
const DEFAULT_DIRECTION: f64 = 1.0;

fn direction_or_default(direction: Option<f64>) -> f64 {
    direction.unwrap_or(DEFAULT_DIRECTION)
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }

    // Per-frame console timing, only built with the `timing` feature
    pub fn start(name: &'a str) -> Option<Timer<'a>> {
        if cfg!(feature = "timing") {
            Some(Timer::new(name))
        } else {
            None
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Browser entry point, binds the beam manager to a canvas' 2d context
#[wasm_bindgen]
pub struct LaserCanvas {
    beams: LaserBeams<CanvasRenderingContext2d, StdRng>,
}

#[wasm_bindgen]
impl LaserCanvas {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: &HtmlCanvasElement, options: &JsValue) -> Result<LaserCanvas, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let rng = StdRng::from_entropy();
        Ok(LaserCanvas {
            beams: LaserBeams::new(context, rng, &BeamOptions::from_js(options)),
        })
    }

    pub fn fire(&mut self, direction: Option<f64>) -> u32 {
        self.beams.fire(direction_or_default(direction)).0
    }

    #[wasm_bindgen(js_name = addLaser)]
    pub fn add_laser(&mut self, direction: Option<f64>, options: &JsValue) -> u32 {
        self.beams
            .add_laser(direction_or_default(direction), &BeamOptions::from_js(options))
            .0
    }

    #[wasm_bindgen(js_name = removeLaser)]
    pub fn remove_laser(&mut self, id: u32) -> bool {
        self.beams.remove_laser(LaserId(id))
    }

    #[wasm_bindgen(js_name = clearAllLasers)]
    pub fn clear_all_lasers(&mut self) {
        self.beams.clear_all_lasers();
    }

    #[wasm_bindgen(js_name = getActiveLaserCount)]
    pub fn active_laser_count(&self) -> u32 {
        self.beams.active_laser_count() as u32
    }

    pub fn update(&mut self, dt: f64) {
        let _timer = Timer::start("LaserCanvas::update");
        self.beams.update(dt);
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        let _timer = Timer::start("LaserCanvas::render");
        self.beams.render()
    }

    pub fn destroy(&mut self) {
        self.beams.destroy();
    }
}
