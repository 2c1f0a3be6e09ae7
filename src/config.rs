// Beam appearance and timing configuration.
// BeamConfig is the resolved, immutable value each beam carries for its whole life,
// BeamOptions is a partial overlay that gets merged over a BeamConfig.

use crate::color::Color;
use js_sys::{Array, Reflect};
use vecmath::Vector2;
use wasm_bindgen::JsValue;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BeamStyle {
    Solid,
    Dashed,
    Crackling,
    Tazer,
    Pulsing,
    Charged,
    Plasma,
    Disruptor,
}

impl BeamStyle {
    pub fn from_name(name: &str) -> BeamStyle {
        match name {
            "solid" => BeamStyle::Solid,
            "dashed" => BeamStyle::Dashed,
            "crackling" => BeamStyle::Crackling,
            "tazer" => BeamStyle::Tazer,
            "pulsing" => BeamStyle::Pulsing,
            "charged" => BeamStyle::Charged,
            "plasma" => BeamStyle::Plasma,
            "disruptor" => BeamStyle::Disruptor,
            _ => {
                log!("unknown beam style '{}', falling back to solid", name);
                BeamStyle::Solid
            }
        }
    }
}

impl Default for BeamStyle {
    fn default() -> Self {
        BeamStyle::Solid
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TipStyle {
    Arrow,
    Circle,
}

impl TipStyle {
    pub fn from_name(name: &str) -> TipStyle {
        match name {
            "arrow" => TipStyle::Arrow,
            "circle" => TipStyle::Circle,
            _ => {
                log!("unknown tip style '{}', falling back to arrow", name);
                TipStyle::Arrow
            }
        }
    }
}

impl Default for TipStyle {
    fn default() -> Self {
        TipStyle::Arrow
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    pub color: Color,
    pub glow_color: Color,
    pub size: f64,
    pub speed: f64,
    pub life: f64,
    pub fade: bool,
    pub rate: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig {
            color: Color::WHITE,
            glow_color: Color::CYAN,
            size: 6.0,
            speed: 3.0,
            life: 600.0,
            fade: true,
            rate: 0.8,
        }
    }
}

impl ParticleConfig {
    pub fn merged(&self, options: &ParticleOptions) -> ParticleConfig {
        ParticleConfig {
            color: options.color.clone().unwrap_or_else(|| self.color.clone()),
            glow_color: options
                .glow_color
                .clone()
                .unwrap_or_else(|| self.glow_color.clone()),
            size: options.size.unwrap_or(self.size),
            speed: options.speed.unwrap_or(self.speed),
            life: options.life.unwrap_or(self.life),
            fade: options.fade.unwrap_or(self.fade),
            rate: options.rate.unwrap_or(self.rate),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BeamConfig {
    pub beam_style: BeamStyle,
    pub coords1: Vector2<f64>,
    pub coords2: Vector2<f64>,
    pub shoot_duration: f64,
    pub fade_duration: f64,
    pub beam_color: Color,
    pub glow_color: Color,
    pub tip_color: Color,
    pub glow_size: f64,
    pub beam_width: f64,
    pub tip_size: f64,
    pub tip_style: TipStyle,
    pub particles: ParticleConfig,
}

impl BeamConfig {
    // Built-in defaults, the beam spans the horizontal midline of the surface
    pub fn for_surface(width: f64, height: f64) -> BeamConfig {
        BeamConfig {
            beam_style: BeamStyle::Solid,
            coords1: [0.0, height / 2.0],
            coords2: [width, height / 2.0],
            shoot_duration: 800.0,
            fade_duration: 800.0,
            beam_color: Color::CYAN,
            glow_color: Color::CYAN,
            tip_color: Color::CYAN,
            glow_size: 24.0,
            beam_width: 4.0,
            tip_size: 24.0,
            tip_style: TipStyle::Arrow,
            particles: ParticleConfig::default(),
        }
    }

    pub fn merged(&self, options: &BeamOptions) -> BeamConfig {
        BeamConfig {
            beam_style: options.beam_style.unwrap_or(self.beam_style),
            coords1: options.coords1.unwrap_or(self.coords1),
            coords2: options.coords2.unwrap_or(self.coords2),
            shoot_duration: options.shoot_duration.unwrap_or(self.shoot_duration),
            fade_duration: options.fade_duration.unwrap_or(self.fade_duration),
            beam_color: options
                .beam_color
                .clone()
                .unwrap_or_else(|| self.beam_color.clone()),
            glow_color: options
                .glow_color
                .clone()
                .unwrap_or_else(|| self.glow_color.clone()),
            tip_color: options
                .tip_color
                .as_ref()
                .or_else(|| options.glow_color.as_ref())
                .unwrap_or(&self.tip_color)
                .clone(),
            glow_size: options.glow_size.unwrap_or(self.glow_size),
            beam_width: options.beam_width.unwrap_or(self.beam_width),
            tip_size: options.tip_size.unwrap_or(self.tip_size),
            tip_style: options.tip_style.unwrap_or(self.tip_style),
            particles: self.particles.merged(&options.particles),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleOptions {
    pub color: Option<Color>,
    pub glow_color: Option<Color>,
    pub size: Option<f64>,
    pub speed: Option<f64>,
    pub life: Option<f64>,
    pub fade: Option<bool>,
    pub rate: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeamOptions {
    pub beam_style: Option<BeamStyle>,
    pub coords1: Option<Vector2<f64>>,
    pub coords2: Option<Vector2<f64>>,
    pub shoot_duration: Option<f64>,
    pub fade_duration: Option<f64>,
    pub beam_color: Option<Color>,
    pub glow_color: Option<Color>,
    pub tip_color: Option<Color>,
    pub glow_size: Option<f64>,
    pub beam_width: Option<f64>,
    pub tip_size: Option<f64>,
    pub tip_style: Option<TipStyle>,
    pub particles: ParticleOptions,
}

impl BeamOptions {
    // Reads the camelCase option object passed in from JavaScript.
    // Missing, null and undefined keys are left unset.
    pub fn from_js(value: &JsValue) -> BeamOptions {
        if value.is_undefined() || value.is_null() {
            return BeamOptions::default();
        }
        let particles = js_field(value, "particleConfig")
            .map(|config| ParticleOptions {
                color: js_color(&config, "color"),
                glow_color: js_color(&config, "glowColor"),
                size: js_number(&config, "size"),
                speed: js_number(&config, "speed"),
                life: js_number(&config, "life"),
                fade: js_field(&config, "fade").and_then(|v| v.as_bool()),
                rate: js_number(&config, "rate"),
            })
            .unwrap_or_default();

        BeamOptions {
            beam_style: js_string(value, "beamStyle").map(|name| BeamStyle::from_name(&name)),
            coords1: js_point(value, "coords1"),
            coords2: js_point(value, "coords2"),
            shoot_duration: js_number(value, "shootDuration"),
            fade_duration: js_number(value, "fadeDuration"),
            beam_color: js_color(value, "beamColor"),
            glow_color: js_color(value, "glowColor"),
            tip_color: js_color(value, "tipColor"),
            glow_size: js_number(value, "glowSize"),
            beam_width: js_number(value, "beamWidth"),
            tip_size: js_number(value, "tipSize"),
            tip_style: js_string(value, "tipStyle").map(|name| TipStyle::from_name(&name)),
            particles,
        }
    }
}

fn js_field(object: &JsValue, key: &str) -> Option<JsValue> {
    let value = Reflect::get(object, &JsValue::from_str(key)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

fn js_number(object: &JsValue, key: &str) -> Option<f64> {
    js_field(object, key).and_then(|v| v.as_f64())
}

fn js_string(object: &JsValue, key: &str) -> Option<String> {
    js_field(object, key).and_then(|v| v.as_string())
}

fn js_color(object: &JsValue, key: &str) -> Option<Color> {
    let text = js_string(object, key)?;
    let color = Color::parse(&text);
    if color.is_none() {
        log!("malformed color '{}' for {}, keeping default", text, key);
    }
    color
}

fn js_point(object: &JsValue, key: &str) -> Option<Vector2<f64>> {
    let value = js_field(object, key)?;
    if !Array::is_array(&value) {
        return None;
    }
    let array = Array::from(&value);
    Some([array.get(0).as_f64()?, array.get(1).as_f64()?])
}
