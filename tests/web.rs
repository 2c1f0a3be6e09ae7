// Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use js_sys::{Array, Object, Reflect};
use rust_wasm_laserbeams::{BeamOptions, BeamStyle, Color, LaserCanvas, TipStyle};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn set(target: &Object, key: &str, value: &JsValue) {
    Reflect::set(target, &JsValue::from_str(key), value).unwrap();
}

fn canvas() -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(320);
    canvas.set_height(200);
    canvas
}

#[wasm_bindgen_test]
fn reads_camel_case_options() {
    let options = Object::new();
    set(&options, "beamStyle", &"disruptor".into());
    set(&options, "tipStyle", &"circle".into());
    set(&options, "shootDuration", &JsValue::from_f64(250.0));
    set(&options, "glowColor", &"#ff0000".into());
    set(&options, "beamWidth", &JsValue::NULL);
    let coords = Array::of2(&JsValue::from_f64(5.0), &JsValue::from_f64(6.0));
    set(&options, "coords1", &coords);

    let particles = Object::new();
    set(&particles, "rate", &JsValue::from_f64(0.4));
    set(&particles, "fade", &JsValue::from_bool(false));
    set(&options, "particleConfig", &particles);

    let parsed = BeamOptions::from_js(&options);
    assert_eq!(parsed.beam_style, Some(BeamStyle::Disruptor));
    assert_eq!(parsed.tip_style, Some(TipStyle::Circle));
    assert_eq!(parsed.shoot_duration, Some(250.0));
    assert_eq!(parsed.glow_color, Some(Color::from_u32(0xff0000ff)));
    assert_eq!(parsed.beam_width, None);
    assert_eq!(parsed.coords1, Some([5.0, 6.0]));
    assert_eq!(parsed.coords2, None);
    assert_eq!(parsed.particles.rate, Some(0.4));
    assert_eq!(parsed.particles.fade, Some(false));
}

#[wasm_bindgen_test]
fn unknown_names_fall_back() {
    let options = Object::new();
    set(&options, "beamStyle", &"sparkly".into());
    set(&options, "beamColor", &"#zzz".into());
    let parsed = BeamOptions::from_js(&options);
    assert_eq!(parsed.beam_style, Some(BeamStyle::Solid));
    assert_eq!(parsed.beam_color, None);
}

#[wasm_bindgen_test]
fn css_colors_pass_through() {
    let options = Object::new();
    set(&options, "beamColor", &"rgb(255, 0, 0)".into());
    set(&options, "tipColor", &"gold".into());
    let parsed = BeamOptions::from_js(&options);
    assert_eq!(parsed.beam_color, Some(Color::Css("rgb(255, 0, 0)".to_owned())));
    assert_eq!(parsed.tip_color, Some(Color::Css("gold".to_owned())));
}

fn timed_lasers() -> LaserCanvas {
    let options = Object::new();
    set(&options, "shootDuration", &JsValue::from_f64(100.0));
    set(&options, "fadeDuration", &JsValue::from_f64(100.0));
    LaserCanvas::new(&canvas(), &options).unwrap()
}

#[wasm_bindgen_test]
fn fire_without_direction_shoots_forward() {
    let mut lasers = timed_lasers();
    lasers.fire(None);
    lasers.add_laser(None, &JsValue::UNDEFINED);
    // 112ms: a static beam would have faded out, a shooting one has only just started fading
    for _ in 0..7 {
        lasers.update(16.0);
        lasers.render().unwrap();
    }
    assert_eq!(lasers.active_laser_count(), 2);
}

#[wasm_bindgen_test]
fn missing_options_are_empty() {
    assert_eq!(BeamOptions::from_js(&JsValue::UNDEFINED), BeamOptions::default());
    assert_eq!(BeamOptions::from_js(&JsValue::NULL), BeamOptions::default());
}

#[wasm_bindgen_test]
fn canvas_lasers_run_to_completion() {
    let mut lasers = timed_lasers();

    let styles = [
        "solid", "dashed", "crackling", "tazer", "pulsing", "charged", "plasma", "disruptor",
    ];
    for (i, style) in styles.iter().enumerate() {
        let laser = Object::new();
        set(&laser, "beamStyle", &(*style).into());
        let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
        lasers.add_laser(Some(direction), &laser);
    }
    assert_eq!(lasers.active_laser_count(), 8);

    for _ in 0..20 {
        lasers.update(16.0);
        lasers.render().unwrap();
    }
    lasers.update(0.0);
    assert_eq!(lasers.active_laser_count(), 0);

    let id = lasers.fire(Some(0.0));
    assert!(lasers.remove_laser(id));
    assert!(!lasers.remove_laser(id));

    lasers.fire(Some(1.0));
    lasers.destroy();
    assert_eq!(lasers.active_laser_count(), 0);
    lasers.render().unwrap();
}
