// Marker drawn at the leading end of a shooting beam

use crate::config::{BeamConfig, TipStyle};
use crate::surface::Surface;
use std::f64::consts::PI;
use vecmath::{vec2_sub, Vector2};
use wasm_bindgen::JsValue;

// `axis` is the full tail -> head vector, the arrow points along it
pub fn draw_tip<S: Surface + ?Sized>(
    surface: &S,
    tip: Vector2<f64>,
    axis: Vector2<f64>,
    config: &BeamConfig,
    opacity: f64,
) -> Result<(), JsValue> {
    let color = config.tip_color.to_css();
    let size = config.tip_size;

    surface.save();
    surface.set_global_alpha(opacity * 0.9);
    surface.set_fill_style(&color);
    surface.set_shadow_color(&color);
    surface.set_shadow_blur(config.glow_size * 1.5);

    match config.tip_style {
        TipStyle::Circle => {
            surface.begin_path();
            surface.arc(tip[0], tip[1], size * 0.6, 0.0, PI * 2.0)?;
            surface.fill();
        }
        TipStyle::Arrow => {
            surface.translate(tip[0], tip[1])?;
            surface.rotate(axis[1].atan2(axis[0]))?;

            surface.begin_path();
            surface.move_to(size, 0.0);
            surface.line_to(-size * 0.4, -size * 0.3);
            surface.line_to(-size * 0.4, size * 0.3);
            surface.close_path();
            surface.fill();
        }
    }

    surface.restore();
    Ok(())
}

pub fn axis(tail: Vector2<f64>, head: Vector2<f64>) -> Vector2<f64> {
    vec2_sub(head, tail)
}
