// The 2D immediate-mode drawing surface beams are rendered onto.
// In the browser this is a CanvasRenderingContext2d, tests swap in a recorder.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub trait Surface {
    fn begin_path(&self);
    fn move_to(&self, x: f64, y: f64);
    fn line_to(&self, x: f64, y: f64);
    fn close_path(&self);
    fn stroke(&self);
    fn fill(&self);
    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue>;

    fn set_line_width(&self, width: f64);
    fn set_line_cap(&self, cap: &str);
    fn set_line_dash(&self, segments: &[f64]) -> Result<(), JsValue>;
    fn set_stroke_style(&self, color: &str);
    fn set_fill_style(&self, color: &str);
    fn set_global_alpha(&self, alpha: f64);
    fn set_shadow_color(&self, color: &str);
    fn set_shadow_blur(&self, blur: f64);

    fn save(&self);
    fn restore(&self);
    fn translate(&self, x: f64, y: f64) -> Result<(), JsValue>;
    fn rotate(&self, angle: f64) -> Result<(), JsValue>;

    fn width(&self) -> f64;
    fn height(&self) -> f64;
}

impl Surface for CanvasRenderingContext2d {
    fn begin_path(&self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&self, x: f64, y: f64) {
        CanvasRenderingContext2d::move_to(self, x, y);
    }

    fn line_to(&self, x: f64, y: f64) {
        CanvasRenderingContext2d::line_to(self, x, y);
    }

    fn close_path(&self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn stroke(&self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill(&self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::arc(self, x, y, radius, start, end)
    }

    fn set_line_width(&self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_line_cap(&self, cap: &str) {
        CanvasRenderingContext2d::set_line_cap(self, cap);
    }

    fn set_line_dash(&self, segments: &[f64]) -> Result<(), JsValue> {
        let array = js_sys::Array::new();
        for segment in segments {
            array.push(&JsValue::from_f64(*segment));
        }
        CanvasRenderingContext2d::set_line_dash(self, &array)
    }

    fn set_stroke_style(&self, color: &str) {
        CanvasRenderingContext2d::set_stroke_style(self, &JsValue::from_str(color));
    }

    fn set_fill_style(&self, color: &str) {
        CanvasRenderingContext2d::set_fill_style(self, &JsValue::from_str(color));
    }

    fn set_global_alpha(&self, alpha: f64) {
        CanvasRenderingContext2d::set_global_alpha(self, alpha);
    }

    fn set_shadow_color(&self, color: &str) {
        CanvasRenderingContext2d::set_shadow_color(self, color);
    }

    fn set_shadow_blur(&self, blur: f64) {
        CanvasRenderingContext2d::set_shadow_blur(self, blur);
    }

    fn save(&self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&self, x: f64, y: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::translate(self, x, y)
    }

    fn rotate(&self, angle: f64) -> Result<(), JsValue> {
        CanvasRenderingContext2d::rotate(self, angle)
    }

    fn width(&self) -> f64 {
        self.canvas().map_or(0.0, |canvas| canvas.width() as f64)
    }

    fn height(&self) -> f64 {
        self.canvas().map_or(0.0, |canvas| canvas.height() as f64)
    }
}
