// Beam geometry generators. Every style turns a tail point, a tip point and the beam's
// parameters into a list of strokes. Nothing is kept between frames, the jittery styles
// draw fresh randomness from the caller's source on every call.

use crate::color::Color;
use crate::config::BeamStyle;
use rand::Rng;
use std::f64::consts::PI;
use vecmath::{vec2_add, vec2_len, vec2_scale, vec2_sub, Vector2};

pub const DASH_PATTERN: [f64; 2] = [16.0, 8.0];

const CRACKLE_SPACING: f64 = 8.0;
const CRACKLE_FACTOR: f64 = 1.5;
const TAZER_SPACING: f64 = 12.0;
const TAZER_FACTOR: f64 = 4.0;
const TAZER_BIAS: f64 = 0.3;
const PULSE_SPEED: f64 = 3.0;
const PULSE_AMOUNT: f64 = 0.6;
const CHARGED_COUNT: usize = 4;
const CHARGED_SPREAD: f64 = 0.8;
const CHARGED_WIDTH: f64 = 0.3;
const DISRUPTOR_FRAGMENTS: usize = 3;
const DISRUPTOR_SEPARATION: f64 = 2.0;
const DISRUPTOR_SEGMENTS: usize = 8;
const DISRUPTOR_MERGE_CHANCE: f64 = 0.3;
const DISRUPTOR_PULL: f64 = 0.7;

// One stroked polyline of a beam.
#[derive(Clone, Debug, PartialEq)]
pub struct BeamStroke {
    pub points: Vec<Vector2<f64>>,
    pub width: f64,
    // Multiplier applied to the beam's opacity.
    pub alpha: f64,
    // Replaces the beam color when set.
    pub color: Option<Color>,
    pub dash: Option<[f64; 2]>,
}

impl BeamStroke {
    fn line(points: Vec<Vector2<f64>>, width: f64) -> Self {
        BeamStroke {
            points,
            width,
            alpha: 1.0,
            color: None,
            dash: None,
        }
    }
}

// What a generator needs to know about the beam besides its endpoints.
#[derive(Copy, Clone, Debug)]
pub struct StrokeParams {
    pub beam_width: f64,
    // Milliseconds spent in the beam's current phase.
    pub timer: f64,
}

pub fn trace<R: Rng + ?Sized>(
    style: BeamStyle,
    tail: Vector2<f64>,
    tip: Vector2<f64>,
    params: StrokeParams,
    rng: &mut R,
) -> Vec<BeamStroke> {
    match style {
        BeamStyle::Solid => solid(tail, tip, params),
        BeamStyle::Dashed => dashed(tail, tip, params),
        BeamStyle::Crackling => crackling(tail, tip, params, rng),
        BeamStyle::Tazer => tazer(tail, tip, params, rng),
        BeamStyle::Pulsing => pulsing(tail, tip, params),
        BeamStyle::Charged => charged(tail, tip, params),
        BeamStyle::Plasma => plasma(tail, tip, params),
        BeamStyle::Disruptor => disruptor(tail, tip, params, rng),
    }
}

fn lerp(from: Vector2<f64>, to: Vector2<f64>, t: f64) -> Vector2<f64> {
    vec2_add(from, vec2_scale(vec2_sub(to, from), t))
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * amount
}

pub fn solid(tail: Vector2<f64>, tip: Vector2<f64>, params: StrokeParams) -> Vec<BeamStroke> {
    vec![BeamStroke::line(vec![tail, tip], params.beam_width)]
}

pub fn dashed(tail: Vector2<f64>, tip: Vector2<f64>, params: StrokeParams) -> Vec<BeamStroke> {
    let mut stroke = BeamStroke::line(vec![tail, tip], params.beam_width);
    stroke.dash = Some(DASH_PATTERN);
    vec![stroke]
}

// Subdivided path with every interior vertex shaken on both axes.
// The final subdivision vertex is jittered too, the exact tip is appended after it.
pub fn crackling<R: Rng + ?Sized>(
    tail: Vector2<f64>,
    tip: Vector2<f64>,
    params: StrokeParams,
    rng: &mut R,
) -> Vec<BeamStroke> {
    let segments = (vec2_len(vec2_sub(tip, tail)) / CRACKLE_SPACING).floor() as usize;
    let amount = params.beam_width * CRACKLE_FACTOR;

    let mut points = Vec::with_capacity(segments + 2);
    points.push(tail);
    for i in 1..=segments {
        let base = lerp(tail, tip, i as f64 / segments as f64);
        let offset_x = jitter(rng, amount);
        let offset_y = jitter(rng, amount);
        points.push([base[0] + offset_x, base[1] + offset_y]);
    }
    points.push(tip);

    vec![BeamStroke::line(points, params.beam_width)]
}

pub fn tazer<R: Rng + ?Sized>(
    tail: Vector2<f64>,
    tip: Vector2<f64>,
    params: StrokeParams,
    rng: &mut R,
) -> Vec<BeamStroke> {
    let segments = (vec2_len(vec2_sub(tip, tail)) / TAZER_SPACING).floor() as usize;
    let amount = params.beam_width * TAZER_FACTOR;

    let mut points = Vec::with_capacity(segments + 2);
    points.push(tail);
    for i in 1..=segments {
        let base = lerp(tail, tip, i as f64 / segments as f64);
        let zigzag = if i % 2 == 0 { 1.0 } else { -1.0 };
        let bias = zigzag * amount * TAZER_BIAS;
        let offset_x = jitter(rng, amount) + bias;
        let offset_y = jitter(rng, amount) + bias;
        points.push([base[0] + offset_x, base[1] + offset_y]);
    }
    points.push(tip);

    vec![BeamStroke::line(points, params.beam_width)]
}

pub fn pulse_width(beam_width: f64, timer: f64) -> f64 {
    let pulse = (timer * PULSE_SPEED * 0.01).sin() * PULSE_AMOUNT + 1.0;
    beam_width * pulse
}

pub fn pulsing(tail: Vector2<f64>, tip: Vector2<f64>, params: StrokeParams) -> Vec<BeamStroke> {
    let width = pulse_width(params.beam_width, params.timer);
    vec![BeamStroke::line(vec![tail, tip], width)]
}

pub fn charged(tail: Vector2<f64>, tip: Vector2<f64>, params: StrokeParams) -> Vec<BeamStroke> {
    let spread = params.beam_width * CHARGED_SPREAD;
    let width = params.beam_width * CHARGED_WIDTH;

    (0..CHARGED_COUNT)
        .map(|i| {
            let angle = (i as f64 / CHARGED_COUNT as f64) * PI * 2.0;
            let offset = [angle.cos() * spread, angle.sin() * spread];
            BeamStroke::line(vec![vec2_add(tail, offset), vec2_add(tip, offset)], width)
        })
        .collect()
}

// Wide faint halo, medium body, then a thin white-hot core
pub fn plasma(tail: Vector2<f64>, tip: Vector2<f64>, params: StrokeParams) -> Vec<BeamStroke> {
    let layers = [(3.0, 0.3, None), (1.8, 0.6, None), (0.8, 1.0, Some(Color::WHITE))];

    layers
        .iter()
        .map(|(width, alpha, color)| BeamStroke {
            points: vec![tail, tip],
            width: params.beam_width * width,
            alpha: *alpha,
            color: color.clone(),
            dash: None,
        })
        .collect()
}

// Three offset fragments that randomly snap back toward the centerline
pub fn disruptor<R: Rng + ?Sized>(
    tail: Vector2<f64>,
    tip: Vector2<f64>,
    params: StrokeParams,
    rng: &mut R,
) -> Vec<BeamStroke> {
    let axis = vec2_sub(tip, tail);
    let length = vec2_len(axis);
    let perp = if length > 0.0 {
        [-axis[1] / length, axis[0] / length]
    } else {
        [0.0, 0.0]
    };
    let separation = params.beam_width * DISRUPTOR_SEPARATION;
    let width = params.beam_width / DISRUPTOR_FRAGMENTS as f64;

    (0..DISRUPTOR_FRAGMENTS)
        .map(|i| {
            let offset = (i as f64 - (DISRUPTOR_FRAGMENTS - 1) as f64 / 2.0) * separation;
            let shift = vec2_scale(perp, offset);
            let start = vec2_add(tail, shift);
            let end = vec2_add(tip, shift);

            let mut points = Vec::with_capacity(DISRUPTOR_SEGMENTS + 1);
            points.push(start);
            for j in 1..=DISRUPTOR_SEGMENTS {
                let t = j as f64 / DISRUPTOR_SEGMENTS as f64;
                let mut target = lerp(start, end, t);
                if rng.gen::<f64>() < DISRUPTOR_MERGE_CHANCE {
                    let center = lerp(tail, tip, t);
                    target = lerp(target, center, DISRUPTOR_PULL);
                }
                points.push(target);
            }
            BeamStroke::line(points, width)
        })
        .collect()
}
