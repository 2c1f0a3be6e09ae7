// A single animated beam and its shoot / fade / idle lifecycle.

use crate::config::BeamConfig;
use crate::geometry::{self, BeamStroke, StrokeParams};
use crate::particle::{self, Particle};
use crate::surface::Surface;
use crate::tip;
use rand::Rng;
use vecmath::{vec2_add, vec2_scale, vec2_sub, Vector2};
use wasm_bindgen::JsValue;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaserId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Shoot,
    Fade,
    Idle,
}

// Which way the beam travels between its two endpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    // coords1 -> coords2
    Forward,
    // coords2 -> coords1
    Backward,
    // Already fully extended, only fades.
    Static,
}

impl Direction {
    // Only the sign matters, NaN counts as static
    pub fn from_sign(direction: f64) -> Direction {
        if direction > 0.0 {
            Direction::Forward
        } else if direction < 0.0 {
            Direction::Backward
        } else {
            Direction::Static
        }
    }
}

// Mutable per-frame state, kept apart from the beam's immutable config.
#[derive(Clone, Debug, PartialEq)]
pub struct BeamState {
    pub active: bool,
    pub phase: Phase,
    pub progress: f64,
    pub opacity: f64,
    // Milliseconds since the current phase started.
    pub timer: f64,
}

pub struct Beam {
    id: LaserId,
    direction: Direction,
    config: BeamConfig,
    state: BeamState,
    particles: Vec<Particle>,
}

// Fraction of a phase completed, non-positive or NaN durations finish immediately
fn phase_fraction(timer: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        (timer / duration).min(1.0)
    } else {
        1.0
    }
}

impl Beam {
    pub fn new(id: LaserId, direction: Direction, config: BeamConfig) -> Beam {
        let state = match direction {
            Direction::Static => BeamState {
                active: true,
                phase: Phase::Fade,
                progress: 1.0,
                opacity: 1.0,
                timer: 0.0,
            },
            Direction::Forward | Direction::Backward => BeamState {
                active: true,
                phase: Phase::Shoot,
                progress: 0.0,
                opacity: 1.0,
                timer: 0.0,
            },
        };
        Beam {
            id,
            direction,
            config,
            state,
            particles: Vec::new(),
        }
    }

    pub fn id(&self) -> LaserId {
        self.id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn config(&self) -> &BeamConfig {
        &self.config
    }

    pub fn state(&self) -> &BeamState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    pub fn opacity(&self) -> f64 {
        self.state.opacity
    }

    pub fn timer(&self) -> f64 {
        self.state.timer
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    // At most one transition per call, the tick that completes the shoot phase
    // leaves the beam at full opacity with a fresh fade timer
    pub fn update(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        let state = &mut self.state;

        match state.phase {
            Phase::Shoot => {
                state.timer += dt;
                state.progress = phase_fraction(state.timer, self.config.shoot_duration);
                if state.progress >= 1.0 {
                    state.phase = Phase::Fade;
                    state.timer = 0.0;
                }
            }
            Phase::Fade => {
                state.timer += dt;
                state.opacity = 1.0 - phase_fraction(state.timer, self.config.fade_duration);
                if state.opacity <= 0.0 {
                    state.opacity = 0.0;
                    state.active = false;
                    state.phase = Phase::Idle;
                }
            }
            Phase::Idle => {}
        }

        particle::update(&mut self.particles, dt);
    }

    // Tail and head in travel order.
    pub fn endpoints(&self) -> (Vector2<f64>, Vector2<f64>) {
        match self.direction {
            Direction::Backward => (self.config.coords2, self.config.coords1),
            Direction::Forward | Direction::Static => (self.config.coords1, self.config.coords2),
        }
    }

    pub fn tip_position(&self) -> Vector2<f64> {
        let (tail, head) = self.endpoints();
        vec2_add(tail, vec2_scale(vec2_sub(head, tail), self.state.progress))
    }

    pub fn strokes<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<BeamStroke> {
        let (tail, _) = self.endpoints();
        let params = StrokeParams {
            beam_width: self.config.beam_width,
            timer: self.state.timer,
        };
        geometry::trace(self.config.beam_style, tail, self.tip_position(), params, rng)
    }

    // Draws the beam, its tip while shooting, and its particles.
    // Shooting beams also emit new particles from the tip here.
    pub fn render<S, R>(&mut self, surface: &S, rng: &mut R) -> Result<(), JsValue>
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        let (tail, head) = self.endpoints();
        let tip_pos = self.tip_position();
        let opacity = self.state.opacity;
        let config = &self.config;

        surface.save();
        surface.set_global_alpha(opacity);
        surface.set_shadow_color(&config.glow_color.to_css());
        surface.set_shadow_blur(config.glow_size);
        surface.set_line_cap("round");
        surface.set_line_width(config.beam_width);
        surface.set_stroke_style(&config.beam_color.to_css());

        for stroke in self.strokes(rng) {
            draw_stroke(surface, &stroke, opacity)?;
        }
        surface.set_shadow_blur(0.0);

        let shooting = self.state.phase == Phase::Shoot;
        if shooting && self.direction != Direction::Static {
            tip::draw_tip(surface, tip_pos, tip::axis(tail, head), &self.config, opacity)?;
        }
        if shooting {
            particle::emit(
                &mut self.particles,
                tip_pos,
                self.config.beam_width,
                &self.config.particles,
                rng,
            );
        }
        particle::render(surface, &self.particles, opacity)?;

        surface.restore();
        Ok(())
    }
}

fn draw_stroke<S: Surface + ?Sized>(
    surface: &S,
    stroke: &BeamStroke,
    opacity: f64,
) -> Result<(), JsValue> {
    let (first, rest) = match stroke.points.split_first() {
        Some(split) => split,
        None => return Ok(()),
    };

    surface.save();
    surface.set_line_width(stroke.width);
    surface.set_global_alpha(opacity * stroke.alpha);
    if let Some(color) = &stroke.color {
        surface.set_stroke_style(&color.to_css());
    }
    if let Some(dash) = stroke.dash {
        surface.set_line_dash(&dash)?;
    }

    surface.begin_path();
    surface.move_to(first[0], first[1]);
    for point in rest {
        surface.line_to(point[0], point[1]);
    }
    surface.stroke();
    surface.restore();
    Ok(())
}
