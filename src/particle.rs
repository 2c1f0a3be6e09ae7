// Sparks and trail fragments thrown off a beam's tip. Each beam owns its own particles,
// emits them while shooting and keeps integrating them until they expire.

use crate::color::Color;
use crate::config::ParticleConfig;
use crate::surface::Surface;
use rand::Rng;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::JsValue;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub age: f64,
    pub life: f64,
    pub size: f64,
    pub length: f64,
    pub color: Color,
    pub glow_color: Color,
    pub fade: bool,
    pub trail: bool,
}

impl Particle {
    const MIN_ALPHA: f64 = 0.01;
    const CANDIDATES_PER_RATE: f64 = 5.0;

    // Moves by one frame's worth of velocity regardless of dt, dt only ages the particle
    pub fn advance(&mut self, dt: f64) {
        self.pos[0] += self.vel[0];
        self.pos[1] += self.vel[1];
        self.age += dt;
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.life
    }

    pub fn alpha(&self) -> f64 {
        if self.life <= 0.0 {
            0.0
        } else if self.fade {
            1.0 - self.age / self.life
        } else {
            1.0
        }
    }
}

pub fn emit<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    origin: Vector2<f64>,
    beam_width: f64,
    config: &ParticleConfig,
    rng: &mut R,
) {
    // rate is a probability, NaN spawns nothing and anything above 1 caps the candidates
    let rate = if config.rate.is_nan() {
        0.0
    } else {
        config.rate.max(0.0).min(1.0)
    };
    let candidates = (rate * Particle::CANDIDATES_PER_RATE).floor() as usize;
    for _ in 0..candidates {
        if rng.gen::<f64>() >= rate {
            continue;
        }
        let angle = rng.gen::<f64>() * PI * 2.0;
        let speed = config.speed * (1.0 + rng.gen::<f64>() * 2.0);
        let x = origin[0] + (rng.gen::<f64>() - 0.5) * beam_width * 0.5;
        let y = origin[1] + (rng.gen::<f64>() - 0.5) * beam_width * 0.5;

        particles.push(Particle {
            pos: [x, y],
            vel: [angle.cos() * speed, angle.sin() * speed],
            life: config.life * (0.5 + rng.gen::<f64>() * 0.5),
            age: 0.0,
            size: config.size * (0.3 + rng.gen::<f64>() * 0.4),
            length: 8.0 + rng.gen::<f64>() * 12.0,
            color: config.color.clone(),
            glow_color: config.glow_color.clone(),
            fade: config.fade,
            trail: rng.gen::<f64>() > 0.5,
        });
    }
}

pub fn update(particles: &mut Vec<Particle>, dt: f64) {
    for p in particles.iter_mut() {
        p.advance(dt);
    }
    particles.retain(|p| !p.is_expired());
}

pub fn render<S: Surface + ?Sized>(
    surface: &S,
    particles: &[Particle],
    opacity: f64,
) -> Result<(), JsValue> {
    for p in particles {
        let alpha = p.alpha();
        if alpha <= Particle::MIN_ALPHA {
            continue;
        }

        surface.save();
        surface.set_global_alpha(alpha * opacity);
        let glow = p.glow_color.to_css();
        surface.set_shadow_color(&glow);

        if p.trail {
            surface.set_stroke_style(&glow);
            surface.set_shadow_blur(p.size * 3.0);
            surface.set_line_width(p.size * 0.5);
            surface.set_line_cap("round");

            let end_x = p.pos[0] - p.vel[0] * (p.length / 10.0);
            let end_y = p.pos[1] - p.vel[1] * (p.length / 10.0);

            surface.begin_path();
            surface.move_to(p.pos[0], p.pos[1]);
            surface.line_to(end_x, end_y);
            surface.stroke();
        } else {
            surface.set_shadow_blur(p.size * 4.0);
            surface.begin_path();
            surface.arc(p.pos[0], p.pos[1], p.size, 0.0, PI * 2.0)?;
            surface.set_fill_style(&p.color.to_css());
            surface.fill();
        }

        surface.restore();
    }
    Ok(())
}
