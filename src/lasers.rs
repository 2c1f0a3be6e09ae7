// Owns every live beam and drives them frame by frame. The host calls update and then
// render once per animation frame. Beams and their particles live in a plain Vec in
// insertion order, dropping the manager releases them all.

use crate::beam::{Beam, Direction, LaserId};
use crate::config::{BeamConfig, BeamOptions};
use crate::surface::Surface;
use rand::Rng;
use wasm_bindgen::JsValue;

pub struct LaserBeams<S: Surface, R: Rng> {
    surface: Option<S>,
    rng: R,
    defaults: BeamConfig,
    lasers: Vec<Beam>,
    next_id: u32,
}

impl<S: Surface, R: Rng> LaserBeams<S, R> {
    // `options` are merged over the built-in defaults and become the base for every beam.
    pub fn new(surface: S, rng: R, options: &BeamOptions) -> Self {
        let defaults = BeamConfig::for_surface(surface.width(), surface.height()).merged(options);
        LaserBeams {
            surface: Some(surface),
            rng,
            defaults,
            lasers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn defaults(&self) -> &BeamConfig {
        &self.defaults
    }

    // Fires a beam with the manager's defaults.
    pub fn fire(&mut self, direction: f64) -> LaserId {
        self.add_laser(direction, &BeamOptions::default())
    }

    pub fn add_laser(&mut self, direction: f64, options: &BeamOptions) -> LaserId {
        let id = LaserId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let config = self.defaults.merged(options);
        self.lasers
            .push(Beam::new(id, Direction::from_sign(direction), config));
        id
    }

    pub fn remove_laser(&mut self, id: LaserId) -> bool {
        match self.lasers.iter().position(|laser| laser.id() == id) {
            Some(index) => {
                self.lasers.remove(index);
                true
            }
            None => {
                log!("no laser with id {} to remove", id.0);
                false
            }
        }
    }

    pub fn clear_all_lasers(&mut self) {
        self.lasers.clear();
    }

    pub fn active_laser_count(&self) -> usize {
        self.lasers.iter().filter(|laser| laser.is_active()).count()
    }

    pub fn laser(&self, id: LaserId) -> Option<&Beam> {
        self.lasers.iter().find(|laser| laser.id() == id)
    }

    pub fn lasers(&self) -> &[Beam] {
        &self.lasers
    }

    pub fn len(&self) -> usize {
        self.lasers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lasers.is_empty()
    }

    // Drops beams that went idle on an earlier frame, then advances the rest, newest first
    pub fn update(&mut self, dt: f64) {
        for i in (0..self.lasers.len()).rev() {
            if !self.lasers[i].is_active() {
                self.lasers.remove(i);
                continue;
            }
            self.lasers[i].update(dt);
        }
    }

    pub fn render(&mut self) -> Result<(), JsValue> {
        let surface = match &self.surface {
            Some(surface) => surface,
            None => return Ok(()),
        };
        for laser in self.lasers.iter_mut().filter(|laser| laser.is_active()) {
            laser.render(surface, &mut self.rng)?;
        }
        Ok(())
    }

    // Drops every beam with its particles and lets go of the surface.
    // Later renders draw nothing.
    pub fn destroy(&mut self) {
        log!("destroying {} lasers", self.lasers.len());
        self.lasers = Vec::new();
        self.surface = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::Phase;
    use crate::surface::recording::{Op, RecordingSurface};
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn manager(shoot: f64, fade: f64) -> LaserBeams<RecordingSurface, StdRng> {
        let options = BeamOptions {
            shoot_duration: Some(shoot),
            fade_duration: Some(fade),
            ..Default::default()
        };
        LaserBeams::new(
            RecordingSurface::new(400.0, 300.0),
            StdRng::seed_from_u64(11),
            &options,
        )
    }

    #[test]
    fn lifecycle_scenario() {
        let mut beams = manager(100.0, 100.0);
        let id = beams.add_laser(1.0, &BeamOptions::default());

        beams.update(50.0);
        let laser = beams.laser(id).unwrap();
        assert_eq!(laser.phase(), Phase::Shoot);
        assert_eq!(laser.progress(), 0.5);

        beams.update(50.0);
        let laser = beams.laser(id).unwrap();
        assert_eq!(laser.phase(), Phase::Fade);
        assert_eq!(laser.progress(), 1.0);
        assert_eq!(laser.opacity(), 1.0);

        beams.update(50.0);
        assert_eq!(beams.laser(id).unwrap().opacity(), 0.5);

        beams.update(50.0);
        assert!(!beams.laser(id).unwrap().is_active());
        assert_eq!(beams.active_laser_count(), 0);
        assert_eq!(beams.len(), 1);

        beams.update(0.0);
        assert!(beams.is_empty());
    }

    #[test]
    fn shoot_completes_after_cumulative_duration() {
        let mut beams = manager(100.0, 100.0);
        let id = beams.add_laser(-2.0, &BeamOptions::default());
        for _ in 0..7 {
            beams.update(16.0);
        }
        let laser = beams.laser(id).unwrap();
        assert_eq!(laser.phase(), Phase::Fade);
        assert_eq!(laser.progress(), 1.0);
    }

    #[test]
    fn static_laser_skips_shoot() {
        let mut beams = manager(100.0, 100.0);
        let id = beams.add_laser(0.0, &BeamOptions::default());
        let laser = beams.laser(id).unwrap();
        assert_eq!(laser.phase(), Phase::Fade);
        assert_eq!(laser.progress(), 1.0);
        assert_eq!(laser.opacity(), 1.0);
    }

    #[test]
    fn add_laser_overlays_defaults() {
        let mut beams = manager(100.0, 100.0);
        let id = beams.add_laser(
            1.0,
            &BeamOptions {
                beam_width: Some(9.0),
                coords1: Some([10.0, 10.0]),
                ..Default::default()
            },
        );
        let config = beams.laser(id).unwrap().config();
        assert_eq!(config.beam_width, 9.0);
        assert_eq!(config.coords1, [10.0, 10.0]);
        assert_eq!(config.coords2, [400.0, 150.0]);
        assert_eq!(config.shoot_duration, 100.0);
        // Defaults are untouched by per-laser overlays
        assert_eq!(beams.defaults().beam_width, 4.0);
    }

    #[test]
    fn ids_are_unique() {
        let mut beams = manager(100.0, 100.0);
        let a = beams.fire(1.0);
        let b = beams.fire(1.0);
        let c = beams.fire(-1.0);
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn remove_laser_reports_whether_it_found_one() {
        let mut beams = manager(100.0, 100.0);
        let id = beams.fire(1.0);
        beams.fire(1.0);

        assert!(!beams.remove_laser(LaserId(9999)));
        assert_eq!(beams.len(), 2);

        assert!(beams.remove_laser(id));
        assert_eq!(beams.len(), 1);
        assert!(beams.laser(id).is_none());
        assert!(!beams.remove_laser(id));
    }

    #[test]
    fn clearing_twice_is_harmless() {
        let mut beams = manager(100.0, 100.0);
        beams.fire(1.0);
        beams.fire(0.0);
        beams.clear_all_lasers();
        assert_eq!(beams.active_laser_count(), 0);
        beams.clear_all_lasers();
        assert_eq!(beams.active_laser_count(), 0);
    }

    #[test]
    fn update_never_leaves_expired_particles() {
        let mut beams = manager(500.0, 500.0);
        beams.fire(1.0);
        beams.fire(-1.0);
        for _ in 0..60 {
            beams.update(16.0);
            for laser in beams.lasers() {
                assert!(laser.particles().iter().all(|p| p.age < p.life));
            }
            beams.render().unwrap();
        }
    }

    #[test]
    fn render_skips_inactive_lasers() {
        let mut beams = LaserBeams::new(
            RecordingSurface::new(400.0, 300.0),
            StepRng::new(0, 0),
            &BeamOptions {
                shoot_duration: Some(10.0),
                fade_duration: Some(10.0),
                ..Default::default()
            },
        );
        beams.fire(0.0);
        beams.update(10.0);
        assert_eq!(beams.len(), 1);
        beams.render().unwrap();
        let surface = beams.surface.as_ref().unwrap();
        assert_eq!(surface.count(&Op::Stroke), 0);
    }

    #[test]
    fn render_draws_in_insertion_order() {
        let mut beams = manager(100.0, 100.0);
        beams.add_laser(
            0.0,
            &BeamOptions {
                coords1: Some([1.0, 1.0]),
                ..Default::default()
            },
        );
        beams.add_laser(
            0.0,
            &BeamOptions {
                coords1: Some([2.0, 2.0]),
                ..Default::default()
            },
        );
        beams.render().unwrap();
        let ops = beams.surface.as_ref().unwrap().take();
        let first = ops.iter().position(|op| *op == Op::MoveTo(1.0, 1.0));
        let second = ops.iter().position(|op| *op == Op::MoveTo(2.0, 2.0));
        assert!(first.unwrap() < second.unwrap());
    }

    #[test]
    fn destroy_releases_everything() {
        let mut beams = manager(100.0, 100.0);
        beams.fire(1.0);
        beams.update(16.0);
        beams.render().unwrap();
        beams.destroy();
        assert!(beams.is_empty());
        assert!(beams.surface.is_none());
        beams.update(16.0);
        beams.render().unwrap();
        assert_eq!(beams.active_laser_count(), 0);
    }
}
