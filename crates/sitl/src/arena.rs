//! Lightweight built-in arena simulation.
//!
//! Self-contained 2D world with differential drive kinematics, colored
//! beacons, per-column camera synthesis, and proximity-ring synthesis with
//! optional seeded sensor noise. Implements the core crate's `Camera` and
//! `MotorDrive` capability traits so the mission controller can run
//! against it unchanged.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use chroma_rover_core::motor::{MotorDrive, MotorError, WheelSpeeds};
use chroma_rover_core::traits::{Camera, Rgb};
use chroma_rover_core::vision::TargetColor;

use crate::error::SimulatorError;

/// Proximity sensor bearings in the robot frame (radians, positive =
/// left of the nose). Matches the e-puck ring layout: indices 0/1 are the
/// right-front cluster, 6/7 the left-front cluster.
const SENSOR_BEARINGS_RAD: [f32; 8] = [-0.30, -0.80, -1.57, -2.62, 2.62, 1.57, 0.80, 0.30];

/// Half-angle of the cone within which a sensor responds to a beacon
const SENSOR_CONE_HALF_RAD: f32 = 0.5;

/// Achromatic floor color; the classifier ignores it by construction
const FLOOR_COLOR: Rgb = [120, 120, 120];

/// Configuration for the arena simulation.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    /// Control tick period in milliseconds.
    pub tick_ms: u64,
    /// Distance between wheels in meters.
    pub wheel_base_m: f32,
    /// Wheel radius in meters (commands are rad/s).
    pub wheel_radius_m: f32,
    /// Synthesized camera frame width in pixels.
    pub camera_width: u32,
    /// Synthesized camera frame height in pixels.
    pub camera_height: u32,
    /// Horizontal camera field of view in radians.
    pub camera_fov_rad: f32,
    /// Maximum distance at which beacons are visible, meters.
    pub camera_range_m: f32,
    /// Proximity reading at zero surface distance.
    pub proximity_scale: f32,
    /// Exponential falloff constant for proximity response, meters.
    pub proximity_falloff_m: f32,
    /// Surface distance beyond which a sensor reads zero, meters.
    pub proximity_max_range_m: f32,
    /// Proximity noise standard deviation (reading units). 0 = noiseless.
    pub proximity_noise: f32,
    /// Robot position is clamped to +/- this extent on both axes, meters.
    pub half_extent_m: f32,
    /// RNG seed for deterministic noise. None = random.
    pub seed: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            tick_ms: 64,
            wheel_base_m: 0.053,
            wheel_radius_m: 0.0205,
            camera_width: 64,
            camera_height: 48,
            camera_fov_rad: 0.84,
            camera_range_m: 1.5,
            proximity_scale: 1000.0,
            proximity_falloff_m: 0.02,
            proximity_max_range_m: 0.10,
            proximity_noise: 0.0,
            half_extent_m: 1.0,
            seed: None,
        }
    }
}

/// A colored cylindrical object on the arena floor.
#[derive(Debug, Clone, Copy)]
pub struct Beacon {
    /// Which mission color this beacon presents
    pub color: TargetColor,
    /// Center x position in meters
    pub x: f32,
    /// Center y position in meters
    pub y: f32,
    /// Cylinder radius in meters
    pub radius: f32,
}

impl Beacon {
    /// Create a beacon at (x, y) with the default 4 cm radius
    pub fn new(color: TargetColor, x: f32, y: f32) -> Self {
        Self::sized(color, x, y, 0.04)
    }

    /// Create a beacon with an explicit radius.
    ///
    /// The coarse detector averages the central third of the frame, so a
    /// beacon must subtend a sizable part of the field of view before a
    /// wandering robot can acquire it; demo-scale worlds want radii around
    /// 0.15 m.
    pub fn sized(color: TargetColor, x: f32, y: f32, radius: f32) -> Self {
        Self {
            color,
            x,
            y,
            radius,
        }
    }

    /// Nominal camera color of this beacon
    fn rgb(&self) -> Rgb {
        match self.color {
            TargetColor::Red => [200, 30, 30],
            TargetColor::Green => [30, 200, 30],
            TargetColor::Blue => [30, 30, 200],
        }
    }
}

/// Robot pose and velocity state.
#[derive(Debug, Clone, Copy, Default)]
struct RobotState {
    /// X position in meters (east)
    x: f32,
    /// Y position in meters (north)
    y: f32,
    /// Heading in radians (0 = east, CCW positive)
    heading: f32,
}

/// Built-in arena simulator.
///
/// Call [`step`](Arena::step) once per tick to integrate the commanded
/// wheel speeds and refresh the synthesized sensors, then read the frame
/// through the `Camera` impl and the ring through
/// [`proximity`](Arena::proximity).
pub struct Arena {
    config: ArenaConfig,
    beacons: Vec<Beacon>,
    state: RobotState,
    command: WheelSpeeds,
    /// Per-column frame colors; `None` until the first step renders
    columns: Option<Vec<Rgb>>,
    proximity: [f32; 8],
    rng: StdRng,
    sim_time_us: u64,
}

impl Arena {
    /// Create an arena with the given configuration and beacons.
    pub fn new(config: ArenaConfig, beacons: Vec<Beacon>) -> Result<Self, SimulatorError> {
        if config.tick_ms == 0 {
            return Err(SimulatorError::InvalidConfig("tick_ms must be nonzero"));
        }
        if config.camera_width == 0 || config.camera_height == 0 {
            return Err(SimulatorError::InvalidConfig(
                "camera dimensions must be nonzero",
            ));
        }
        if config.camera_fov_rad <= 0.0 {
            return Err(SimulatorError::InvalidConfig("camera fov must be positive"));
        }
        if config.wheel_base_m <= 0.0 || config.wheel_radius_m <= 0.0 {
            return Err(SimulatorError::InvalidConfig(
                "wheel geometry must be positive",
            ));
        }
        if beacons.iter().any(|b| b.radius <= 0.0) {
            return Err(SimulatorError::InvalidBeacon(
                "beacon radius must be positive",
            ));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            beacons,
            state: RobotState::default(),
            command: WheelSpeeds::stopped(),
            columns: None,
            proximity: [0.0; 8],
            rng,
            sim_time_us: 0,
        })
    }

    /// Create an arena with default configuration.
    pub fn with_defaults(beacons: Vec<Beacon>) -> Result<Self, SimulatorError> {
        Self::new(ArenaConfig::default(), beacons)
    }

    /// Advance the world one tick: integrate kinematics from the current
    /// wheel command, then refresh the camera frame and proximity ring.
    pub fn step(&mut self) {
        let dt = self.config.tick_ms as f32 / 1000.0;
        self.integrate(dt);
        self.synthesize_proximity();
        self.render_frame();
        self.sim_time_us += self.config.tick_ms * 1000;
    }

    /// Integrate differential drive kinematics for one time step.
    fn integrate(&mut self, dt: f32) {
        let r = self.config.wheel_radius_m;
        let velocity = r * (self.command.left + self.command.right) / 2.0;
        let angular = r * (self.command.right - self.command.left) / self.config.wheel_base_m;

        self.state.heading = wrap_pi(self.state.heading + angular * dt);
        self.state.x += velocity * self.state.heading.cos() * dt;
        self.state.y += velocity * self.state.heading.sin() * dt;

        // Keep the robot inside the arena bounds
        let extent = self.config.half_extent_m;
        self.state.x = self.state.x.clamp(-extent, extent);
        self.state.y = self.state.y.clamp(-extent, extent);
    }

    /// Bearing (robot frame) and center distance to a beacon.
    fn beacon_polar(&self, beacon: &Beacon) -> (f32, f32) {
        let dx = beacon.x - self.state.x;
        let dy = beacon.y - self.state.y;
        let bearing = wrap_pi(dy.atan2(dx) - self.state.heading);
        (bearing, (dx * dx + dy * dy).sqrt())
    }

    /// Refresh the proximity ring from beacon surface distances.
    fn synthesize_proximity(&mut self) {
        let polars: Vec<(f32, f32, f32)> = self
            .beacons
            .iter()
            .map(|b| {
                let (bearing, dist) = self.beacon_polar(b);
                (bearing, dist, b.radius)
            })
            .collect();

        for (i, sensor_bearing) in SENSOR_BEARINGS_RAD.iter().enumerate() {
            // Arena walls respond like any other obstacle
            let mut nearest: Option<f32> =
                Some(self.wall_distance(self.state.heading + sensor_bearing));
            for &(bearing, dist, radius) in &polars {
                if wrap_pi(bearing - sensor_bearing).abs() > SENSOR_CONE_HALF_RAD {
                    continue;
                }
                let surface = (dist - radius).max(0.0);
                nearest = Some(match nearest {
                    Some(d) => d.min(surface),
                    None => surface,
                });
            }

            let mut value = match nearest {
                Some(d) if d <= self.config.proximity_max_range_m => {
                    self.config.proximity_scale * (-d / self.config.proximity_falloff_m).exp()
                }
                _ => 0.0,
            };
            value += self.gaussian_noise(self.config.proximity_noise);
            self.proximity[i] = value.max(0.0);
        }
    }

    /// Distance from the robot to the arena boundary along a world-frame
    /// ray angle.
    fn wall_distance(&self, angle: f32) -> f32 {
        let extent = self.config.half_extent_m;
        let (dx, dy) = (angle.cos(), angle.sin());
        let mut distance = f32::MAX;
        if dx.abs() > 1e-6 {
            let wall_x = if dx > 0.0 { extent } else { -extent };
            distance = distance.min(((wall_x - self.state.x) / dx).max(0.0));
        }
        if dy.abs() > 1e-6 {
            let wall_y = if dy > 0.0 { extent } else { -extent };
            distance = distance.min(((wall_y - self.state.y) / dy).max(0.0));
        }
        distance
    }

    /// Render the frame as one color per column: nearest beacon hit along
    /// the column's ray, floor gray elsewhere.
    fn render_frame(&mut self) {
        let width = self.config.camera_width;
        let fov = self.config.camera_fov_rad;
        let mut columns = vec![FLOOR_COLOR; width as usize];

        for (x, column) in columns.iter_mut().enumerate() {
            // Column 0 is the left edge of the frame (positive bearing)
            let ray = fov * (0.5 - (x as f32 + 0.5) / width as f32);
            let mut nearest = f32::MAX;
            for beacon in &self.beacons {
                let (bearing, dist) = self.beacon_polar(beacon);
                if dist > self.config.camera_range_m || dist <= beacon.radius {
                    continue;
                }
                let half_width = (beacon.radius / dist).atan();
                if wrap_pi(bearing - ray).abs() <= half_width && dist < nearest {
                    nearest = dist;
                    *column = beacon.rgb();
                }
            }
        }

        self.columns = Some(columns);
    }

    /// Generate Gaussian noise using the Box-Muller transform.
    fn gaussian_noise(&mut self, stddev: f32) -> f32 {
        if stddev == 0.0 {
            return 0.0;
        }
        let u1: f32 = self.rng.gen::<f32>().max(f32::EPSILON);
        let u2: f32 = self.rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
        z * stddev
    }

    /// Current proximity ring readings.
    pub fn proximity(&self) -> [f32; 8] {
        self.proximity
    }

    /// Current robot position in meters.
    pub fn position(&self) -> (f32, f32) {
        (self.state.x, self.state.y)
    }

    /// Current heading in radians.
    pub fn heading(&self) -> f32 {
        self.state.heading
    }

    /// Simulation time in microseconds.
    pub fn sim_time_us(&self) -> u64 {
        self.sim_time_us
    }
}

impl Camera for Arena {
    fn width(&self) -> u32 {
        self.config.camera_width
    }

    fn height(&self) -> u32 {
        self.config.camera_height
    }

    fn pixel(&self, x: u32, _y: u32) -> Option<Rgb> {
        let columns = self.columns.as_ref()?;
        columns.get(x as usize).copied()
    }
}

impl MotorDrive for Arena {
    fn set_wheel_speeds(&mut self, speeds: WheelSpeeds) -> Result<(), MotorError> {
        self.command = speeds;
        Ok(())
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("beacons", &self.beacons.len())
            .field("state", &self.state)
            .field("sim_time_us", &self.sim_time_us)
            .finish()
    }
}

/// Normalize an angle to [-pi, pi].
fn wrap_pi(angle: f32) -> f32 {
    let mut a = angle % (2.0 * std::f32::consts::PI);
    if a > std::f32::consts::PI {
        a -= 2.0 * std::f32::consts::PI;
    } else if a < -std::f32::consts::PI {
        a += 2.0 * std::f32::consts::PI;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_rover_core::vision::sampler::detect_color;

    fn quiet_config() -> ArenaConfig {
        ArenaConfig {
            seed: Some(7),
            ..ArenaConfig::default()
        }
    }

    #[test]
    fn test_rejects_zero_tick() {
        let config = ArenaConfig {
            tick_ms: 0,
            ..ArenaConfig::default()
        };
        assert!(Arena::new(config, vec![]).is_err());
    }

    #[test]
    fn test_rejects_degenerate_beacon() {
        let beacon = Beacon {
            color: TargetColor::Red,
            x: 0.5,
            y: 0.0,
            radius: 0.0,
        };
        assert!(Arena::new(quiet_config(), vec![beacon]).is_err());
    }

    #[test]
    fn test_no_frame_before_first_step() {
        let arena = Arena::new(quiet_config(), vec![]).unwrap();
        assert!(arena.pixel(0, 0).is_none());
    }

    #[test]
    fn test_beacon_dead_ahead_fills_center() {
        let beacon = Beacon::new(TargetColor::Red, 0.2, 0.0);
        let mut arena = Arena::new(quiet_config(), vec![beacon]).unwrap();
        arena.step();
        // Beacon subtends ~0.2 rad of a 0.84 rad FOV; the coarse central
        // window sees it
        assert_eq!(detect_color(&arena), Some(TargetColor::Red));
    }

    #[test]
    fn test_empty_arena_is_gray() {
        let mut arena = Arena::new(quiet_config(), vec![]).unwrap();
        arena.step();
        assert_eq!(detect_color(&arena), None);
        assert_eq!(arena.pixel(0, 0), Some(FLOOR_COLOR));
    }

    #[test]
    fn test_proximity_rises_with_closeness() {
        let far = Beacon::new(TargetColor::Red, 0.5, 0.0);
        let mut arena = Arena::new(quiet_config(), vec![far]).unwrap();
        arena.step();
        let far_front = arena.proximity()[0];

        let near = Beacon::new(TargetColor::Red, 0.06, 0.0);
        let mut arena = Arena::new(quiet_config(), vec![near]).unwrap();
        arena.step();
        let near_front = arena.proximity()[0];

        assert!(near_front > far_front);
        assert!(
            near_front > 150.0,
            "2 cm surface distance should read above the reached threshold, got {near_front}"
        );
    }

    #[test]
    fn test_rear_sensors_blind_to_forward_beacon() {
        let beacon = Beacon::new(TargetColor::Red, 0.06, 0.0);
        let mut arena = Arena::new(quiet_config(), vec![beacon]).unwrap();
        arena.step();
        let ps = arena.proximity();
        assert_eq!(ps[3], 0.0);
        assert_eq!(ps[4], 0.0);
    }

    #[test]
    fn test_walls_read_on_proximity_ring() {
        let config = ArenaConfig {
            half_extent_m: 0.5,
            seed: Some(7),
            ..ArenaConfig::default()
        };
        let mut arena = Arena::new(config, vec![]).unwrap();
        // Drive up against the east wall
        arena.set_wheel_speeds(WheelSpeeds::straight(6.0)).unwrap();
        for _ in 0..200 {
            arena.step();
        }
        let ps = arena.proximity();
        assert!(
            ps[0] > 80.0 && ps[7] > 80.0,
            "front sensors should see the wall, got {:?}",
            ps
        );
    }

    #[test]
    fn test_forward_command_moves_east() {
        let mut arena = Arena::new(quiet_config(), vec![]).unwrap();
        arena.set_wheel_speeds(WheelSpeeds::straight(4.0)).unwrap();
        for _ in 0..10 {
            arena.step();
        }
        let (x, y) = arena.position();
        assert!(x > 0.0);
        assert!(y.abs() < 0.001);
    }

    #[test]
    fn test_turn_command_changes_heading() {
        let mut arena = Arena::new(quiet_config(), vec![]).unwrap();
        arena
            .set_wheel_speeds(WheelSpeeds::new(-1.6, 2.4))
            .unwrap();
        arena.step();
        assert!(arena.heading() > 0.0, "left turn should increase heading");
    }

    #[test]
    fn test_position_clamped_to_bounds() {
        let config = ArenaConfig {
            half_extent_m: 0.1,
            seed: Some(7),
            ..ArenaConfig::default()
        };
        let mut arena = Arena::new(config, vec![]).unwrap();
        arena.set_wheel_speeds(WheelSpeeds::straight(6.0)).unwrap();
        for _ in 0..500 {
            arena.step();
        }
        let (x, _) = arena.position();
        assert!(x <= 0.1 + 0.0001);
    }

    #[test]
    fn test_seeded_noise_is_deterministic() {
        let config = ArenaConfig {
            proximity_noise: 5.0,
            seed: Some(42),
            ..ArenaConfig::default()
        };
        let beacon = Beacon::new(TargetColor::Red, 0.08, 0.0);
        let mut a = Arena::new(config.clone(), vec![beacon]).unwrap();
        let mut b = Arena::new(config, vec![beacon]).unwrap();
        for _ in 0..5 {
            a.step();
            b.step();
        }
        assert_eq!(a.proximity(), b.proximity());
    }
}
