use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dod_engine::coords::ColorRgba;
use dod_engine::sprite::{Game, SpriteData};

pub const MOVER_COUNT: usize = 10_000;
pub const AVOIDER_COUNT: usize = 20;

/// Movers closer than this to an avoider bounce off it.
pub const AVOID_DISTANCE: f32 = 0.2;

const MOVER_SCALE: f32 = 0.05;
const AVOIDER_SCALE: f32 = 0.1;

const WORLD_MIN: f32 = -1.0;
const WORLD_MAX: f32 = 1.0;

/// Structure-of-arrays storage for one kind of moving object.
#[derive(Debug, Default)]
struct Bodies {
    positions: Vec<[f32; 2]>,
    velocities: Vec<[f32; 2]>,
    colors: Vec<ColorRgba>,

    // State at the start of the last `advance`.
    prev_positions: Vec<[f32; 2]>,
    prev_velocities: Vec<[f32; 2]>,
}

impl Bodies {
    fn len(&self) -> usize {
        self.positions.len()
    }

    fn push(&mut self, position: [f32; 2], velocity: [f32; 2], color: ColorRgba) {
        self.positions.push(position);
        self.velocities.push(velocity);
        self.colors.push(color);
    }

    fn spawn(
        rng: &mut StdRng,
        count: usize,
        speed: (f32, f32),
        color: impl Fn(&mut StdRng) -> ColorRgba,
    ) -> Self {
        let mut bodies = Bodies::default();
        for _ in 0..count {
            let position = [
                rng.gen_range(WORLD_MIN..WORLD_MAX),
                rng.gen_range(WORLD_MIN..WORLD_MAX),
            ];
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(speed.0..speed.1);
            let velocity = [angle.cos() * speed, angle.sin() * speed];
            let color = color(rng);
            bodies.push(position, velocity, color);
        }
        bodies
    }

    /// Moves every body by `velocity * dt` and reflects it off the world bounds.
    fn advance(&mut self, dt: f32) {
        self.prev_positions.clone_from(&self.positions);
        self.prev_velocities.clone_from(&self.velocities);

        for (pos, vel) in self.positions.iter_mut().zip(self.velocities.iter_mut()) {
            for axis in 0..2 {
                pos[axis] += vel[axis] * dt;
                if pos[axis] < WORLD_MIN {
                    pos[axis] = WORLD_MIN;
                    vel[axis] = -vel[axis];
                } else if pos[axis] > WORLD_MAX {
                    pos[axis] = WORLD_MAX;
                    vel[axis] = -vel[axis];
                }
            }
        }
    }

    fn write(&self, out: &mut [SpriteData], scale: f32) -> usize {
        let mut written = 0;
        for ((slot, pos), color) in out.iter_mut().zip(&self.positions).zip(&self.colors) {
            *slot = SpriteData::new(pos[0], pos[1], scale, *color);
            written += 1;
        }
        written
    }
}

/// Movers wander the world and bounce off a handful of avoiders, taking on
/// the color of the last avoider they hit.
#[derive(Debug)]
pub struct Simulation {
    seed: u64,
    movers: Bodies,
    avoiders: Bodies,
}

impl Simulation {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            movers: Bodies::default(),
            avoiders: Bodies::default(),
        }
    }

    /// Sends movers that ended the step near an avoider back to where the
    /// step started, heading the other way.
    fn avoid(&mut self) {
        let limit = AVOID_DISTANCE * AVOID_DISTANCE;
        let movers = &mut self.movers;

        for i in 0..movers.len() {
            let [mx, my] = movers.positions[i];

            for (apos, acolor) in self.avoiders.positions.iter().zip(&self.avoiders.colors) {
                let dx = mx - apos[0];
                let dy = my - apos[1];
                if dx * dx + dy * dy >= limit {
                    continue;
                }

                let [vx, vy] = movers.prev_velocities[i];
                movers.positions[i] = movers.prev_positions[i];
                movers.velocities[i] = [-vx, -vy];
                movers.colors[i] = *acolor;
                break;
            }
        }
    }
}

impl Game for Simulation {
    fn initialize(&mut self) {
        let mut rng = StdRng::seed_from_u64(self.seed);

        self.avoiders = Bodies::spawn(&mut rng, AVOIDER_COUNT, (0.05, 0.2), |rng| {
            ColorRgba::new(
                rng.gen_range(0.5..1.0),
                rng.gen_range(0.5..1.0),
                rng.gen_range(0.5..1.0),
                1.0,
            )
        });
        self.movers = Bodies::spawn(&mut rng, MOVER_COUNT, (0.1, 0.5), |_| ColorRgba::white());

        log::info!(
            "simulation: {} movers, {} avoiders (seed {:#x})",
            self.movers.len(),
            self.avoiders.len(),
            self.seed
        );
    }

    fn update(&mut self, sprites: &mut [SpriteData], _elapsed: f64, dt: f32) -> usize {
        self.avoiders.advance(dt);
        self.movers.advance(dt);
        self.avoid();

        let n = self.avoiders.write(sprites, AVOIDER_SCALE);
        n + self.movers.write(&mut sprites[n..], MOVER_SCALE)
    }

    fn destroy(&mut self) {
        self.movers = Bodies::default();
        self.avoiders = Bodies::default();
    }
}
