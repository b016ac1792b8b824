//! Sand poured from a sweeping emitter, piling up on a grid.
//!
//! Grains fall freely until they hit the floor or a settled grain. They then try to
//! slide diagonally down to the left or right, and settle if neither side is free.
//! Settled grains slowly wear away, and every so often an avalanche throws a patch
//! of the pile back into the air.
//!
//! The [`Occupancy`] grid has a cell set exactly when one settled grain sits in it.

use std::f32::consts::TAU;

use bevy::{log::debug, math::Vec2, render::color::Color};
use hashbrown::HashMap;
use itertools::iproduct;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use super::{ensure_drawable, Animation, AnimationError, Metadata};
use crate::render::canvas::{BlendMode, Canvas, CanvasSize};
use crate::util::{clock::Clock, grid::CellCoord};

pub mod config;
mod occupancy;

pub use config::{SandConfig, SandConfigBuilder};
use occupancy::Occupancy;

pub const METADATA: Metadata = Metadata {
    title: "Flowing Sand",
    description: "Grains pour, pile up, slide down the slopes and collapse in avalanches.",
    author: "Canvas Gallery",
    date: "2024-04-13",
};

/// Keeps clamped positions strictly inside the last cell
const EDGE_INSET: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
struct Grain {
    pos: Vec2,
    vel: Vec2,
    settled: bool,
    life: f32,
    color: Color,
    /// Marked for removal at the end of the frame
    expired: bool,
}

#[derive(Clone)]
pub struct FlowingSand {
    config: SandConfig,
    rng: StdRng,
    size: CanvasSize,
    occupancy: Occupancy,
    grains: Vec<Grain>,
    /// Seconds of simulated time
    time: f32,
}

impl FlowingSand {
    pub fn new(seed: u64, config: SandConfig) -> Self {
        let size = CanvasSize::new(1, 1);
        Self {
            occupancy: Occupancy::new(size, config.cell_size),
            config,
            rng: StdRng::seed_from_u64(seed),
            size,
            grains: Vec::new(),
            time: 0.0,
        }
    }

    pub fn grain_count(&self) -> usize {
        self.grains.len()
    }

    /// One settled grain per occupied cell
    pub fn settled_count(&self) -> usize {
        self.occupancy.cells().count_true()
    }

    /// Advance the simulation by exactly one frame
    pub fn step(&mut self, frame_seconds: f32) {
        self.time += frame_seconds;
        self.spawn_grains();
        self.move_free_grains();
        self.release_unsupported();
        self.wear_settled();
        if self.rng.gen_bool(self.config.avalanche_chance) {
            self.trigger_avalanche();
        }
        self.grains.retain(|g| !g.expired);
    }
}

/* ======================================
 * Simulation steps
 * ====================================== */
impl FlowingSand {
    /// Drop new grains under the emitter, which sweeps back and forth along the top
    fn spawn_grains(&mut self) {
        let room = self.config.max_particles.saturating_sub(self.grains.len());
        let count = self.config.spawn_per_frame.min(room);
        if count == 0 {
            return;
        }
        let extent = self.occupancy.extent();
        let cell = self.occupancy.cell_size();
        let sweep = (self.time * self.config.emitter_speed * TAU).sin();
        let emitter_x = extent.x * (0.5 + 0.4 * sweep);
        for _ in 0..count {
            let x = (emitter_x + self.rng.gen_range(-2.0..2.0) * cell)
                .clamp(0.0, extent.x - EDGE_INSET);
            let grain = Grain {
                pos: Vec2::new(x, self.rng.gen_range(0.0..cell * 0.9)),
                vel: Vec2::new(self.rng.gen_range(-0.3..0.3), self.rng.gen_range(0.0..1.0)),
                settled: false,
                life: 1.0,
                color: Color::hsla(
                    self.rng.gen_range(30.0..50.0),
                    0.7,
                    self.rng.gen_range(0.5..0.7),
                    1.0,
                ),
                expired: false,
            };
            self.grains.push(grain);
        }
    }

    /// Integrate gravity, wind and friction, then land, slide or settle
    fn move_free_grains(&mut self) {
        let c = &self.config;
        let occupancy = &mut self.occupancy;
        let rng = &mut self.rng;
        let wind = (self.time * c.wind_frequency * TAU).sin() * c.wind_strength;
        let extent = occupancy.extent();
        let max_step = occupancy.cell_size();

        for grain in self.grains.iter_mut().filter(|g| !g.settled && !g.expired) {
            grain.vel.y += c.gravity;
            grain.vel.x += wind;
            grain.vel *= c.friction;
            // Never skip a cell in one frame
            grain.vel = grain.vel.clamp(Vec2::splat(-max_step), Vec2::splat(max_step));
            let prev_pos = grain.pos;
            let prev_cell = occupancy.cell_of(prev_pos);
            grain.pos += grain.vel;

            if grain.pos.x < 0.0 {
                grain.pos.x = 0.0;
                grain.vel.x = -grain.vel.x * 0.5;
            } else if grain.pos.x >= extent.x {
                grain.pos.x = extent.x - EDGE_INSET;
                grain.vel.x = -grain.vel.x * 0.5;
            }
            if grain.pos.y < 0.0 {
                grain.pos.y = 0.0;
                grain.vel.y = 0.0;
            } else if grain.pos.y >= extent.y {
                grain.pos.y = extent.y - EDGE_INSET;
            }

            // Drifting into the side of a pile bounces off it instead of climbing it
            let mut cell = occupancy.cell_of(grain.pos);
            if occupancy.is_occupied(cell) && cell.col != prev_cell.col {
                grain.pos.x = prev_pos.x;
                grain.vel.x = -grain.vel.x * 0.5;
                cell = occupancy.cell_of(grain.pos);
            }

            // Back out of the pile if we fell into it
            if occupancy.is_occupied(cell) {
                while occupancy.is_occupied(cell) {
                    if cell.row == 0 {
                        break;
                    }
                    cell.row -= 1;
                }
                if occupancy.is_occupied(cell) {
                    // The column is full to the top
                    grain.expired = true;
                    continue;
                }
                let center_y = occupancy.center_of(cell).y;
                grain.pos.y = if cell == prev_cell {
                    prev_pos.y.max(center_y)
                } else {
                    center_y
                };
                grain.vel.y = 0.0;
            }

            // Still flying upwards from an avalanche
            if grain.vel.y < 0.0 || !occupancy.is_supported(cell) {
                continue;
            }

            let mut slid = false;
            if cell.row + 1 < occupancy.rows() {
                let mut sides = [-1isize, 1];
                sides.shuffle(rng);
                for side in sides {
                    let col = cell.col as isize + side;
                    if col < 0 || col as usize >= occupancy.cols() {
                        continue;
                    }
                    let target = CellCoord::new(col as usize, cell.row + 1);
                    if !occupancy.is_occupied(target) {
                        grain.pos = occupancy.center_of(target);
                        grain.vel.x = side as f32 * 0.5;
                        slid = true;
                        break;
                    }
                }
            }

            if !slid {
                grain.settled = true;
                grain.vel = Vec2::ZERO;
                grain.pos = occupancy.center_of(cell);
                occupancy.occupy(cell);
            }
        }
    }

    /// Settled grains whose support was removed start falling again
    fn release_unsupported(&mut self) {
        let occupancy = &mut self.occupancy;
        for grain in self.grains.iter_mut().filter(|g| g.settled) {
            let cell = occupancy.cell_of(grain.pos);
            if !occupancy.is_supported(cell) {
                occupancy.vacate(cell);
                grain.settled = false;
            }
        }
    }

    /// Settled grains fade and eventually disappear, freeing their cell
    fn wear_settled(&mut self) {
        let c = &self.config;
        let occupancy = &mut self.occupancy;
        let rng = &mut self.rng;
        for grain in self.grains.iter_mut().filter(|g| g.settled) {
            grain.life *= c.life_decay;
            if grain.life < c.life_threshold && rng.gen_bool(c.removal_chance) {
                let cell = occupancy.cell_of(grain.pos);
                occupancy.vacate(cell);
                grain.settled = false;
                grain.expired = true;
            }
        }
    }

    /// Clear a patch of the pile around a random settled grain and throw it upwards and outwards
    fn trigger_avalanche(&mut self) {
        let settled: Vec<usize> = self
            .grains
            .iter()
            .enumerate()
            .filter(|(_, g)| g.settled)
            .map(|(i, _)| i)
            .collect();
        let Some(&anchor_idx) = settled.choose(&mut self.rng) else {
            return;
        };
        let anchor = self.occupancy.cell_of(self.grains[anchor_idx].pos);

        let by_cell: HashMap<CellCoord, usize> = settled
            .iter()
            .map(|&i| (self.occupancy.cell_of(self.grains[i].pos), i))
            .collect();

        let c = &self.config;
        let cols = anchor.col.saturating_sub(c.avalanche_half_width)
            ..=(anchor.col + c.avalanche_half_width).min(self.occupancy.cols() - 1);
        let rows = anchor.row.saturating_sub(c.avalanche_half_height)
            ..=(anchor.row + c.avalanche_half_height).min(self.occupancy.rows() - 1);

        let mut released = 0;
        for (row, col) in iproduct!(rows, cols) {
            let cell = CellCoord::new(col, row);
            if let Some(&i) = by_cell.get(&cell) {
                self.occupancy.vacate(cell);
                let outward = match col.cmp(&anchor.col) {
                    std::cmp::Ordering::Less => -1.0,
                    std::cmp::Ordering::Greater => 1.0,
                    std::cmp::Ordering::Equal => {
                        if self.rng.gen_bool(0.5) {
                            1.0
                        } else {
                            -1.0
                        }
                    }
                };
                let grain = &mut self.grains[i];
                grain.settled = false;
                grain.vel = Vec2::new(
                    outward * self.rng.gen_range(0.5..2.0),
                    -self.rng.gen_range(1.0..3.0),
                );
                released += 1;
            }
        }
        debug!(anchor = %anchor, released, "Avalanche");
    }
}

impl Animation for FlowingSand {
    fn metadata(&self) -> Metadata {
        METADATA
    }

    fn init(&mut self, size: CanvasSize) -> Result<(), AnimationError> {
        ensure_drawable(size)?;
        self.size = size;
        self.occupancy = Occupancy::new(size, self.config.cell_size);
        self.grains.clear();
        Ok(())
    }

    fn update(&mut self, clock: &Clock) {
        let frame_seconds = clock.get_last_delta().as_secs_f32();
        self.step(frame_seconds);
    }

    fn draw(&self, canvas: &mut Canvas) {
        canvas.fill_vertical_gradient(Color::rgb(0.08, 0.05, 0.12), Color::rgb(0.2, 0.1, 0.1));
        let cell = self.occupancy.cell_size();
        let half = Vec2::splat(cell * 0.5);
        for grain in &self.grains {
            let alpha = if grain.settled {
                grain.life.max(0.25)
            } else {
                1.0
            };
            canvas.fill_rect(
                grain.pos - half,
                Vec2::splat(cell),
                grain.color.with_a(alpha),
                BlendMode::SourceOver,
            );
        }
    }
}
