/// The playfield and everything on it that isn't the player: fixed-capacity
/// human and missile pools, per-frame behavior, combat resolution, and the
/// gore tile overlay.

use rand::Rng;

use crate::entities::{
    Direction, Entity, EntityKind, HUMAN_SPEED, MISSILE_SPEED,
};
use crate::geometry::{FIELD_MAX_X, FIELD_MAX_Y, FIELD_MIN_X, FIELD_MIN_Y};
use crate::hardware::{SpriteHardware, SpriteRegs, CTRL_ENABLED};
use crate::hud::MessageBuffer;
use crate::player::{Player, SLIMING_DAMAGE};
use crate::random::roll;

// 64 hardware slots: player takes one, the pools take fixed ranges.
pub const MAX_MISSILES: usize = 33;
pub const MAX_HUMANS: usize = 10;
pub const PLAYER_SLOT: u8 = 0;
const HUMAN_SLOT_BASE: u8 = 1;
const MISSILE_SLOT_BASE: u8 = HUMAN_SLOT_BASE + MAX_HUMANS as u8;

pub const POINTS_PER_HUMAN: u32 = 100;

// Background tile grid: 20x15 cells of 16x16 px. Tile indices alternate
// clean-bloodied-clean-bloodied, so "bloodying" a cell is +1 on an even
// value and reverting is -1 on an odd one.
pub const TILE_COLS: usize = 20;
pub const TILE_ROWS: usize = 15;
pub const TILE_SIZE: i32 = 16;
const SPRITE_BORDER: i32 = 32;

#[derive(Clone, Debug)]
pub struct Level {
    pub humans: [Entity; MAX_HUMANS],
    pub missiles: [Entity; MAX_MISSILES],
    tiles: [u8; TILE_COLS * TILE_ROWS],
}

/// Full register mirror for one entity, ready to hand to the hardware.
fn regs_for(entity: &Entity) -> SpriteRegs {
    let enable = if entity.active { CTRL_ENABLED } else { 0 };
    SpriteRegs {
        ctrl: entity.kind.ctrl_size() | enable,
        addr: entity.frame_addr,
        x: entity.x1 as u16,
        y: entity.y1 as u16,
    }
}

impl Level {
    pub fn new() -> Self {
        Level {
            humans: std::array::from_fn(|i| {
                Entity::new(EntityKind::Human, HUMAN_SLOT_BASE + i as u8)
            }),
            missiles: std::array::from_fn(|i| {
                Entity::new(EntityKind::Missile, MISSILE_SLOT_BASE + i as u8)
            }),
            tiles: [0; TILE_COLS * TILE_ROWS],
        }
    }

    /// Configure the level for a new game: clean tiles, player and humans
    /// at random spots, all humans live, all missiles parked (and hidden
    /// in hardware, in case the previous game left them on).
    pub fn initialize(
        &mut self,
        player: &mut Player,
        rng: &mut impl Rng,
        hw: &mut dyn SpriteHardware,
    ) {
        self.reset_tiles();
        self.place_player(player, rng);
        self.place_humans(rng);

        for human in self.humans.iter_mut() {
            human.active = true;
            human.dirty = true;
        }

        for missile in self.missiles.iter_mut() {
            missile.active = false;
            missile.dirty = false;
            missile.vx = 0;
            missile.vy = 0;
            hw.sync(missile.slot, &regs_for(missile));
        }
    }

    fn place_player(&mut self, player: &mut Player, rng: &mut impl Rng) {
        let x = roll(rng, (FIELD_MAX_X - FIELD_MIN_X) as u16) as i32 + FIELD_MIN_X;
        let y = roll(rng, (FIELD_MAX_Y - FIELD_MIN_Y) as u16) as i32 + FIELD_MIN_Y;
        player.move_to(x, y);
    }

    /// Scatter the humans at random even-pixel positions with random
    /// facings. Even pixels only: the walking animation keys off position
    /// parity and even speeds, so an odd start would freeze it.
    fn place_humans(&mut self, rng: &mut impl Rng) {
        for human in self.humans.iter_mut() {
            let mut x =
                roll(rng, (FIELD_MAX_X - FIELD_MIN_X) as u16) as i32 + FIELD_MIN_X;
            if x % 2 != 0 {
                x -= 1;
            }
            let mut y =
                roll(rng, (FIELD_MAX_Y - FIELD_MIN_Y) as u16) as i32 + FIELD_MIN_Y;
            if y % 2 != 0 {
                y -= 1;
            }
            human.place_at(x, y);

            let dir = Direction::from_index(roll(rng, 8) as u8 - 1);
            human.set_direction(dir, HUMAN_SPEED);
        }
    }

    /// One behavior pass over every active non-player entity. Humans first
    /// (player collision, then motion), missiles second (human collision,
    /// then motion). Must run after player movement and before the render
    /// sync.
    pub fn update_entities(&mut self, player: &mut Player, rng: &mut impl Rng) {
        let player_box = player.bounds();

        for i in 0..MAX_HUMANS {
            if !self.humans[i].active {
                continue;
            }

            if self.humans[i].collides_with(&player_box) {
                // Ran over by the player. Splat.
                player.take_damage(SLIMING_DAMAGE);
                player.score += POINTS_PER_HUMAN;
                let (hx, hy) = (self.humans[i].x1, self.humans[i].y1);
                self.humans[i].deactivate();
                self.mark_tile_bloody(hx, hy);
            } else {
                self.humans[i].apply_velocity();
                if !self.humans[i].move_is_valid() {
                    // Hit the edge; wander off some other way.
                    let dir = Direction::from_index(roll(rng, 8) as u8 - 1);
                    self.humans[i].set_direction(dir, HUMAN_SPEED);
                }

                // Walk-cycle toggle is keyed to position parity, not time:
                // humans spawn on even pixels and move an even number of
                // pixels per frame, so this alternates as they walk and
                // freezes when they stand still.
                if (self.humans[i].x1 + self.humans[i].y1) % 8 == 0 {
                    self.humans[i].toggle_frame();
                }

                self.humans[i].dirty = true;
            }
        }

        for i in 0..MAX_MISSILES {
            if !self.missiles[i].active {
                continue;
            }

            let missile_box = self.missiles[i].bounds();
            for j in 0..MAX_HUMANS {
                if self.humans[j].active
                    && self.humans[j].collides_with(&missile_box)
                {
                    player.score += POINTS_PER_HUMAN;
                    let (hx, hy) = (self.humans[j].x1, self.humans[j].y1);
                    self.humans[j].deactivate();
                    self.mark_tile_bloody(hx, hy);
                    self.missiles[i].deactivate();
                    // first hit wins
                    break;
                }
            }

            if self.missiles[i].active {
                self.missiles[i].apply_velocity();
                if !self.missiles[i].move_is_valid() {
                    // Missiles don't bounce; off the field means gone.
                    self.missiles[i].deactivate();
                }
            }

            self.missiles[i].dirty = true;
        }
    }

    /// Flush every render-dirty entity to the hardware sprite state. This
    /// is the only place entity state crosses the hardware boundary.
    pub fn render_entities(&mut self, hw: &mut dyn SpriteHardware) {
        for entity in self
            .humans
            .iter_mut()
            .chain(self.missiles.iter_mut())
        {
            if entity.dirty {
                hw.sync(entity.slot, &regs_for(entity));
                entity.dirty = false;
            }
        }
    }

    /// Fire the equipped weapon if possible. With ammo and a free missile
    /// slot, launches from the player's position along their facing. With
    /// an empty clip, attempts a reload and reports the outcome. With no
    /// free slot, fails silently — the sky is simply full.
    pub fn player_attempt_shoot(
        &mut self,
        player: &mut Player,
        messages: &mut MessageBuffer,
    ) -> bool {
        if player.bullets > 0 {
            if let Some(missile) = self.missiles.iter_mut().find(|m| !m.active) {
                missile.place_at(player.x, player.y);
                missile.set_direction(player.facing, MISSILE_SPEED);
                missile.active = true;
                missile.dirty = true;
                player.bullets -= 1;
                return true;
            }
        } else if player.reload() {
            messages.push("Changing clips");
        } else {
            messages.push("<click>");
        }
        false
    }

    // ── Gore overlay ─────────────────────────────────────────────────────

    /// Switch the tile under a pixel position to its bloodied variant.
    /// Already-bloodied tiles are left alone.
    pub fn mark_tile_bloody(&mut self, x: i32, y: i32) {
        let col = (((x - SPRITE_BORDER) / TILE_SIZE).max(0) as usize)
            .min(TILE_COLS - 1);
        let row = (((y - SPRITE_BORDER) / TILE_SIZE).max(0) as usize)
            .min(TILE_ROWS - 1);
        let cell = &mut self.tiles[row * TILE_COLS + col];
        if *cell % 2 == 0 {
            *cell += 1;
        }
    }

    /// Revert every bloodied tile to its clean variant.
    pub fn reset_tiles(&mut self) {
        for cell in self.tiles.iter_mut() {
            if *cell % 2 != 0 {
                *cell -= 1;
            }
        }
    }

    pub fn tile_is_bloody(&self, col: usize, row: usize) -> bool {
        self.tiles[row * TILE_COLS + col] % 2 != 0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}
