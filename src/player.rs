/// Player state machine: health, lives, ammo inventory, speed modifiers,
/// and the computer chips that mutate them.

use rand::Rng;

use crate::entities::Direction;
use crate::geometry::{FIELD_MAX_X, FIELD_MAX_Y, FIELD_MIN_X, FIELD_MIN_Y, Rect};
use crate::random::roll;
use crate::weapons::{WEAPONS, WEAPON_COUNT};

pub const PLAYER_SPRITE_WIDTH: i32 = 16;
pub const PLAYER_SPRITE_HEIGHT: i32 = 16;

pub const STARTING_LIVES: i8 = 3;
pub const STARTING_WARPS: u8 = 3;
/// Upper bound of the random HP grant applied per life (and at startup).
pub const HP_GRANT_BASE: u16 = 25;
/// Damage absorbed when the player runs over a human.
pub const SLIMING_DAMAGE: i16 = 15;
/// Upper bound, in frames, of a temporary speed condition.
pub const TEMP_SPEED_FRAMES: u16 = 1000;

// Special-condition flags. The three speed conditions are mutually
// exclusive; setting one clears the other two.
pub const IS_SLOW: u8 = 0x20;
pub const IS_SPEEDY: u8 = 0x40;
pub const IS_SUPER_SPEEDY: u8 = 0x80;
const SPEED_CONDITIONS: u8 = IS_SLOW | IS_SPEEDY | IS_SUPER_SPEEDY;

// Moves per half turn at each speed state.
pub const SLOW_SPEED: u8 = 1;
pub const NORMAL_SPEED: u8 = 2;
pub const FAST_SPEED: u8 = 4;
pub const SUPER_FAST_SPEED: u8 = 8;

/// Computer chips the humans drop. Eating one runs a fixed effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chip {
    Z80,
    I8088,
    M6502,
    M68030,
    I8800,
}

impl Chip {
    pub const ALL: [Chip; 5] =
        [Chip::Z80, Chip::I8088, Chip::M6502, Chip::M68030, Chip::I8800];

    pub fn label(self) -> &'static str {
        match self {
            Chip::Z80 => "z80",
            Chip::I8088 => "8088",
            Chip::M6502 => "6502",
            Chip::M68030 => "68030",
            Chip::I8800 => "8800",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    /// Top-left corner of the player sprite, playfield pixels.
    pub x: i32,
    pub y: i32,
    pub facing: Direction,
    pub hp: i16,
    /// HP when healthy; grows with each random grant.
    pub max_hp: i16,
    pub lives: i8,
    pub score: u32,
    pub warps: u8,
    pub current_weapon: usize,
    /// Bullets left in the equipped weapon's clip (fast-access copy).
    pub bullets: u8,
    /// Reserve clips for the equipped weapon (fast-access copy).
    pub clips: u8,
    /// Damage per bullet of the equipped weapon (fast-access copy).
    pub bullet_damage: u8,
    /// Per-weapon reserve-clip inventory, including the equipped weapon.
    pub stored_clips: [u8; WEAPON_COUNT],
    /// Per-weapon bullets-left-in-clip, persisted on weapon switch.
    pub stored_bullets: [u8; WEAPON_COUNT],
    /// Moves per half turn (`SLOW_SPEED`..`SUPER_FAST_SPEED`).
    pub speed: u8,
    pub conditions: u8,
    /// Frames until a temporary speed condition reverts to normal.
    pub speed_countdown: u16,
}

impl Player {
    /// Fresh player for a new game: full ammo for every weapon, pistol
    /// equipped, and a random starting HP grant.
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut stored_clips = [0u8; WEAPON_COUNT];
        let mut stored_bullets = [0u8; WEAPON_COUNT];
        for (i, weapon) in WEAPONS.iter().enumerate() {
            stored_clips[i] = weapon.max_clips;
            stored_bullets[i] = weapon.clip_size;
        }

        let mut player = Player {
            x: 0,
            y: 0,
            facing: Direction::North,
            hp: 0,
            max_hp: 0,
            lives: STARTING_LIVES,
            score: 0,
            warps: STARTING_WARPS,
            current_weapon: 0,
            bullets: stored_bullets[0],
            clips: stored_clips[0],
            bullet_damage: WEAPONS[0].damage,
            stored_clips,
            stored_bullets,
            speed: NORMAL_SPEED,
            conditions: 0,
            speed_countdown: 0,
        };
        player.increase_hp(rng);
        player
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.x + PLAYER_SPRITE_WIDTH,
            self.y + PLAYER_SPRITE_HEIGHT,
        )
    }

    /// Clamp the position back inside the playfield.
    pub fn validate_location(&mut self) {
        if self.x < FIELD_MIN_X {
            self.x = FIELD_MIN_X;
        }
        if self.y < FIELD_MIN_Y {
            self.y = FIELD_MIN_Y;
        }
        if self.x > FIELD_MAX_X {
            self.x = FIELD_MAX_X;
        }
        if self.y > FIELD_MAX_Y {
            self.y = FIELD_MAX_Y;
        }
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.validate_location();
    }

    // ── Health & lives ───────────────────────────────────────────────────

    /// Remove HP; clamps at zero, never negative.
    pub fn take_damage(&mut self, damage: i16) {
        if self.hp < damage {
            self.hp = 0;
        } else {
            self.hp -= damage;
        }
    }

    /// Add a random bounded amount to both current and healthy HP.
    pub fn increase_hp(&mut self, rng: &mut impl Rng) {
        let grant = roll(rng, HP_GRANT_BASE) as i16;
        self.hp += grant;
        self.max_hp += grant;
    }

    /// Remove a random bounded amount from both current and healthy HP;
    /// current HP clamps at zero.
    pub fn decrease_hp(&mut self, rng: &mut impl Rng) {
        let loss = roll(rng, HP_GRANT_BASE) as i16;
        if self.hp < loss {
            self.hp = 0;
        } else {
            self.hp -= loss;
        }
        self.max_hp -= loss;
    }

    /// Convert a life into fresh HP. Returns true when no lives remain —
    /// the game-over signal.
    pub fn lose_life(&mut self, rng: &mut impl Rng) -> bool {
        if self.lives < 1 {
            return true;
        }
        self.lives -= 1;
        self.hp = 0;
        self.increase_hp(rng);
        false
    }

    // ── Speed conditions ─────────────────────────────────────────────────

    /// Half speed: one move every two turns.
    pub fn set_slow_speed(&mut self, rng: &mut impl Rng) {
        self.conditions = (self.conditions & !SPEED_CONDITIONS) | IS_SLOW;
        self.speed = SLOW_SPEED;
        self.speed_countdown = roll(rng, TEMP_SPEED_FRAMES);
    }

    pub fn set_normal_speed(&mut self) {
        self.conditions &= !SPEED_CONDITIONS;
        self.speed = NORMAL_SPEED;
        self.speed_countdown = 0;
    }

    /// Two moves per turn.
    pub fn set_fast_speed(&mut self, rng: &mut impl Rng) {
        self.conditions = (self.conditions & !SPEED_CONDITIONS) | IS_SPEEDY;
        self.speed = FAST_SPEED;
        self.speed_countdown = roll(rng, TEMP_SPEED_FRAMES);
    }

    /// Four moves per turn.
    pub fn set_super_fast_speed(&mut self, rng: &mut impl Rng) {
        self.conditions = (self.conditions & !SPEED_CONDITIONS) | IS_SUPER_SPEEDY;
        self.speed = SUPER_FAST_SPEED;
        self.speed_countdown = roll(rng, TEMP_SPEED_FRAMES);
    }

    /// Once-per-frame countdown. Reaching zero while a speed condition is
    /// live reverts to normal.
    pub fn tick_speed_condition(&mut self) {
        if self.speed_countdown > 0 {
            self.speed_countdown -= 1;
            if self.speed_countdown == 0 && self.conditions & SPEED_CONDITIONS != 0 {
                self.set_normal_speed();
            }
        }
    }

    // ── Weapons & ammo ───────────────────────────────────────────────────

    /// Equip a weapon by catalog index. Out-of-range indices and the
    /// currently equipped weapon are no-ops.
    pub fn set_weapon(&mut self, weapon_id: usize) {
        if weapon_id >= WEAPON_COUNT || weapon_id == self.current_weapon {
            return;
        }
        self.current_weapon = weapon_id;
        self.clips = self.stored_clips[weapon_id];
        self.bullets = self.stored_bullets[weapon_id];
        self.bullet_damage = WEAPONS[weapon_id].damage;
    }

    /// Cycle to the next weapon, persisting the outgoing clip state first.
    pub fn next_weapon(&mut self) {
        self.stored_bullets[self.current_weapon] = self.bullets;
        self.stored_clips[self.current_weapon] = self.clips;
        let next = (self.current_weapon + 1) % WEAPON_COUNT;
        self.set_weapon(next);
    }

    /// Swap in a fresh clip. Fails without side effects when the reserve
    /// for the equipped weapon is empty.
    pub fn reload(&mut self) -> bool {
        if self.clips > 0 {
            self.clips -= 1;
            self.stored_clips[self.current_weapon] = self.clips;
            self.bullets = WEAPONS[self.current_weapon].clip_size;
            true
        } else {
            false
        }
    }

    /// Add a found clip to inventory. Fails when the weapon type is
    /// already at its carry limit.
    pub fn pick_up_clip(&mut self, weapon_id: usize) -> bool {
        if self.stored_clips[weapon_id] >= WEAPONS[weapon_id].max_clips {
            return false;
        }
        self.stored_clips[weapon_id] += 1;
        if weapon_id == self.current_weapon {
            self.clips = self.stored_clips[weapon_id];
        }
        true
    }

    /// Eat a computer chip; each kind runs its fixed effect. Always
    /// succeeds.
    pub fn pick_up_chip(&mut self, chip: Chip, rng: &mut impl Rng) -> bool {
        match chip {
            Chip::Z80 => self.set_slow_speed(rng),
            Chip::I8088 => self.decrease_hp(rng),
            Chip::M6502 => self.increase_hp(rng),
            Chip::M68030 => self.set_fast_speed(rng),
            Chip::I8800 => self.set_super_fast_speed(rng),
        }
        true
    }
}
