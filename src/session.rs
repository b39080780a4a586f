/// One game, start to game-over: the explicit context object that owns the
/// player, the level, the message buffer, and the frame counter, plus the
/// fixed-order per-frame update.

use rand::Rng;

use crate::entities::{Direction, FRAME_PAGE, TANK_GRAPHIC_BASE};
use crate::hardware::{
    SpriteHardware, SpriteRegs, CTRL_ENABLED, CTRL_SIZE_16, JOY_DOWN, JOY_FIRE1,
    JOY_FIRE2, JOY_LEFT, JOY_RIGHT, JOY_UP,
};
use crate::hud::{self, MessageBuffer};
use crate::level::{Level, PLAYER_SLOT};
use crate::player::Player;

/// Pixels a direction input nudges the player per frame, per axis.
pub const NUDGE: i32 = 2;

/// Tick divisor for the player's tread animation. Unlike the humans, the
/// tank animates on elapsed frames, not position parity — it should churn
/// even while pushing against a wall.
pub const TANK_ANIM_DIVISOR: u16 = 8;

/// Bytes between tank shapes: one per facing, two frames each.
const TANK_SHAPE_STRIDE: u16 = 512;

/// One decoded player intention from the keyboard. Direction keys both
/// nudge and turn; fire is queued so it executes after movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Move(Direction),
    Fire,
    CycleWeapon,
}

/// Joystick direction decode. Bit sums for the diagonals; contradictory or
/// idle combinations yield no facing change.
fn joy_direction(direction_bits: u8) -> Option<Direction> {
    match direction_bits {
        b if b == JOY_UP => Some(Direction::North),
        b if b == JOY_UP | JOY_RIGHT => Some(Direction::NorthEast),
        b if b == JOY_RIGHT => Some(Direction::East),
        b if b == JOY_DOWN | JOY_RIGHT => Some(Direction::SouthEast),
        b if b == JOY_DOWN => Some(Direction::South),
        b if b == JOY_DOWN | JOY_LEFT => Some(Direction::SouthWest),
        b if b == JOY_LEFT => Some(Direction::West),
        b if b == JOY_UP | JOY_LEFT => Some(Direction::NorthWest),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    pub level: Level,
    pub messages: MessageBuffer,
    /// Wrapping frame counter; drives the tank animation and condition
    /// countdowns. Never wall-clock time.
    pub ticktock: u16,
    pub game_over: bool,
    prev_facing: Direction,
    tank_base: u16,
    tank_addr: u16,
}

impl GameSession {
    /// Start a new game: fresh player, re-initialized level, welcome
    /// message. Constructed once per game, not once per process.
    pub fn new(
        message_width: usize,
        rng: &mut impl Rng,
        hw: &mut dyn SpriteHardware,
    ) -> Self {
        let mut player = Player::new(rng);
        let mut level = Level::new();
        level.initialize(&mut player, rng, hw);

        let mut messages = MessageBuffer::new(message_width);
        messages.push("Infestation detected! Stop the humans!");

        let facing = player.facing;
        let tank_base =
            TANK_GRAPHIC_BASE + facing.index() as u16 * TANK_SHAPE_STRIDE;
        GameSession {
            player,
            level,
            messages,
            ticktock: 0,
            game_over: false,
            prev_facing: facing,
            tank_base,
            tank_addr: tank_base,
        }
    }

    /// Advance the game by one fixed timestep. Strict internal order:
    /// input, player movement and clamp, tank graphic, queued fire, entity
    /// update, hardware sync, life-loss check. `key` is the single consumed
    /// keyboard intent for this frame; when present it suppresses the
    /// joystick entirely.
    pub fn frame(
        &mut self,
        key: Option<Intent>,
        joy: u8,
        rng: &mut impl Rng,
        hw: &mut dyn SpriteHardware,
    ) {
        if self.game_over {
            return;
        }

        self.ticktock = self.ticktock.wrapping_add(1);
        self.player.tick_speed_condition();

        let mut wants_fire = false;
        let mut keyboard_handled = true;
        match key {
            Some(Intent::Move(dir)) => {
                let (dx, dy) = nudge_delta(dir);
                self.player.x += dx;
                self.player.y += dy;
                self.player.facing = dir;
            }
            Some(Intent::Fire) => wants_fire = true,
            Some(Intent::CycleWeapon) => self.player.next_weapon(),
            None => keyboard_handled = false,
        }

        if !keyboard_handled {
            if joy & JOY_UP != 0 {
                self.player.y -= NUDGE;
            }
            if joy & JOY_DOWN != 0 {
                self.player.y += NUDGE;
            }
            if joy & JOY_LEFT != 0 {
                self.player.x -= NUDGE;
            }
            if joy & JOY_RIGHT != 0 {
                self.player.x += NUDGE;
            }
            if joy & JOY_FIRE1 != 0 {
                wants_fire = true;
            }
            if joy & JOY_FIRE2 != 0 {
                self.player.next_weapon();
            }
            if let Some(dir) =
                joy_direction(joy & (JOY_UP | JOY_DOWN | JOY_LEFT | JOY_RIGHT))
            {
                self.player.facing = dir;
            }
        }

        self.player.validate_location();
        self.select_tank_shape();

        if wants_fire {
            let _ = self.level.player_attempt_shoot(
                &mut self.player,
                &mut self.messages,
            );
        }

        self.level.update_entities(&mut self.player, rng);
        self.render(hw);

        if self.player.hp < 1 && self.player.lose_life(rng) {
            self.game_over = true;
            self.messages.push("You blew it. Hoomans get this planet.");
        }
    }

    /// Pick the tank graphic: a new shape when the facing changed since
    /// last frame, otherwise the alternate frame on the tick divisor.
    fn select_tank_shape(&mut self) {
        if self.player.facing != self.prev_facing {
            self.tank_base = TANK_GRAPHIC_BASE
                + self.player.facing.index() as u16 * TANK_SHAPE_STRIDE;
            self.tank_addr = self.tank_base;
            self.prev_facing = self.player.facing;
        } else if self.ticktock % TANK_ANIM_DIVISOR == 0 {
            self.tank_addr = self.tank_base + FRAME_PAGE;
        } else {
            self.tank_addr = self.tank_base;
        }
    }

    /// The frame's single hardware write point: player sprite first, then
    /// every render-dirty entity.
    fn render(&mut self, hw: &mut dyn SpriteHardware) {
        hw.sync(
            PLAYER_SLOT,
            &SpriteRegs {
                ctrl: CTRL_SIZE_16 | CTRL_ENABLED,
                addr: self.tank_addr,
                x: self.player.x as u16,
                y: self.player.y as u16,
            },
        );
        self.level.render_entities(hw);
    }

    /// Current stat readout for the HUD.
    pub fn stat_line(&self) -> String {
        hud::stat_line(&self.player)
    }
}

/// Per-axis pixel nudge for a keyboard direction. Diagonals move the full
/// nudge on both axes (unlike entity velocities, which halve).
fn nudge_delta(dir: Direction) -> (i32, i32) {
    match dir {
        Direction::North => (0, -NUDGE),
        Direction::NorthEast => (NUDGE, -NUDGE),
        Direction::East => (NUDGE, 0),
        Direction::SouthEast => (NUDGE, NUDGE),
        Direction::South => (0, NUDGE),
        Direction::SouthWest => (-NUDGE, NUDGE),
        Direction::West => (-NUDGE, 0),
        Direction::NorthWest => (-NUDGE, -NUDGE),
    }
}
