/// The shared shape of every pooled, sprite-backed moving thing (humans and
/// missiles), plus the 8-way direction model the player shares with them.

use crate::geometry::{
    Rect, CLAMP_MARGIN, FIELD_MAX_X, FIELD_MAX_Y, FIELD_MIN_X, FIELD_MIN_Y,
};
use crate::hardware::{CTRL_SIZE_16, CTRL_SIZE_8};

// Graphic data layout. Shapes for a 16x16 sprite are 512 bytes apart (two
// 256-byte animation frames each); 8x8 missile shapes are 64 bytes apart
// with no alternate frame. The alternate frame always sits one 256-byte
// page past the primary.
pub const TANK_GRAPHIC_BASE: u16 = 0x4000;
pub const HUMAN_GRAPHIC_BASE: u16 = 0x5000;
pub const MISSILE_GRAPHIC_BASE: u16 = 0x5800;
pub const FRAME_PAGE: u16 = 0x0100;
pub const PAIR_SHAPE_SHIFT: u8 = 9;
pub const MISSILE_SHAPE_SHIFT: u8 = 6;

/// Cardinal walking speed of a human, pixels per frame. Must stay even:
/// humans spawn on even pixels and their animation trigger keys off
/// position parity.
pub const HUMAN_SPEED: i32 = 2;
/// Cardinal speed of a fired missile, pixels per frame.
pub const MISSILE_SPEED: i32 = 4;

/// 8-way compass facing, clockwise from north. The numeric order matters:
/// it indexes the pre-rendered shape tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Shape-table index for 0..=7. Callers feed this either a bounded
    /// random draw or a decoded joystick value.
    pub fn from_index(index: u8) -> Direction {
        Direction::ALL[index as usize]
    }

    /// Per-axis velocity for this facing. Diagonals move at half the
    /// cardinal speed on each axis.
    pub fn velocity(self, base_speed: i32) -> (i32, i32) {
        let diagonal = base_speed / 2;
        match self {
            Direction::North => (0, -base_speed),
            Direction::NorthEast => (diagonal, -diagonal),
            Direction::East => (base_speed, 0),
            Direction::SouthEast => (diagonal, diagonal),
            Direction::South => (0, base_speed),
            Direction::SouthWest => (-diagonal, diagonal),
            Direction::West => (-base_speed, 0),
            Direction::NorthWest => (-diagonal, -diagonal),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Human,
    Missile,
}

impl EntityKind {
    pub fn width(self) -> i32 {
        match self {
            EntityKind::Human => 16,
            EntityKind::Missile => 8,
        }
    }

    pub fn height(self) -> i32 {
        self.width()
    }

    pub fn graphic_base(self) -> u16 {
        match self {
            EntityKind::Human => HUMAN_GRAPHIC_BASE,
            EntityKind::Missile => MISSILE_GRAPHIC_BASE,
        }
    }

    /// Left-shift from shape index to byte offset in the graphic table.
    pub fn shape_shift(self) -> u8 {
        match self {
            EntityKind::Human => PAIR_SHAPE_SHIFT,
            EntityKind::Missile => MISSILE_SHAPE_SHIFT,
        }
    }

    /// Humans keep one shape per direction *pair* — adjacent facings share
    /// a graphic mirrored by the movement itself. Missiles have a distinct
    /// shape for all 8 facings.
    pub fn shape_per_pair(self) -> bool {
        match self {
            EntityKind::Human => true,
            EntityKind::Missile => false,
        }
    }

    /// Hardware control-byte size bits for this kind.
    pub fn ctrl_size(self) -> u8 {
        match self {
            EntityKind::Human => CTRL_SIZE_16,
            EntityKind::Missile => CTRL_SIZE_8,
        }
    }
}

/// One pooled sprite entity. Pools are allocated once; "creation" flips an
/// inactive slot active and "destruction" flips it back.
#[derive(Clone, Copy, Debug)]
pub struct Entity {
    pub kind: EntityKind,
    /// Top-left corner in playfield pixels.
    pub x1: i32,
    pub y1: i32,
    /// Bottom-right corner; always derived as top-left + sprite size.
    pub x2: i32,
    pub y2: i32,
    /// Per-frame pixel delta.
    pub vx: i32,
    pub vy: i32,
    pub direction: Direction,
    /// Graphic address of the primary animation frame.
    pub frame_addr: u16,
    /// Graphic address of the alternate frame; swapped with `frame_addr`
    /// to animate.
    pub frame_addr_alt: u16,
    pub active: bool,
    /// Hardware state is stale and must be re-synced this frame.
    pub dirty: bool,
    /// Fixed hardware sprite slot this entity mirrors into.
    pub slot: u8,
}

impl Entity {
    pub fn new(kind: EntityKind, slot: u8) -> Self {
        let base = kind.graphic_base();
        Entity {
            kind,
            x1: 0,
            y1: 0,
            x2: kind.width(),
            y2: kind.height(),
            vx: 0,
            vy: 0,
            direction: Direction::North,
            frame_addr: base,
            frame_addr_alt: base + FRAME_PAGE,
            active: false,
            dirty: false,
            slot,
        }
    }

    /// Point the entity in a direction: sets velocity from `base_speed`
    /// and re-selects the pre-rendered shape for that facing.
    pub fn set_direction(&mut self, direction: Direction, base_speed: i32) {
        self.direction = direction;
        let (vx, vy) = direction.velocity(base_speed);
        self.vx = vx;
        self.vy = vy;

        let step = if self.kind.shape_per_pair() {
            direction.index() / 2
        } else {
            direction.index()
        };
        let addr =
            self.kind.graphic_base() + ((step as u16) << self.kind.shape_shift());
        self.frame_addr = addr;
        self.frame_addr_alt = addr + FRAME_PAGE;
    }

    /// Apply the programmed velocity and re-derive the bottom-right
    /// corner. No validation; callers follow up with `move_is_valid`.
    pub fn apply_velocity(&mut self) {
        self.x1 += self.vx;
        self.y1 += self.vy;
        self.x2 = self.x1 + self.kind.width();
        self.y2 = self.y1 + self.kind.height();
    }

    /// Bounds check against the playfield. A coordinate at or past an edge
    /// is pulled `CLAMP_MARGIN` pixels inside it and the move is reported
    /// invalid so the caller can pick a new direction.
    pub fn move_is_valid(&mut self) -> bool {
        let mut valid = true;

        if self.x1 <= FIELD_MIN_X {
            self.x1 = FIELD_MIN_X + CLAMP_MARGIN;
            valid = false;
        } else if self.x2 >= FIELD_MAX_X {
            self.x2 = FIELD_MAX_X - CLAMP_MARGIN;
            valid = false;
        }

        if self.y1 <= FIELD_MIN_Y {
            self.y1 = FIELD_MIN_Y + CLAMP_MARGIN;
            valid = false;
        } else if self.y2 >= FIELD_MAX_Y {
            self.y2 = FIELD_MAX_Y - CLAMP_MARGIN;
            valid = false;
        }

        valid
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x1, self.y1, self.x2, self.y2)
    }

    /// AABB overlap between this entity's box and an arbitrary rectangle.
    pub fn collides_with(&self, rect: &Rect) -> bool {
        self.bounds().intersects(rect)
    }

    /// Place the entity at a position, deriving the bottom-right corner.
    pub fn place_at(&mut self, x: i32, y: i32) {
        self.x1 = x;
        self.y1 = y;
        self.x2 = x + self.kind.width();
        self.y2 = y + self.kind.height();
    }

    /// Swap primary and alternate animation frames.
    pub fn toggle_frame(&mut self) {
        std::mem::swap(&mut self.frame_addr, &mut self.frame_addr_alt);
    }

    /// Retire the entity: out of play, zero velocity, due for a hardware
    /// sync that hides it.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.vx = 0;
        self.vy = 0;
        self.dirty = true;
    }
}
