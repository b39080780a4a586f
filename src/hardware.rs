/// Narrow seams onto the machine: the sprite-register mirror and the
/// joystick bit layout. Core logic talks to sprites exclusively through
/// `SpriteHardware::sync`, so it never depends on a physical register
/// layout or on any particular renderer.

/// Total hardware sprite slots. Slot 0 is the player; the level pools own
/// fixed slot ranges above it.
pub const SPRITE_SLOTS: usize = 64;

/// Control-byte layout: size bits plus an enable bit in bit 0.
pub const CTRL_SIZE_16: u8 = 0x40;
pub const CTRL_SIZE_8: u8 = 0x60;
pub const CTRL_ENABLED: u8 = 0x01;

/// One sprite's full register state. This is the only shape that crosses
/// the hardware boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpriteRegs {
    /// Size + enable control byte (`CTRL_*`).
    pub ctrl: u8,
    /// Graphic data address of the frame currently shown.
    pub addr: u16,
    pub x: u16,
    pub y: u16,
}

/// Single-writer interface to sprite state. Exactly one component — the
/// per-frame render pass — may call this while a game is running.
pub trait SpriteHardware {
    fn sync(&mut self, slot: u8, regs: &SpriteRegs);
}

/// In-memory register file. The terminal renderer draws from this mirror;
/// tests inspect it directly.
#[derive(Clone, Debug)]
pub struct SpriteMirror {
    regs: [SpriteRegs; SPRITE_SLOTS],
}

impl SpriteMirror {
    pub fn new() -> Self {
        SpriteMirror {
            regs: [SpriteRegs::default(); SPRITE_SLOTS],
        }
    }

    pub fn slot(&self, slot: u8) -> &SpriteRegs {
        &self.regs[slot as usize]
    }

    pub fn slots(&self) -> &[SpriteRegs] {
        &self.regs
    }
}

impl Default for SpriteMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteHardware for SpriteMirror {
    fn sync(&mut self, slot: u8, regs: &SpriteRegs) {
        self.regs[slot as usize] = *regs;
    }
}

// Joystick bit-state, readable any frame. Both sticks report the same way.
pub const JOY_UP: u8 = 0b0000_0001;
pub const JOY_DOWN: u8 = 0b0000_0010;
pub const JOY_LEFT: u8 = 0b0000_0100;
pub const JOY_RIGHT: u8 = 0b0000_1000;
pub const JOY_FIRE1: u8 = 0b0001_0000;
pub const JOY_FIRE2: u8 = 0b0010_0000;
