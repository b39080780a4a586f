/// Static weapon catalog — never mutated at runtime.

pub const WEAPON_COUNT: usize = 5;

#[derive(Clone, Copy, Debug)]
pub struct Weapon {
    /// Damage done by one hit from one bullet.
    pub damage: u8,
    /// Bullets per clip.
    pub clip_size: u8,
    /// Frames between firing events.
    pub firing_speed: u8,
    /// Frames a reload takes once the clip runs dry.
    pub reload_speed: u8,
    /// Most clips of this type the player can carry.
    pub max_clips: u8,
    pub name: &'static str,
}

pub const WEAPONS: [Weapon; WEAPON_COUNT] = [
    Weapon {
        damage: 5,
        clip_size: 9,
        firing_speed: 5,
        reload_speed: 5,
        max_clips: 20,
        name: "8mm peacemaker",
    },
    Weapon {
        damage: 3,
        clip_size: 30,
        firing_speed: 1,
        reload_speed: 5,
        max_clips: 18,
        name: "8mm pieces maker",
    },
    Weapon {
        damage: 5,
        clip_size: 100,
        firing_speed: 1,
        reload_speed: 5,
        max_clips: 10,
        name: "13mm auto gun",
    },
    Weapon {
        damage: 20,
        clip_size: 50,
        firing_speed: 3,
        reload_speed: 15,
        max_clips: 5,
        name: "20mm auto cannon",
    },
    Weapon {
        damage: 15,
        clip_size: 150,
        firing_speed: 1,
        reload_speed: 30,
        max_clips: 4,
        name: "MkI sterilizer",
    },
];
