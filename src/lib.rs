/// Core game logic for Infestation — a top-down arcade shooter in which a
/// lone robot defends its planet against an infestation of humans.
///
/// The library is terminal-agnostic: all rendering flows through the
/// `SpriteHardware` trait in `hardware`, all randomness through injected
/// `rand::Rng` handles, so every module here is testable headless.

pub mod entities;
pub mod geometry;
pub mod hardware;
pub mod hud;
pub mod level;
pub mod player;
pub mod random;
pub mod session;
pub mod weapons;
