use rand::rngs::StdRng;
use rand::SeedableRng;

use infestation::entities::{Direction, HUMAN_SPEED, MISSILE_SPEED};
use infestation::geometry::{FIELD_MAX_X, FIELD_MIN_X, FIELD_MIN_Y};
use infestation::hardware::{SpriteMirror, CTRL_ENABLED, CTRL_SIZE_8, CTRL_SIZE_16};
use infestation::hud::MessageBuffer;
use infestation::level::{Level, MAX_HUMANS, MAX_MISSILES, POINTS_PER_HUMAN};
use infestation::player::{Player, SLIMING_DAMAGE};
use infestation::weapons::WEAPONS;

fn rng() -> StdRng {
    StdRng::seed_from_u64(0xF00D)
}

/// Fresh level with every pooled entity parked, and a player far from the
/// action. Tests activate exactly what they need.
fn quiet_setup() -> (Level, Player, StdRng) {
    let mut r = rng();
    let mut player = Player::new(&mut r);
    player.move_to(FIELD_MIN_X + 8, FIELD_MIN_Y + 8);
    player.hp = 50;
    let level = Level::new();
    (level, player, r)
}

// ── initialize ────────────────────────────────────────────────────────────────

#[test]
fn initialize_places_everyone_and_parks_the_missiles() {
    let mut r = rng();
    let mut hw = SpriteMirror::new();
    let mut player = Player::new(&mut r);
    let mut level = Level::new();

    level.initialize(&mut player, &mut r, &mut hw);

    assert!(player.x >= FIELD_MIN_X && player.x <= FIELD_MAX_X);
    for human in level.humans.iter() {
        assert!(human.active);
        assert!(human.dirty);
        assert!(human.x1 >= FIELD_MIN_X && human.x1 <= FIELD_MAX_X);
        // even spawn pixels keep the walk animation alive
        assert_eq!(human.x1 % 2, 0);
        assert_eq!(human.y1 % 2, 0);
        assert!(human.vx != 0 || human.vy != 0);
    }
    for missile in level.missiles.iter() {
        assert!(!missile.active);
        // parked missiles are pushed to hardware disabled
        assert_eq!(hw.slot(missile.slot).ctrl, CTRL_SIZE_8);
    }
}

#[test]
fn initialize_scrubs_gore_from_the_previous_game() {
    let mut r = rng();
    let mut hw = SpriteMirror::new();
    let mut player = Player::new(&mut r);
    let mut level = Level::new();

    level.mark_tile_bloody(100, 100);
    assert!(level.tile_is_bloody(4, 4));

    level.initialize(&mut player, &mut r, &mut hw);
    for row in 0..15 {
        for col in 0..20 {
            assert!(!level.tile_is_bloody(col, row));
        }
    }
}

// ── human vs player ───────────────────────────────────────────────────────────

#[test]
fn running_over_a_human_scores_hurts_and_bloodies() {
    let (mut level, mut player, mut r) = quiet_setup();
    player.move_to(100, 100);
    level.humans[0].place_at(100, 100);
    level.humans[0].active = true;

    level.update_entities(&mut player, &mut r);

    assert!(!level.humans[0].active);
    assert!(level.humans[0].dirty);
    assert_eq!(player.score, POINTS_PER_HUMAN);
    assert_eq!(player.hp, 50 - SLIMING_DAMAGE);
    assert!(level.tile_is_bloody(4, 4)); // (100-32)/16
}

#[test]
fn surviving_humans_walk_their_velocity() {
    let (mut level, mut player, mut r) = quiet_setup();
    level.humans[0].place_at(200, 200);
    level.humans[0].set_direction(Direction::East, HUMAN_SPEED);
    level.humans[0].active = true;

    level.update_entities(&mut player, &mut r);

    assert!(level.humans[0].active);
    assert_eq!(level.humans[0].x1, 200 + HUMAN_SPEED);
    assert!(level.humans[0].dirty);
    assert_eq!(player.score, 0);
}

#[test]
fn human_at_the_edge_is_clamped_and_rerouted() {
    let (mut level, mut player, mut r) = quiet_setup();
    level.humans[0].place_at(FIELD_MIN_X + HUMAN_SPEED, 100);
    level.humans[0].set_direction(Direction::West, HUMAN_SPEED);
    level.humans[0].active = true;

    level.update_entities(&mut player, &mut r);

    assert!(level.humans[0].active);
    assert_eq!(level.humans[0].x1, FIELD_MIN_X + 2);
    // still moving somewhere after the reroute
    assert!(level.humans[0].vx != 0 || level.humans[0].vy != 0);
}

// ── missile vs human ──────────────────────────────────────────────────────────

#[test]
fn missile_kill_retires_both_and_scores_once() {
    let (mut level, mut player, mut r) = quiet_setup();
    level.humans[0].place_at(200, 200);
    level.humans[0].active = true;
    level.missiles[0].place_at(204, 204);
    level.missiles[0].active = true;

    level.update_entities(&mut player, &mut r);

    assert!(!level.humans[0].active);
    assert!(!level.missiles[0].active);
    assert_eq!(player.score, POINTS_PER_HUMAN);
    assert!(level.tile_is_bloody((200 - 32) / 16, (200 - 32) / 16));
}

#[test]
fn one_missile_takes_at_most_one_human() {
    let (mut level, mut player, mut r) = quiet_setup();
    // two humans stacked on the same spot, one missile in the middle
    level.humans[0].place_at(200, 200);
    level.humans[0].active = true;
    level.humans[1].place_at(200, 200);
    level.humans[1].active = true;
    level.missiles[0].place_at(204, 204);
    level.missiles[0].active = true;

    level.update_entities(&mut player, &mut r);

    let survivors = level.humans.iter().filter(|h| h.active).count();
    assert_eq!(survivors, MAX_HUMANS - 1);
    assert_eq!(player.score, POINTS_PER_HUMAN);
}

#[test]
fn missile_flies_its_velocity_when_nothing_is_hit() {
    let (mut level, mut player, mut r) = quiet_setup();
    level.missiles[0].place_at(200, 200);
    level.missiles[0].set_direction(Direction::East, MISSILE_SPEED);
    level.missiles[0].active = true;

    level.update_entities(&mut player, &mut r);

    assert!(level.missiles[0].active);
    assert_eq!(level.missiles[0].x1, 200 + MISSILE_SPEED);
    assert!(level.missiles[0].dirty);
}

#[test]
fn missile_leaving_the_field_is_retired() {
    let (mut level, mut player, mut r) = quiet_setup();
    level.missiles[0].place_at(FIELD_MAX_X - 10, 100);
    level.missiles[0].set_direction(Direction::East, MISSILE_SPEED);
    level.missiles[0].active = true;

    level.update_entities(&mut player, &mut r);

    assert!(!level.missiles[0].active);
    assert!(level.missiles[0].dirty);
}

// ── shooting ──────────────────────────────────────────────────────────────────

#[test]
fn shooting_spawns_a_missile_along_the_facing() {
    let (mut level, mut player, _) = quiet_setup();
    let mut messages = MessageBuffer::new(40);
    player.move_to(150, 150);
    player.facing = Direction::East;
    let bullets = player.bullets;

    assert!(level.player_attempt_shoot(&mut player, &mut messages));

    let missile = &level.missiles[0];
    assert!(missile.active);
    assert!(missile.dirty);
    assert_eq!((missile.x1, missile.y1), (150, 150));
    assert_eq!((missile.vx, missile.vy), (MISSILE_SPEED, 0));
    assert_eq!(player.bullets, bullets - 1);
}

#[test]
fn empty_clip_with_reserve_reloads_instead() {
    let (mut level, mut player, _) = quiet_setup();
    let mut messages = MessageBuffer::new(40);
    player.bullets = 0;
    player.clips = 2;

    assert!(!level.player_attempt_shoot(&mut player, &mut messages));

    assert_eq!(player.bullets, WEAPONS[0].clip_size);
    assert_eq!(player.clips, 1);
    assert!(level.missiles.iter().all(|m| !m.active));
    assert_eq!(messages.rows().last(), Some("Changing clips"));
}

#[test]
fn empty_clip_and_empty_reserve_just_clicks() {
    let (mut level, mut player, _) = quiet_setup();
    let mut messages = MessageBuffer::new(40);
    player.bullets = 0;
    player.clips = 0;

    assert!(!level.player_attempt_shoot(&mut player, &mut messages));

    assert_eq!(player.bullets, 0);
    assert!(level.missiles.iter().all(|m| !m.active));
    assert_eq!(messages.rows().last(), Some("<click>"));
}

#[test]
fn full_missile_pool_fails_silently() {
    let (mut level, mut player, _) = quiet_setup();
    let mut messages = MessageBuffer::new(40);
    for missile in level.missiles.iter_mut() {
        missile.active = true;
    }
    let bullets = player.bullets;

    assert!(!level.player_attempt_shoot(&mut player, &mut messages));

    assert_eq!(player.bullets, bullets);
    assert_eq!(messages.rows().last(), Some(""));
}

#[test]
fn pool_holds_exactly_its_capacity_of_missiles() {
    let (mut level, mut player, _) = quiet_setup();
    let mut messages = MessageBuffer::new(40);
    player.bullets = 200;
    player.move_to(150, 150);

    let mut launched = 0;
    for _ in 0..MAX_MISSILES + 5 {
        if level.player_attempt_shoot(&mut player, &mut messages) {
            launched += 1;
        }
    }
    assert_eq!(launched, MAX_MISSILES);
    assert!(level.missiles.iter().all(|m| m.active));
}

// ── hardware sync ─────────────────────────────────────────────────────────────

#[test]
fn render_flushes_dirty_entities_and_clears_the_flag() {
    let (mut level, _, _) = quiet_setup();
    let mut hw = SpriteMirror::new();
    level.humans[0].place_at(120, 140);
    level.humans[0].active = true;
    level.humans[0].dirty = true;

    level.render_entities(&mut hw);

    let regs = hw.slot(level.humans[0].slot);
    assert_eq!(regs.ctrl, CTRL_SIZE_16 | CTRL_ENABLED);
    assert_eq!(regs.addr, level.humans[0].frame_addr);
    assert_eq!((regs.x, regs.y), (120, 140));
    assert!(!level.humans[0].dirty);
}

#[test]
fn render_skips_clean_entities() {
    let (mut level, _, _) = quiet_setup();
    let mut hw = SpriteMirror::new();
    level.humans[0].place_at(120, 140);
    level.humans[0].active = true;
    level.humans[0].dirty = false;

    level.render_entities(&mut hw);

    assert_eq!(hw.slot(level.humans[0].slot).ctrl, 0);
}

// ── gore overlay ──────────────────────────────────────────────────────────────

#[test]
fn bloodying_a_tile_twice_is_idempotent() {
    let mut level = Level::new();
    level.mark_tile_bloody(100, 100);
    level.mark_tile_bloody(100, 100);
    assert!(level.tile_is_bloody(4, 4));

    level.reset_tiles();
    assert!(!level.tile_is_bloody(4, 4));
}

#[test]
fn out_of_range_pixels_clamp_to_the_grid() {
    let mut level = Level::new();
    level.mark_tile_bloody(-50, -50);
    assert!(level.tile_is_bloody(0, 0));

    level.mark_tile_bloody(10_000, 10_000);
    assert!(level.tile_is_bloody(19, 14));
}
