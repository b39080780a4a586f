/// Rendering layer — all terminal I/O lives here.
///
/// The game core never draws; it syncs sprite register mirrors through
/// `SpriteHardware`. This module translates the mirror plus the session's
/// HUD state into terminal commands, one full redraw per frame.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use infestation::hardware::{SpriteMirror, CTRL_ENABLED, CTRL_SIZE_8};
use infestation::hud::MESSAGE_ROWS;
use infestation::level::{PLAYER_SLOT, TILE_COLS, TILE_ROWS};
use infestation::session::GameSession;

// One terminal cell covers 8x8 playfield pixels.
const PIXELS_PER_CELL: u16 = 8;
// The visible tile area starts 32 px in (the sprite border).
const FIELD_ORIGIN_CELL: u16 = 4;
const FIELD_CELL_COLS: u16 = (TILE_COLS as u16) * 2;
const FIELD_CELL_ROWS: u16 = (TILE_ROWS as u16) * 2;

const STAT_ROW: u16 = FIELD_ORIGIN_CELL + FIELD_CELL_ROWS + 1;
const MESSAGE_FIRST_ROW: u16 = STAT_ROW + 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_GORE: Color = Color::DarkRed;
const C_PLAYER: Color = Color::White;
const C_HUMAN: Color = Color::Green;
const C_MISSILE: Color = Color::Cyan;
const C_STAT: Color = Color::White;
const C_STAT_BG: Color = Color::Magenta;
const C_MESSAGE: Color = Color::Magenta;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame from the session state and sprite mirror.
pub fn render<W: Write>(
    out: &mut W,
    session: &GameSession,
    mirror: &SpriteMirror,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out)?;
    draw_gore(out, session)?;
    draw_sprites(out, mirror)?;
    draw_stat_line(out, session)?;
    draw_messages(out, session)?;

    if session.game_over {
        draw_game_over(out, session)?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, MESSAGE_FIRST_ROW + MESSAGE_ROWS as u16))?;
    out.flush()?;
    Ok(())
}

// ── Playfield frame ───────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    let left = FIELD_ORIGIN_CELL - 1;
    let right = FIELD_ORIGIN_CELL + FIELD_CELL_COLS;
    let top = FIELD_ORIGIN_CELL - 1;
    let bottom = FIELD_ORIGIN_CELL + FIELD_CELL_ROWS;
    let inner = (right - left - 1) as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(left, top))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    out.queue(cursor::MoveTo(left, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    for row in (top + 1)..bottom {
        out.queue(cursor::MoveTo(left, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

/// Bloodied tiles, two cells square each.
fn draw_gore<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_GORE))?;
    for row in 0..TILE_ROWS {
        for col in 0..TILE_COLS {
            if session.level.tile_is_bloody(col, row) {
                let sx = FIELD_ORIGIN_CELL + col as u16 * 2;
                let sy = FIELD_ORIGIN_CELL + row as u16 * 2;
                out.queue(cursor::MoveTo(sx, sy))?;
                out.queue(Print("░░"))?;
                out.queue(cursor::MoveTo(sx, sy + 1))?;
                out.queue(Print("░░"))?;
            }
        }
    }
    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

/// Draw every enabled hardware sprite from the register mirror. Glyph and
/// colour follow the control byte: 8x8 sprites are missiles, 16x16 are the
/// player (slot 0) or humans.
fn draw_sprites<W: Write>(out: &mut W, mirror: &SpriteMirror) -> std::io::Result<()> {
    for (slot, regs) in mirror.slots().iter().enumerate() {
        if regs.ctrl & CTRL_ENABLED == 0 {
            continue;
        }

        let sx = regs.x / PIXELS_PER_CELL;
        let sy = regs.y / PIXELS_PER_CELL;
        let (glyph, color) = if regs.ctrl & CTRL_SIZE_8 == CTRL_SIZE_8 {
            ("•", C_MISSILE)
        } else if slot as u8 == PLAYER_SLOT {
            ("▣", C_PLAYER)
        } else {
            ("☻", C_HUMAN)
        };

        out.queue(cursor::MoveTo(sx, sy))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_stat_line<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(FIELD_ORIGIN_CELL - 1, STAT_ROW))?;
    out.queue(style::SetForegroundColor(C_STAT))?;
    out.queue(style::SetBackgroundColor(C_STAT_BG))?;
    out.queue(Print(format!(
        "{:<width$}",
        session.stat_line(),
        width = (FIELD_CELL_COLS + 2) as usize
    )))?;
    out.queue(style::ResetColor)?;
    Ok(())
}

fn draw_messages<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_MESSAGE))?;
    for (i, row) in session.messages.rows().enumerate() {
        out.queue(cursor::MoveTo(
            FIELD_ORIGIN_CELL - 1,
            MESSAGE_FIRST_ROW + i as u16,
        ))?;
        out.queue(Print(row))?;
    }
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, session: &GameSession) -> std::io::Result<()> {
    let lines = [
        "╔══════════════════════╗".to_string(),
        "║      GAME  OVER      ║".to_string(),
        "╚══════════════════════╝".to_string(),
        format!("Score: {:05}", session.player.score),
        "R - New Game  ESC - Quit".to_string(),
    ];

    let cx = FIELD_ORIGIN_CELL + FIELD_CELL_COLS / 2;
    let start_row = FIELD_ORIGIN_CELL + FIELD_CELL_ROWS / 2 - 2;

    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        let color = if i < 3 { Color::Red } else { Color::Yellow };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(line))?;
    }

    Ok(())
}
