/// HUD data: the scrolling communications buffer and the one-line stat
/// readout. Pure string building — drawing happens in the renderer.

use std::collections::VecDeque;

use crate::player::Player;
use crate::weapons::WEAPONS;

/// Visible rows in the message area.
pub const MESSAGE_ROWS: usize = 4;

/// Fixed-depth scrolling message log. New messages enter at the bottom and
/// push older rows up and out.
#[derive(Clone, Debug)]
pub struct MessageBuffer {
    rows: VecDeque<String>,
    width: usize,
}

impl MessageBuffer {
    pub fn new(width: usize) -> Self {
        let mut rows = VecDeque::with_capacity(MESSAGE_ROWS);
        for _ in 0..MESSAGE_ROWS {
            rows.push_back(String::new());
        }
        MessageBuffer { rows, width }
    }

    /// Append a message, word-wrapping to the buffer width. Each wrapped
    /// line scrolls the buffer by one row.
    pub fn push(&mut self, message: &str) {
        let mut rest = message.trim_end();
        while !rest.is_empty() {
            if rest.len() <= self.width {
                self.scroll_in(rest.to_string());
                return;
            }
            // Break at the last space that fits; hard-split a single
            // overlong word.
            let cut = rest[..self.width]
                .rfind(' ')
                .unwrap_or(self.width);
            self.scroll_in(rest[..cut].to_string());
            rest = rest[cut..].trim_start();
        }
    }

    fn scroll_in(&mut self, line: String) {
        let _ = self.rows.pop_front();
        self.rows.push_back(line);
    }

    /// Clear all rows.
    pub fn clear(&mut self) {
        for row in self.rows.iter_mut() {
            row.clear();
        }
    }

    /// Rows oldest-first; the last row is the newest message.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|s| s.as_str())
    }
}

/// Single-line stat readout: weapon name, clips, bullets-in-clip, lives,
/// HP, warps, score. Ammo and health read out in hex, score in decimal —
/// the machine this game grew up on counted that way.
pub fn stat_line(player: &Player) -> String {
    format!(
        "{:<16} C:{:02X} B:{:02X} L:{:01X} HP:{:02X} W:{:01X} {:05}",
        WEAPONS[player.current_weapon].name,
        player.clips,
        player.bullets,
        player.lives.max(0),
        player.hp.clamp(0, 0xFF),
        player.warps,
        player.score,
    )
}
