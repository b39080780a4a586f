mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use infestation::entities::Direction;
use infestation::hardware::SpriteMirror;
use infestation::session::{GameSession, Intent};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Message-buffer width in terminal columns (the playfield width).
const MESSAGE_COLS: usize = 40;

enum KeyAction {
    Play(Intent),
    Quit,
    Restart,
}

/// Original 8-way movement cluster around `s`, plus arrows for the
/// cardinals. Fire on space, weapon cycle on `]` or tab.
fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(KeyAction::Quit);
    }
    match code {
        KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Restart),
        KeyCode::Up | KeyCode::Char('w') => {
            Some(KeyAction::Play(Intent::Move(Direction::North)))
        }
        KeyCode::Char('e') => Some(KeyAction::Play(Intent::Move(Direction::NorthEast))),
        KeyCode::Right | KeyCode::Char('d') => {
            Some(KeyAction::Play(Intent::Move(Direction::East)))
        }
        KeyCode::Char('c') => Some(KeyAction::Play(Intent::Move(Direction::SouthEast))),
        KeyCode::Down | KeyCode::Char('x') => {
            Some(KeyAction::Play(Intent::Move(Direction::South)))
        }
        KeyCode::Char('z') => Some(KeyAction::Play(Intent::Move(Direction::SouthWest))),
        KeyCode::Left | KeyCode::Char('a') => {
            Some(KeyAction::Play(Intent::Move(Direction::West)))
        }
        KeyCode::Char('q') => Some(KeyAction::Play(Intent::Move(Direction::NorthWest))),
        KeyCode::Char(' ') => Some(KeyAction::Play(Intent::Fire)),
        KeyCode::Char(']') | KeyCode::Tab => Some(KeyAction::Play(Intent::CycleWeapon)),
        _ => None,
    }
}

/// One game from spawn to game-over screen. Returns `true` to quit the
/// program, `false` to start another game.
fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> anyhow::Result<bool> {
    let mut rng = thread_rng();
    let mut hw = SpriteMirror::new();
    let mut session = GameSession::new(MESSAGE_COLS, &mut rng, &mut hw);

    while !session.game_over {
        let frame_start = Instant::now();

        // Consume at most one queued key this frame; the rest stay queued.
        let mut intent = None;
        if let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if kind == KeyEventKind::Press {
                match map_key(code, modifiers) {
                    Some(KeyAction::Quit) => return Ok(true),
                    Some(KeyAction::Play(i)) => intent = Some(i),
                    _ => {}
                }
            }
        }

        // No joystick on a terminal; the bit-state stays idle.
        session.frame(intent, 0, &mut rng, &mut hw);
        display::render(out, &session, &hw)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }

    // Final frame already shows the overlay; wait for restart or quit.
    loop {
        if let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.recv() {
            if kind != KeyEventKind::Press {
                continue;
            }
            match map_key(code, modifiers) {
                Some(KeyAction::Quit) => return Ok(true),
                Some(KeyAction::Restart) => return Ok(false),
                _ => {}
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw terminal mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    out.execute(cursor::Hide).context("failed to hide cursor")?;

    // Dedicate a thread to blocking event reads so the frame loop never
    // waits on input I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped, program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> anyhow::Result<()> {
    // One session per game; game-over re-initializes and goes again.
    loop {
        if game_loop(out, rx)? {
            return Ok(());
        }
    }
}
