use crossterm::{
    cursor::{self, Hide, Show},
    event::{
        poll, read, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use fps_clock::FpsClock;

use std::{
    io::{self, stdout, Write},
    time::{Duration, Instant},
};

use crate::{
    data::{self, Command, Program},
    error::Result,
    graphics::{Argb, Canvas, Pixel},
};

/// Frame pixels covered by one terminal cell. Each cell shows two of
/// them stacked, one per half block.
const CELL_W: usize = 8;
const CELL_H: usize = 16;

/// Rows taken by the title line.
const HEADER_ROWS: u16 = 1;

/// The frame size that fills a terminal of `cols` × `rows`.
pub fn viewport_of(cols: u16, rows: u16) -> (usize, usize) {
    let rows = rows.saturating_sub(HEADER_ROWS) as usize;
    (cols as usize * CELL_W, rows * CELL_H)
}

/// Maps a terminal cell to the frame pixel at its center.
pub fn cell_to_frame(col: u16, row: u16) -> Option<(i32, i32)> {
    let row = row.checked_sub(HEADER_ROWS)? as usize;

    Some((
        (col as usize * CELL_W + CELL_W / 2) as i32,
        (row * CELL_H + CELL_H / 2) as i32,
    ))
}

/// A run of cells sharing the same pair of colors.
#[derive(Debug, PartialEq)]
struct Segment {
    top: Argb,
    bottom: Argb,
    len: usize,
}

/// Splits one row of half-block cells into runs of equal color, so
/// the terminal only gets a color change when the color changes.
fn segments(top: &[Argb], bottom: &[Argb]) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();

    for (&t, &b) in top.iter().zip(bottom) {
        match out.last_mut() {
            Some(last) if last.top == t && last.bottom == b => last.len += 1,
            _ => out.push(Segment {
                top: t,
                bottom: b,
                len: 1,
            }),
        }
    }

    out
}

fn to_color(c: Argb) -> Color {
    let [_, r, g, b] = c.decompose();
    Color::Rgb { r, g, b }
}

struct Console<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> Console<W> {
    fn print_title(&mut self, title: &str) -> Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            ResetColor,
            Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Bold),
            Print(title),
            SetAttribute(Attribute::Reset),
        )?;

        Ok(())
    }

    /// Takes a new terminal size. The screen is wiped, so the title is
    /// printed again right away.
    fn resize(&mut self, cols: u16, rows: u16, title: &str) -> Result<Command> {
        self.cols = cols;
        self.rows = rows;

        queue!(self.out, Clear(ClearType::All))?;
        self.print_title(title)?;

        let (vw, vh) = viewport_of(cols, rows);
        Ok(Command::Resize(vw, vh))
    }

    fn print_frame(&mut self, frame: &Canvas) -> Result<()> {
        let cols = self.cols as usize;
        let lines = self.rows.saturating_sub(HEADER_ROWS) as usize;

        if cols == 0 || lines == 0 {
            return Ok(());
        }

        let small = frame.scaled_nearest(cols, lines * 2);
        let pixels = small.as_slice();

        for (line, pair) in pixels.chunks_exact(cols * 2).enumerate() {
            let (top, bottom) = pair.split_at(cols);

            queue!(self.out, cursor::MoveTo(0, line as u16 + HEADER_ROWS))?;

            for seg in segments(top, bottom) {
                queue!(
                    self.out,
                    SetForegroundColor(to_color(seg.top)),
                    SetBackgroundColor(to_color(seg.bottom)),
                    Print("▀".repeat(seg.len)),
                )?;
            }
        }

        queue!(self.out, ResetColor)?;

        Ok(())
    }
}

/// Reads every pending terminal event. Returns false once the user quits.
fn control_key_events_con<W: Write>(prog: &mut Program, con: &mut Console<W>) -> Result<bool> {
    let mut cmds = Vec::new();

    while poll(Duration::ZERO)? {
        match read()? {
            Event::Key(event) if event.kind == KeyEventKind::Press => match event.code {
                KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char(' ') => {
                    cmds.push(Command::Regenerate)
                }

                KeyCode::Char('q') | KeyCode::Esc => cmds.push(Command::Close),

                _ => {}
            },

            Event::Mouse(event) if event.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some((x, y)) = cell_to_frame(event.column, event.row) {
                    cmds.push(Command::Click(x, y));
                }
            }

            Event::Resize(w, h) => cmds.push(con.resize(w, h, prog.title())?),

            _ => {}
        }
    }

    let close = cmds.iter().any(Command::is_close_requested);
    prog.eval_commands(&mut cmds);

    Ok(!close)
}

fn run<W: Write>(prog: &mut Program, con: &mut Console<W>) -> Result<()> {
    let mut clock = FpsClock::new(prog.fps());

    con.print_title(prog.title())?;

    while control_key_events_con(prog, con)? {
        if prog.update(Instant::now()) {
            con.print_title(prog.title())?;
        }

        prog.render();
        con.print_frame(&prog.pix)?;
        con.out.flush()?;

        clock.tick();
    }

    Ok(())
}

pub fn con_main(mut prog: Program) -> Result<()> {
    let (cols, rows) = size()?;

    let (vw, vh) = viewport_of(cols, rows);
    prog.eval_command(&Command::Resize(vw, vh));

    let mut con = Console {
        out: stdout(),
        cols,
        rows,
    };

    enable_raw_mode()?;
    queue!(con.out, EnterAlternateScreen, EnableMouseCapture, Hide)?;
    con.out.flush()?;

    // Log lines would tear through the frame.
    let level = data::log::suspend();

    let result = run(&mut prog, &mut con);

    let restored = restore_terminal(&mut con.out, disable_raw_mode);

    data::log::restore(level);
    prog.dispose();

    result.and(restored)
}

/// Runs every restore step, then reports the first failure.
fn restore_terminal<W: Write>(
    out: &mut W,
    leave_raw_mode: impl FnOnce() -> io::Result<()>,
) -> Result<()> {
    let raw = leave_raw_mode();
    let screen = queue!(out, ResetColor, DisableMouseCapture, LeaveAlternateScreen, Show)
        .and_then(|()| out.flush());

    raw?;
    screen?;
    Ok(())
}
