//! Terminal pathfinding visualizer using crossterm.
//!
//! Run: cargo run --bin gridpath

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_demo::{HELP_TEXT, Tile, Visualizer};
use gridpath_paths::NodeState;

const TICK: Duration = Duration::from_millis(16);

const COL_EMPTY: CtColor = CtColor::Rgb { r: 25, g: 25, b: 35 };
const COL_WALL: CtColor = CtColor::Rgb { r: 90, g: 90, b: 110 };
const COL_FRONTIER: CtColor = CtColor::Rgb { r: 40, g: 110, b: 60 };
const COL_VISITED: CtColor = CtColor::Rgb { r: 50, g: 60, b: 120 };
const COL_PATH: CtColor = CtColor::Rgb { r: 50, g: 180, b: 255 };
const COL_START: CtColor = CtColor::Rgb { r: 255, g: 220, b: 80 };
const COL_GOAL: CtColor = CtColor::Rgb { r: 220, g: 50, b: 50 };
const COL_STATUS_FG: CtColor = CtColor::Rgb { r: 200, g: 200, b: 200 };

fn tile_color(tile: Tile) -> CtColor {
    match tile {
        Tile::Start => COL_START,
        Tile::Goal => COL_GOAL,
        Tile::Wall => COL_WALL,
        Tile::Open(NodeState::Unvisited) => COL_EMPTY,
        Tile::Open(NodeState::Frontier) => COL_FRONTIER,
        Tile::Open(NodeState::Visited) => COL_VISITED,
        Tile::Open(NodeState::Path) => COL_PATH,
    }
}

/// Raw-mode alternate screen; restored on drop.
struct Terminal;

impl Terminal {
    fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn draw(vis: &Visualizer, width: u16, height: u16) -> io::Result<()> {
    let mut stdout = io::stdout();
    for y in 0..height.saturating_sub(1) {
        queue!(stdout, cursor::MoveTo(0, y))?;
        for x in 0..width {
            let color = vis.tile_at(x, y).map_or(CtColor::Reset, tile_color);
            queue!(stdout, SetBackgroundColor(color), Print(' '))?;
        }
    }

    let status = format!("{}  [{HELP_TEXT}]", vis.status_line());
    let status: String = status.chars().take(usize::from(width)).collect();
    queue!(
        stdout,
        cursor::MoveTo(0, height.saturating_sub(1)),
        ResetColor,
        terminal::Clear(ClearType::CurrentLine),
        SetForegroundColor(COL_STATUS_FG),
        Print(status),
        ResetColor
    )?;
    stdout.flush()
}

fn run(vis: &mut Visualizer) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let (mut width, mut height) = terminal::size()?;
    let mut last_tick = Instant::now();

    loop {
        let timeout = TICK.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') => vis.toggle_pause(),
                    KeyCode::Char('n') => {
                        vis.step()?;
                    }
                    KeyCode::Char('r') => {
                        vis.restart()?;
                    }
                    KeyCode::Char('o') => vis.scatter_obstacles(&mut rng)?,
                    KeyCode::Tab => {
                        vis.switch_algorithm()?;
                        log::info!("switched to {}", vis.pathfinder().name());
                    }
                    _ => {}
                },
                Event::Mouse(me) => {
                    if let MouseEventKind::Down(btn) = me.kind {
                        let goal = btn == MouseButton::Right;
                        vis.move_endpoint(me.column, me.row, goal)?;
                    }
                }
                Event::Resize(w, h) => {
                    if let Err(e) = vis.resize(w, h, &mut rng) {
                        log::warn!("ignoring resize to {w}x{h}: {e}");
                    } else {
                        (width, height) = (w, h);
                        execute!(io::stdout(), terminal::Clear(ClearType::All))?;
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= TICK {
            vis.tick()?;
            draw(vis, width, height)?;
            last_tick = Instant::now();
        }
    }
}

fn launch() -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = terminal::size()?;
    let mut vis = Visualizer::new(width, height, &mut rand::rng())?;

    let term = Terminal::init()?;
    let result = run(&mut vis);
    drop(term);
    result
}

fn main() {
    if let Err(e) = launch() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
