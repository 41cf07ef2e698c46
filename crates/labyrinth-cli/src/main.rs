//! Labyrinth command line
//!
//! Generate a maze, auto-play a solver over it and print the result.
//!
//! ```text
//! labyrinth [rows] [cols] [generator] [solver-id]
//! ```
//!
//! `LABYRINTH_CONFIG` may point at a JSON session configuration; command
//! line arguments override it.

use std::env;
use std::fs;

use labyrinth_grid::{CellId, RectMaze};
use labyrinth_session::{AutoPlay, MazeSession, SessionConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labyrinth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match env::var("LABYRINTH_CONFIG") {
        Ok(path) => {
            tracing::info!(%path, "loading session config");
            SessionConfig::from_json_str(&fs::read_to_string(&path)?)?
        }
        Err(_) => SessionConfig::default(),
    };

    let args: Vec<String> = env::args().collect();

    if let Some(rows) = args.get(1).and_then(|s| s.parse().ok()) {
        config.rows = rows;
    }
    if let Some(cols) = args.get(2).and_then(|s| s.parse().ok()) {
        config.cols = cols;
    }
    if let Some(generator) = args.get(3) {
        config.generator = generator.clone();
    }
    if let Some(solver_id) = args.get(4).and_then(|s| s.parse().ok()) {
        config.solver_id = solver_id;
    }

    let mut session = MazeSession::new(config)?;

    println!("Labyrinth");
    println!("=========");
    println!();
    println!(
        "Generating a {}x{} maze with {}...",
        session.rows(),
        session.cols(),
        session.generator()
    );
    session.generate_maze()?;

    println!(
        "Solving from {} to {} with {}...",
        session.start(),
        session.end(),
        session.solver_name()
    );
    let mut play = AutoPlay::for_session(&session);
    let steps = play.run(&mut session).await?;

    println!();
    if let Some(maze) = session.maze() {
        print!("{}", render(maze, &session));
    }
    println!();
    println!("Playback complete:");
    println!("  Steps: {}", steps);
    println!("  Path length: {}", session.solution().len());

    Ok(())
}

/// ASCII drawing of the maze. `S`/`E` mark the endpoints, `*` the path and
/// `.` every other cell the solver touched.
fn render(maze: &RectMaze, session: &MazeSession) -> String {
    let (rows, cols) = (maze.rows(), maze.cols());
    let open = |a: CellId, b: CellId| {
        maze.find(a.as_str())
            .is_some_and(|cell| cell.neighbors.contains(&b))
    };

    let mut out = String::new();
    for row in 0..rows {
        out.push('+');
        for col in 0..cols {
            let up = row > 0 && open(CellId::rect(row, col), CellId::rect(row - 1, col));
            out.push_str(if up { "   +" } else { "---+" });
        }
        out.push('\n');

        out.push('|');
        for col in 0..cols {
            let id = CellId::rect(row, col);
            out.push(' ');
            out.push(mark(session, &id));
            out.push(' ');

            let right = col + 1 < cols && open(id, CellId::rect(row, col + 1));
            out.push(if right { ' ' } else { '|' });
        }
        out.push('\n');
    }

    out.push('+');
    for _ in 0..cols {
        out.push_str("---+");
    }
    out.push('\n');
    out
}

fn mark(session: &MazeSession, id: &CellId) -> char {
    if id == session.start() {
        'S'
    } else if id == session.end() {
        'E'
    } else if session.solution().contains(id) {
        '*'
    } else if session.cell_state(id.as_str()).is_some() {
        '.'
    } else {
        ' '
    }
}
