use crossterm::style::Stylize;
use slider_astar::{config::AppConfig, Board, Solver};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::new(config.log_level.clone()))
        .with(fmt::layer())
        .init();

    tracing::info!(
        dimension = config.dimension,
        visited_set = config.visited_set,
        "Solving random board"
    );

    let board = Board::random(config.dimension)?;
    println!("{}\n{}", "Shuffled Puzzle:".bold(), board);

    let solver = Solver::with_options(board, config.search_options());
    if !solver.is_solvable() {
        println!("{} after {} rounds", "Unsolvable".red(), solver.rounds());
        return Ok(());
    }
    println!("{}", "Solvable".green());
    println!("Found optimal solution with: {} moves", solver.moves());

    println!("{}", solver.initial());
    for (slide, board) in solver.slides().into_iter().zip(&solver.solution()[1..]) {
        println!("{}\n{}", slide.to_string().cyan(), board);
    }

    Ok(())
}
