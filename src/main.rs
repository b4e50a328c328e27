use warren::generators::generate_maze;
use warren::maze::{CircleBoard, RectBoard, Topology};
use warren::render;

/// Route log output to a file so it never interleaves with the rendered
/// grid. The guard must stay alive for the duration of the program.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "warren.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    guard
}

fn read_line(input: &mut String) -> std::io::Result<&str> {
    input.clear();
    std::io::stdin().read_line(input)?;
    Ok(input.trim())
}

/// Parse an optional seed; empty input means non-reproducible generation.
fn read_seed(input: &mut String) -> std::io::Result<Option<u64>> {
    println!("Enter a seed for reproducible generation (leave empty for random):");
    let line = read_line(input)?;
    Ok(line.parse::<u64>().ok())
}

fn run_rect(input: &mut String) -> std::io::Result<()> {
    println!("Enter maze dimensions (width height). Maximum size is 255x255:");
    let dims = read_line(input)?
        .split_whitespace()
        .take(2)
        .filter_map(|s| s.parse::<u8>().ok())
        .collect::<Vec<_>>();
    if dims.len() != 2 {
        eprintln!("Please enter two valid numbers for width and height.");
        return Ok(());
    }
    let (width, height) = (dims[0] as u16, dims[1] as u16);
    if width < 2 || height < 2 {
        eprintln!("Width and height must be at least 2.");
        return Ok(());
    }
    let seed = read_seed(input)?;

    let mut board = RectBoard::new(width, height);
    tracing::info!("[app] generating {width}x{height} rectangular maze (seed: {seed:?})");
    match generate_maze(&mut board, seed) {
        Ok(()) => render::render_rect(&board, &mut std::io::stdout()),
        Err(e) => {
            eprintln!("Maze generation failed: {e}");
            Ok(())
        }
    }
}

fn run_circle(input: &mut String) -> std::io::Result<()> {
    println!("Enter maze radii (radius innerRadius):");
    let radii = read_line(input)?
        .split_whitespace()
        .take(2)
        .filter_map(|s| s.parse::<usize>().ok())
        .collect::<Vec<_>>();
    if radii.len() != 2 {
        eprintln!("Please enter two valid numbers for radius and inner radius.");
        return Ok(());
    }
    let (radius, inner_radius) = (radii[0], radii[1]);
    if inner_radius >= radius {
        eprintln!("The inner radius must be smaller than the radius.");
        return Ok(());
    }
    let seed = read_seed(input)?;

    let mut board = CircleBoard::new(radius, inner_radius);
    tracing::info!(
        "[app] generating circular maze with rings {}..{} (seed: {seed:?})",
        inner_radius,
        radius
    );
    if let Err(e) = generate_maze(&mut board, seed) {
        eprintln!("Maze generation failed: {e}");
        return Ok(());
    }

    // No terminal rendering for polar grids; report the layout instead.
    println!("Generated a circular maze with {} cells:", board.cell_count());
    for ring in board.rings() {
        let count = board.ring_count(ring);
        let open: usize = (0..count)
            .map(|offset| {
                let pos = warren::maze::CirclePos::new(ring, offset);
                board.neighbour_cells(pos, true).len()
            })
            .sum();
        println!("  ring {ring}: {count} cells, {open} open passage ends");
    }
    Ok(())
}

fn main() -> std::io::Result<()> {
    let _guard = init_logging();
    let mut input = String::new();

    println!("Select maze topology:");
    println!("1. Rectangular grid");
    println!("2. Concentric-ring grid");
    let choice = read_line(&mut input)?.to_owned();
    match choice.as_str() {
        "1" => run_rect(&mut input),
        "2" => run_circle(&mut input),
        _ => {
            eprintln!("Invalid selection.");
            Ok(())
        }
    }
}
