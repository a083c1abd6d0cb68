// TraceTTY: trace playback TUI with animated data structure visualization

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use tracetty::client::{self, TracerClient};
use tracetty::trace::TraceResponse;
use tracetty::ui::App;

/// Replay a program execution trace in the terminal.
#[derive(Debug, Parser)]
#[command(name = "tracetty", version, about)]
struct Cli {
    /// Path to a saved tracer response (JSON)
    trace_file: Option<PathBuf>,

    /// Base URL of a tracer service; runs --program remotely
    #[arg(long, conflicts_with = "trace_file", requires = "program")]
    tracer: Option<String>,

    /// Program source file to submit to the tracer service
    #[arg(long, requires = "tracer")]
    program: Option<PathBuf>,

    /// Auto-play step interval in milliseconds
    #[arg(long, default_value_t = 800)]
    speed: u64,

    /// Write structured logs to this file (stderr belongs to the TUI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = fs::File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("tracetty=debug")),
            )
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let response = load_response(&cli)?;

    // A failed run with no trace has nothing to replay; surface the
    // tracer-captured stderr and stop.
    if response.trace.is_empty() && !response.stderr.trim().is_empty() {
        eprintln!("Traced program failed:");
        eprintln!("{}", response.stderr);
        std::process::exit(1);
    }

    eprintln!("Loaded {} trace step(s).", response.trace.len());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(response, Duration::from_millis(cli.speed.max(1)));
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Obtain the tracer response from whichever source the CLI selected.
fn load_response(cli: &Cli) -> Result<TraceResponse, Box<dyn std::error::Error>> {
    match (&cli.trace_file, &cli.tracer, &cli.program) {
        (Some(path), _, _) => {
            eprintln!("Reading trace from {}...", path.display());
            Ok(client::read_trace_file(path)?)
        }
        (None, Some(base), Some(program)) => {
            let source = fs::read_to_string(program)?;
            eprintln!("Tracing {} via {}...", program.display(), base);
            Ok(TracerClient::new(base)?.run(&source)?)
        }
        _ => {
            eprintln!("Error: no trace source provided");
            eprintln!();
            eprintln!("Usage: tracetty <trace.json>");
            eprintln!("       tracetty --tracer http://localhost:8000 --program script.py");
            std::process::exit(2);
        }
    }
}
