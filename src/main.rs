use std::path::PathBuf;

use clap::Parser;

use pagewatch::config;

#[derive(Parser)]
#[command(
    name = "pagewatch",
    about = "Live-reloading pager: re-runs a render command when a file changes"
)]
struct Cli {
    /// File to watch for changes
    file: PathBuf,

    /// Render command and its arguments (invoked on every change)
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "RENDER_PROG"
    )]
    render_command: Vec<String>,

    /// Log output file path (enables logging when specified)
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_path) = &cli.log {
        let file = std::fs::File::create(log_path).expect("failed to open log file");
        env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
    // no --log → logger not initialized; stderr output would garble the display

    let cfg = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };
    let config = cfg.resolve();

    // required = true guarantees at least the program name is present
    let (program, args) = cli
        .render_command
        .split_first()
        .expect("clap enforces a render command");

    let result = pagewatch::viewer::run(&cli.file, program, args, &config);

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
