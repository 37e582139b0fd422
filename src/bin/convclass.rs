use convclass::app::run_cli;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "convclass=info".into()),
        )
        .init();
}

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run_cli(args) {
        Ok(outcome) => {
            if let Some(summary) = outcome.stderr {
                eprintln!("{summary}");
            }
            println!("{}", outcome.stdout);
            std::process::exit(outcome.exit_code);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    }
}
