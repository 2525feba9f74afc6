use super::handlers;
use super::setup::{parse_cli, Commands};
use hashpadapp::init::initialize;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "HASHPAD_LOG";

pub fn run() -> anyhow::Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose);

    // Naked `hashpad` reloads the current document.
    let command = cli.command.unwrap_or(Commands::Show { style: false });
    tracing::debug!("running {:?}", command);

    match command {
        // Stateless: never open the data directory.
        Commands::Encode {
            file,
            style,
            id,
            new_id,
        } => handlers::encode(file.as_deref(), style, id, new_id),
        Commands::Decode { address, json } => handlers::decode(&address, json),

        Commands::New => handlers::new(&mut initialize()?),
        Commands::Write { file, style } => {
            handlers::write(&mut initialize()?, file.as_deref(), style)
        }
        Commands::Show { style } => handlers::show(&mut initialize()?, style),
        Commands::Open { address } => handlers::open(&mut initialize()?, &address),
        Commands::Title => handlers::title(&mut initialize()?),
        Commands::Export { dir } => handlers::export(&mut initialize()?, dir),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
