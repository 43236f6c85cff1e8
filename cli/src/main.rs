mod commands;
mod terminal;

use commands::{CommandLine, Commands, info, scan, verify};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose, commands.quiet)?;
    let cfg = commands.config();
    print::banner(cfg.quiet);

    match commands.command {
        Commands::Info => {
            print::header("about the tool", cfg.quiet);
            info::info(&cfg);
            Ok(())
        }
        Commands::Scan { source, again, .. } => {
            print::header("starting scanner", cfg.quiet);
            scan::scan(source, again, &cfg).await
        }
        Commands::Verify { identifier } => {
            print::header("manual verification", cfg.quiet);
            verify::verify(&identifier, &cfg).await
        }
    }
}
