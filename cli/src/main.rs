mod commands;
mod terminal;

use commands::{CommandLine, Commands, demo, reserve, schema};
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.config();

    logging::init_logging(cfg.quiet);
    print::banner(cfg.no_banner, cfg.quiet);

    let result = match commands.command {
        Commands::Demo => {
            print::header("opening the sample cinema", cfg.quiet);
            demo::demo(&cfg)
        }
        Commands::Schema => {
            print::header("association schema", cfg.quiet);
            schema::schema(&cfg)
        }
        Commands::Reserve {
            client,
            projection,
            seats,
        } => {
            print::header("booking seats", cfg.quiet);
            reserve::reserve(&client, projection, &seats, &cfg)
        }
    };

    print::rule();
    result
}
