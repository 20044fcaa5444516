mod commands;
mod terminal;

use commands::{CommandLine, Commands, cura, info, prusa};
use terminal::{logging, print};

fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();

    logging::init(cli.quiet);
    print::banner(cli.no_banner, cli.quiet);

    match cli.command {
        Commands::Info => {
            print::header("about the tool", cli.quiet);
            info::info();
            Ok(())
        }
        Commands::Cura(ref args) => cura::run(args, &cli),
        Commands::Prusa(ref args) => prusa::run(args, &cli),
    }
}
