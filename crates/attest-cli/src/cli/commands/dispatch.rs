use super::super::args::{Cli, Command};
use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Stats(out) => super::stats::cmd_stats(&cli.cache, out).await,
        Command::Clean(out) => super::clean::cmd_clean(&cli.cache, out).await,
        Command::Clear => super::clear::cmd_clear(&cli.cache).await,
        Command::List(out) => super::list::cmd_list(&cli.cache, out).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
