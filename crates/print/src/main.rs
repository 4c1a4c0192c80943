use clap::Parser;

use revline_print::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    revline_observability::init();

    let path = run(Cli::parse()).await?;
    println!("{}", path.display());
    Ok(())
}
