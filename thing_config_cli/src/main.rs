use clap::Parser;
use thing_config_cli::{cmds::Cli, Msg};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match cli.run().await {
        Ok(msg) => println!("{msg}"),
        Err(err) => {
            eprintln!("{}", Msg::Error(format!("{err:#}")));
            std::process::exit(1);
        }
    }
}
