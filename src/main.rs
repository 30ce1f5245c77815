use anyhow::Result;
use clap::{Parser, Subcommand};
use kvtxn::client::config::DEFAULT_ENDPOINT;
use kvtxn::core::error::EXIT_ERROR;
use kvtxn::{ClientConfig, HttpTxnClient, TxnError, check_no_args, collect_txn, submit_txn};
use std::io;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "kvtxn")]
#[command(about = "Build and submit atomic conditional transactions to an etcd v3 store")]
struct Cli {
    /// Store endpoint (host:port or http(s) URL)
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Seconds allowed to establish the connection
    #[arg(long, global = true, default_value_t = 2)]
    dial_timeout: u64,

    /// Seconds allowed for the transaction call
    #[arg(long, global = true, default_value_t = 5)]
    command_timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Txn processes all the requests in one transaction.
    Txn {
        #[arg(hide = true)]
        args: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        let code = err
            .downcast_ref::<TxnError>()
            .map(TxnError::exit_code)
            .unwrap_or(EXIT_ERROR);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = ClientConfig::new(&cli.endpoint)
        .dial_timeout(Duration::from_secs(cli.dial_timeout))
        .command_timeout(Duration::from_secs(cli.command_timeout));

    match cli.command {
        Command::Txn { args } => {
            check_no_args(&args)?;

            // stdin is read to the end before any runtime exists
            let mut stdout = io::stdout().lock();
            let txn = collect_txn(io::stdin().lock(), &mut stdout)?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(submit_txn(txn, &mut stdout, || {
                HttpTxnClient::connect(config)
            }))?;
            Ok(())
        }
    }
}
