use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use starknet_embedded_wallet::config::Features;
use starknet_embedded_wallet::{
    AddressArgs, Cli, Commands, Config, ContractCall, GlobalArgs, Identity, IdentityArgs,
    IncrementArgs, Session, SessionSnapshot, StarknetAccount, TransactionResult,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Address(args) => show_address(cli.global, args),
        Commands::Status(args) => show_status(cli.global, args).await,
        Commands::Deploy(args) => deploy(cli.global, args).await,
        Commands::Increment(args) => increment(cli.global, args).await,
        Commands::Watch(args) => watch(cli.global, args).await,
    }
}

fn init_logging(level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(level)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Load, validate and report configuration; blocking problems abort
fn load_config(global: GlobalArgs) -> Result<(Config, Features)> {
    let config = Config::load(global)?;
    init_logging(&config.logging.level)?;

    info!("Starting Starknet Embedded Wallet v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.validate() {
        error!("❌ {}", e);
        error!("💡 Set the missing values in the environment or the config file and restart");
        return Err(e.into());
    }

    info!("📊 Configuration loaded:");
    info!("  RPC: {}", config.network.rpc_url.as_deref().unwrap_or_default());
    info!("  Refresh interval: {}s", config.session.refresh_interval_secs);

    let features = config.features();
    Ok((config, features))
}

async fn login(config: &Config, identity: &IdentityArgs) -> Result<Session> {
    let session = Session::connect(config)?;
    session.login(&Identity::new(identity.user_id.clone())).await?;
    Ok(session)
}

fn log_snapshot(snapshot: &SessionSnapshot) {
    if let Some(address) = snapshot.address {
        info!("📍 Address: {:#x}", address);
    }
    info!(
        "🏗️  Deployed: {}",
        if snapshot.is_deployed { "yes" } else { "no" }
    );
    if let Some(balance) = &snapshot.balance {
        info!("💰 ETH: {}  STRK: {}", balance.eth, balance.strk);
        if let Some(reason) = &balance.error {
            warn!("⚠️  Balances unavailable, showing placeholders: {}", reason);
        }
    }
    if let Some(message) = &snapshot.error {
        warn!("⚠️  {}", message);
    }
}

fn report(result: TransactionResult) -> Result<()> {
    match (result.success, result.transaction_hash) {
        (true, Some(hash)) => {
            info!("✅ Transaction hash: {:#x}", hash);
            Ok(())
        }
        _ => {
            let message = result
                .error
                .unwrap_or_else(|| "Transaction failed".to_string());
            error!("❌ {}", message);
            Err(anyhow::anyhow!(message))
        }
    }
}

fn show_address(global: GlobalArgs, args: AddressArgs) -> Result<()> {
    let level = global.log_level.unwrap_or_else(|| "info".to_string());
    init_logging(&level)?;

    let account = StarknetAccount::from_seed(&args.identity.user_id);
    info!("🔑 Public key: {:#x}", account.public_key());
    info!("📍 Address: {:#x}", account.address());

    if args.reveal_key {
        warn!("⚠️  Printing the private key - keep it out of logs and shell history");
        println!("{}", account.key().to_hex());
    }

    Ok(())
}

async fn show_status(global: GlobalArgs, args: IdentityArgs) -> Result<()> {
    let (config, features) = load_config(global)?;
    let session = login(&config, &args).await?;

    log_snapshot(&session.snapshot());
    info!(
        "🧮 Counter contract: {}",
        features
            .counter_contract
            .map(|address| format!("{address:#x}"))
            .unwrap_or_else(|| "not configured".to_string())
    );
    info!(
        "⛽ Gasless transactions: {}",
        if features.gasless { "enabled" } else { "disabled" }
    );

    session.close().await;
    Ok(())
}

async fn deploy(global: GlobalArgs, args: IdentityArgs) -> Result<()> {
    let (config, _) = load_config(global)?;
    let session = login(&config, &args).await?;

    if session.snapshot().is_deployed {
        info!("✅ Account already deployed");
        session.close().await;
        return Ok(());
    }

    let result = session.deploy_account().await;
    log_snapshot(&session.snapshot());
    session.close().await;
    report(result)
}

async fn increment(global: GlobalArgs, args: IncrementArgs) -> Result<()> {
    let (config, features) = load_config(global)?;

    let Some(counter) = features.counter_contract else {
        error!("❌ No counter contract configured (EXPO_PUBLIC_CONTRACT_ADDRESS)");
        return Err(anyhow::anyhow!("Counter contract not configured"));
    };
    if args.gasless && !features.gasless {
        error!("❌ Gasless transactions need EXPO_PUBLIC_AVNU_API_KEY");
        return Err(anyhow::anyhow!("AVNU API key missing"));
    }

    let session = login(&config, &args.identity).await?;
    let calls = vec![ContractCall::increment(counter)];

    let result = if args.gasless {
        session.execute_gasless_transaction(&calls).await
    } else {
        if !session.snapshot().is_deployed {
            warn!("⚠️  Account is not deployed yet; run `deploy` or use --gasless");
        }
        session.execute_transaction(&calls).await
    };

    log_snapshot(&session.snapshot());
    session.close().await;
    report(result)
}

async fn watch(global: GlobalArgs, args: IdentityArgs) -> Result<()> {
    let (config, _) = load_config(global)?;
    let session = login(&config, &args).await?;
    let mut updates = session.handle().subscribe();

    log_snapshot(&updates.borrow_and_update());
    info!("👀 Watching balances, press Ctrl-C to stop");

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if let Some(balance) = &snapshot.balance {
                    info!(
                        "💰 ETH: {}  STRK: {}  ({})",
                        balance.eth,
                        balance.strk,
                        balance.fetched_at.format("%H:%M:%S")
                    );
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("🛑 Interrupted");
                break;
            }
        }
    }

    session.close().await;
    Ok(())
}
