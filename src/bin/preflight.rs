use skill_ledger::infra::store::open_store;
use skill_ledger::storage::kv::{load_entry, SESSION_KEY};
use skill_ledger::{LedgerConfig, LedgerService, SessionIdentity, StoreBackend};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Reads env vars (all optional, see defaults in infra::config):\n\
           LEDGER_STORE=memory|file|postgres, LEDGER_DATA_DIR, DATABASE_URL,\n\
           VERIFY_DELAY_MS, DIGEST_MODE, BIND_ADDR\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let config = LedgerConfig::from_env()?;

    println!("> Preflight:");
    match &config.backend {
        StoreBackend::Memory => println!("  LEDGER_STORE=memory (nothing survives a restart)"),
        StoreBackend::File { dir } => println!("  LEDGER_STORE=file LEDGER_DATA_DIR={}", dir.display()),
        // Don't echo credentials embedded in the URL.
        StoreBackend::Postgres { .. } => println!("  LEDGER_STORE=postgres"),
    }
    println!("  VERIFY_DELAY_MS={}", config.verify_delay.as_millis());
    println!("  DIGEST_MODE={:?}", config.digest_mode);
    println!("  BIND_ADDR={}", config.bind_addr);

    let kv = open_store(&config.backend).await?;

    // Report a malformed session entry explicitly; the service would silently start anonymous.
    match load_entry::<SessionIdentity>(kv.as_ref(), SESSION_KEY).await? {
        Some(Ok(identity)) => println!("  Persisted session: {} <{}>", identity.name, identity.email),
        Some(Err(e)) => eprintln!("  Warning: session entry is malformed ({}); will start anonymous.", e),
        None => println!("  Persisted session: none (anonymous)"),
    }

    let ledger =
        LedgerService::with_store(kv, config.verify_delay, config.digest_mode).await?;
    let users = ledger.identity().user_count().await?;
    let certificates = ledger.certificates().count().await?;
    println!("  Users: {}", users);
    println!("  Certificates: {}", certificates);

    println!("> Preflight OK.");
    Ok(())
}
