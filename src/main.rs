use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nomgenesis::genesis::{
    BulkImportInputs, GenerationMode, NetworkPreset, Snapshot, SnapshotAssembler, StandardInputs,
};
use nomgenesis::identity::Address;
use nomgenesis::input::{
    read_registrations, validate_balance_grants, validate_flag_overrides, validate_fusion_grants,
};
use nomgenesis::storage::{ProducerKey, SnapshotStore};
use nomgenesis::{GeneratorConfig, GenesisError};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Genesis generator for Network of Momentum devnets and test networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "nomgenesis")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the genesis of a single-node development network
    GenerateDevnet(DevnetArgs),

    /// Generate the hyperqube test network genesis from a registration export
    GenerateHyperqube(HyperqubeArgs),

    /// Re-verify the invariants of an existing genesis document
    Check {
        /// Genesis document to check
        #[arg(long)]
        genesis: PathBuf,
    },

    /// Check that a string is a valid user address
    ValidateAddress {
        address: String,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Genesis output path (default: <data>/genesis.json)
    #[arg(long)]
    genesis: Option<PathBuf>,

    /// Data directory for generated files
    #[arg(long, default_value = "devnet")]
    data: PathBuf,

    /// Fixed genesis timestamp in unix seconds (default: now)
    #[arg(long)]
    timestamp: Option<i64>,

    /// Overwrite an existing genesis document
    #[arg(long)]
    force: bool,

    /// Write compact instead of indented JSON
    #[arg(long)]
    compact: bool,
}

impl OutputArgs {
    fn to_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new()
            .with_data_dir(&self.data)
            .with_overwrite(self.force)
            .with_pretty(!self.compact);
        if let Some(path) = &self.genesis {
            config = config.with_genesis_path(path);
        }
        if let Some(timestamp) = self.timestamp {
            config = config.with_timestamp(timestamp);
        }
        config
    }
}

#[derive(Args, Debug)]
struct DevnetArgs {
    /// Use the hyperqube token names and feature flags
    #[arg(long)]
    hyperqube: bool,

    /// Operator address; a producer key is generated when omitted
    #[arg(long)]
    operator: Option<String>,

    /// Feature flag authority (default: the operator)
    #[arg(long)]
    spork_address: Option<String>,

    /// Balance grant <address>/<amountA>/<amountB>, repeatable
    #[arg(long = "genesis-block")]
    genesis_blocks: Vec<String>,

    /// Fusion grant <address>/<amount>, repeatable
    #[arg(long = "genesis-fusion")]
    genesis_fusions: Vec<String>,

    /// Feature flag override <id>,<true|false>, repeatable
    #[arg(long = "genesis-spork")]
    genesis_sporks: Vec<String>,

    /// Fund the operator and fuse plasma for it
    #[arg(long)]
    ez: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct HyperqubeArgs {
    /// Registration CSV export
    #[arg(long)]
    registrations: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::GenerateDevnet(args) => generate_devnet(args)?,
        Command::GenerateHyperqube(args) => generate_hyperqube(args)?,
        Command::Check { genesis } => check(genesis)?,
        Command::ValidateAddress { address } => validate_address(&address)?,
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn generate_devnet(args: DevnetArgs) -> Result<(), GenesisError> {
    // every flag is validated before anything is written or built
    let balance_grants = validate_balance_grants(&args.genesis_blocks)?;
    let fusion_grants = validate_fusion_grants(&args.genesis_fusions)?;
    let flag_overrides = validate_flag_overrides(&args.genesis_sporks)?;
    let operator = args.operator.as_deref().map(Address::parse_user).transpose()?;
    let spork_address = args.spork_address.as_deref().map(Address::parse).transpose()?;

    let preset = if args.hyperqube {
        NetworkPreset::hyperqube_devnet()
    } else {
        NetworkPreset::devnet()
    };
    preset.check_flag_overrides(&flag_overrides)?;

    let store = SnapshotStore::new(args.output.to_config())?;
    // a generated key is only saved once the snapshot has been assembled
    let (operator, producer) = match operator {
        Some(address) => (address, None),
        None => {
            let producer = store.load_or_generate_producer_key()?;
            (producer.address(), Some(producer))
        }
    };

    let mut inputs = StandardInputs::new(preset, operator)
        .with_convenience(args.ez)
        .with_balance_grants(balance_grants)
        .with_fusion_grants(fusion_grants)
        .with_flag_overrides(flag_overrides);
    if let Some(authority) = spork_address {
        inputs = inputs.with_flag_authority(authority);
    }

    write_snapshot(&store, &GenerationMode::Standard(inputs), producer.as_ref())
}

fn generate_hyperqube(args: HyperqubeArgs) -> Result<(), GenesisError> {
    let registrations = read_registrations(&args.registrations)?;
    let store = SnapshotStore::new(args.output.to_config())?;
    write_snapshot(
        &store,
        &GenerationMode::BulkImport(BulkImportInputs::new(registrations)),
        None,
    )
}

fn write_snapshot(
    store: &SnapshotStore,
    mode: &GenerationMode,
    producer: Option<&ProducerKey>,
) -> Result<(), GenesisError> {
    let snapshot = SnapshotAssembler::assemble(mode, store.config().resolve_timestamp())?;
    let path = match producer {
        Some(producer) => store.write_with_producer_key(&snapshot, producer)?,
        None => store.write(&snapshot)?,
    };
    print_summary(&snapshot);
    println!("Genesis written to {}", path.display());
    Ok(())
}

fn check(path: PathBuf) -> Result<()> {
    let snapshot = SnapshotStore::read(&path)
        .with_context(|| format!("loading {}", path.display()))?;
    snapshot
        .verify()
        .with_context(|| format!("{} failed verification", path.display()))?;
    info!(path = %path.display(), "genesis document is consistent");
    print_summary(&snapshot);
    Ok(())
}

fn validate_address(input: &str) -> Result<()> {
    let address = Address::parse(input)?;
    if address.is_embedded() {
        println!("{} is an embedded contract address", address);
    } else {
        println!("{} is a valid user address", address);
    }
    Ok(())
}

fn print_summary(snapshot: &Snapshot) {
    println!("Chain identifier: {}", snapshot.chain_identifier);
    println!("Extra data:       {}", snapshot.extra_data);
    println!("Spork address:    {}", snapshot.spork_address);
    for token in snapshot.tokens() {
        println!(
            "Token {} ({}): total supply {}",
            token.token_symbol, token.token_standard, token.total_supply
        );
    }
    println!("Delegates: {}", snapshot.delegates().len());
    println!("Fusions:   {}", snapshot.fusions().len());
    println!("Balances:  {}", snapshot.balances().len());
}
