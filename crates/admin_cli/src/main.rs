use std::{error::Error, io::Write, path::PathBuf};

use chrono::Utc;
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use engine::{Engine, MoneyCents, ledger::LockPolicy};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "splitledger_admin")]
#[command(about = "Admin utilities for SplitLedger (groups, ledgers, locks)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./splitledger.db?mode=rwc"
    )]
    database_url: String,

    /// Age in days after which expenses lock.
    #[arg(long, default_value_t = engine::ledger::DEFAULT_LOCK_AFTER_DAYS)]
    lock_after_days: i64,

    /// IANA timezone used for calendar-month bounds.
    #[arg(long, default_value = "UTC")]
    timezone: Tz,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Group(Group),
    /// Print the net balance of every member of a group.
    Balances(GroupArgs),
    /// Print the payments that settle a group.
    Plan(GroupArgs),
    /// Fail when the balances of a group do not sum to zero.
    Verify(GroupArgs),
    Locks(Locks),
    /// Write the expenses of a group as CSV.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct Group {
    #[command(subcommand)]
    command: GroupCommand,
}

#[derive(Subcommand, Debug)]
enum GroupCommand {
    Create(GroupCreateArgs),
    Budget(GroupBudgetArgs),
}

#[derive(Args, Debug)]
struct GroupCreateArgs {
    #[arg(long)]
    name: String,
    /// Monthly budget, e.g. `250.00`.
    #[arg(long)]
    budget: Option<MoneyCents>,
}

#[derive(Args, Debug)]
struct GroupBudgetArgs {
    #[arg(long)]
    group: Uuid,
    /// New monthly budget; omit to clear it.
    #[arg(long)]
    limit: Option<MoneyCents>,
}

#[derive(Args, Debug)]
struct GroupArgs {
    #[arg(long)]
    group: Uuid,
}

#[derive(Args, Debug)]
struct Locks {
    #[command(subcommand)]
    command: LocksCommand,
}

#[derive(Subcommand, Debug)]
enum LocksCommand {
    /// Lock every expense older than the threshold.
    Sweep,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(long)]
    group: Uuid,
    /// Output file; stdout when absent.
    #[arg(long)]
    output: Option<PathBuf>,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    if cli.lock_after_days < 0 {
        eprintln!("--lock-after-days must be >= 0");
        std::process::exit(2);
    }

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder()
        .database(db)
        .lock_policy(LockPolicy::after_days(cli.lock_after_days))
        .timezone(cli.timezone)
        .build()
        .await?;
    let now = Utc::now();

    match cli.command {
        Command::Group(Group {
            command: GroupCommand::Create(args),
        }) => {
            let group = engine.new_group(&args.name, args.budget, now).await?;
            println!("created group: {} ({})", group.name, group.id);
        }
        Command::Group(Group {
            command: GroupCommand::Budget(args),
        }) => {
            let group = engine.set_budget_limit(args.group, args.limit).await?;
            match group.budget_limit {
                Some(limit) => println!("budget of {} set to {limit}", group.name),
                None => println!("budget of {} cleared", group.name),
            }
        }
        Command::Balances(args) => {
            let balances = engine.group_balances(args.group, now).await?;
            for entry in balances.iter() {
                println!("{}\t{}", entry.member, entry.balance);
            }
        }
        Command::Plan(args) => {
            let plan = engine.settlement_plan(args.group, now).await?;
            for transfer in &plan.transfers {
                println!("{} -> {}\t{}", transfer.from, transfer.to, transfer.amount);
            }
            if !plan.is_balanced() {
                eprintln!("warning: residual imbalance of {}", plan.residual);
            }
        }
        Command::Verify(args) => match engine.verify_ledger(args.group, now).await {
            Ok(balances) => println!("ledger ok ({} members)", balances.len()),
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        Command::Locks(Locks {
            command: LocksCommand::Sweep,
        }) => {
            let locked = engine.sweep_locks(now).await?;
            println!("locked {locked} expenses");
        }
        Command::Export(args) => {
            let csv = engine.export_expenses_csv(args.group, now).await?;
            match args.output {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    println!("exported to {}", path.display());
                }
                None => std::io::stdout().write_all(&csv)?,
            }
        }
    }

    Ok(())
}
