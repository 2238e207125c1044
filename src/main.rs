use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::error;

use megi_client::HttpSubmissionClient;
use megi_core::draft::DraftStore;
use megi_core::WizardStep;
use megi_flows::FlowKind;
use megilance_wizard::{open_store, read_answers, run_flow, AppError, CONFIG};

#[derive(Parser, Debug)]
#[command(name = "megilance-wizard", version, about = "Multi-step wizards for MegiLance")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List known flows.
    Flows,
    /// Show the steps of a flow.
    Steps {
        #[arg(long)]
        flow: FlowKind,
    },
    /// Inspect or discard a saved draft.
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
    /// Fill a wizard from an answers file and submit it.
    Run {
        #[arg(long)]
        flow: FlowKind,
        /// Job or contract id for per-instance flows.
        #[arg(long)]
        instance: Option<String>,
        /// JSON object, or list of objects (one per step).
        #[arg(long)]
        answers: PathBuf,
        /// Validate every step without submitting.
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand, Debug)]
enum DraftAction {
    Show {
        #[arg(long)]
        flow: FlowKind,
        #[arg(long)]
        instance: Option<String>,
    },
    Clear {
        #[arg(long)]
        flow: FlowKind,
        #[arg(long)]
        instance: Option<String>,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| AppError::Config(format!("json: {e}")))?;
    println!("{text}");
    Ok(())
}

async fn execute(command: Command) -> Result<i32, AppError> {
    match command {
        Command::Flows => {
            for kind in FlowKind::ALL {
                let def = kind.definition()?;
                println!("{:<12} {:<12} /{:<10} {}",
                         kind.as_str(),
                         format!("{:?}", kind.scope()).to_lowercase(),
                         kind.endpoint(),
                         def.step_ids().join(" -> "));
            }
            Ok(0)
        }
        Command::Steps { flow } => {
            let def = flow.definition()?;
            for (index, step) in def.steps().iter().enumerate() {
                println!("{index} {:<14} {}", step.id(), step.title());
            }
            Ok(0)
        }
        Command::Draft { action } => {
            let mut store = open_store(&CONFIG.drafts)?;
            match action {
                DraftAction::Show { flow, instance } => {
                    let key = flow.draft_key(instance.as_deref())?;
                    match store.load(&key)? {
                        Some(draft) => print_json(&draft)?,
                        None => println!("no draft for {key}"),
                    }
                }
                DraftAction::Clear { flow, instance } => {
                    let key = flow.draft_key(instance.as_deref())?;
                    store.clear(&key)?;
                    println!("cleared {key}");
                }
            }
            Ok(0)
        }
        Command::Run { flow, instance, answers, dry_run } => {
            let answers = read_answers(&answers)?;
            let store = open_store(&CONFIG.drafts)?;
            let client = if dry_run {
                None
            } else {
                let cfg = CONFIG.api
                                .as_ref()
                                .ok_or_else(|| AppError::Config("MEGILANCE_API_URL no definido (use --dry-run)".into()))?;
                Some(HttpSubmissionClient::new(cfg, flow.endpoint())?)
            };
            let client_ref = client.as_ref().map(|c| c as &dyn megi_core::SubmissionClient);
            let report = run_flow(flow, instance.as_deref(), answers, store, client_ref).await?;
            print_json(&report)?;
            Ok(report.exit_code())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match execute(cli.command).await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            error!("{e}");
            eprintln!("[megilance-wizard] {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
