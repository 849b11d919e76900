use clap::{Args, Parser, Subcommand};
use intake_ai::config::AppConfig;
use tracing::info;

use crate::demo::{run_demo, DemoArgs};
use crate::error::AppError;
use crate::infra;
use crate::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Intake Workflow CLI",
    about = "Drive the financial-assistance intake workflow from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an end-to-end demo of the intake flow (default command)
    Demo(DemoArgs),
    /// Inspect and manage locally stored submissions
    Submissions {
        #[command(subcommand)]
        command: SubmissionsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SubmissionsCommand {
    /// List stored submissions as table rows
    List,
    /// Print one submission as JSON
    Show(IdArgs),
    /// Delete a submission
    Remove(IdArgs),
}

#[derive(Args, Debug)]
struct IdArgs {
    /// Submission id
    id: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli.command.unwrap_or(Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, &config).await,
        Command::Submissions { command } => run_submissions(command, &config),
    }
}

fn run_submissions(command: SubmissionsCommand, config: &AppConfig) -> Result<(), AppError> {
    use intake_ai::workflows::intake::SubmissionStore;

    let infra = infra::build(config);

    match command {
        SubmissionsCommand::List => {
            let submissions = infra.submissions.list()?;
            if submissions.is_empty() {
                println!("no submissions stored at {}", infra.kv.path().display());
                return Ok(());
            }
            for submission in &submissions {
                let row = submission.to_row();
                println!(
                    "{}  {}  {}  {}  {}",
                    row.id_tail, row.submitted_at_fmt, row.name, row.email, row.reason_short
                );
            }
            info!(count = submissions.len(), "listed submissions");
        }
        SubmissionsCommand::Show(args) => match infra.submissions.get(&args.id)? {
            Some(submission) => {
                let rendered = serde_json::to_string_pretty(&submission)
                    .unwrap_or_else(|_| format!("{submission:?}"));
                println!("{rendered}");
            }
            None => println!("no submission with id {}", args.id),
        },
        SubmissionsCommand::Remove(args) => {
            infra.submissions.remove(&args.id)?;
            println!("removed {}", args.id);
        }
    }

    Ok(())
}
