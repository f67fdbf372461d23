use crate::commands::{
    run_audit_clear, run_audit_list, run_evaluate, run_policy_show, run_submit, AuditClearArgs,
    EvaluateArgs, SubmitArgs,
};
use crate::server;
use admission_screening::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Admission Screening",
    about = "Screen candidate applications and manage the admission audit log",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate an application record without submitting it
    Evaluate(EvaluateArgs),
    /// Evaluate and, if admissible, record an application in the audit log
    Submit(SubmitArgs),
    /// Inspect or clear the audit log
    Audit {
        #[command(subcommand)]
        command: AuditCommand,
    },
    /// Inspect screening policy thresholds
    Policy {
        #[command(subcommand)]
        command: PolicyCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AuditCommand {
    /// List recorded submissions, newest first
    List,
    /// Remove every recorded submission
    Clear(AuditClearArgs),
}

#[derive(Subcommand, Debug)]
enum PolicyCommand {
    /// Print the thresholds loaded from the environment
    Show,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Submit(args) => run_submit(args),
        Command::Audit {
            command: AuditCommand::List,
        } => run_audit_list(),
        Command::Audit {
            command: AuditCommand::Clear(args),
        } => run_audit_clear(args),
        Command::Policy {
            command: PolicyCommand::Show,
        } => run_policy_show(),
    }
}
