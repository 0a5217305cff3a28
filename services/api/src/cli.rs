use crate::report::{
    run_assessment_report, run_framework_show, AssessmentReportArgs, FrameworkShowArgs,
};
use crate::server;
use capability_maturity::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Capability Maturity Assessment",
    about = "Score IT capability maturity and serve assessments over HTTP",
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
    /// Work with assessment score exports
    Assessment {
        #[command(subcommand)]
        command: AssessmentCommand,
    },
    /// Inspect the process taxonomy
    Framework {
        #[command(subcommand)]
        command: FrameworkCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AssessmentCommand {
    /// Roll a CSV score export up into category, domain, and global scores
    Report(AssessmentReportArgs),
}

#[derive(Subcommand, Debug)]
enum FrameworkCommand {
    /// Print the domains, categories, and processes of the taxonomy
    Show(FrameworkShowArgs),
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
        Command::Assessment {
            command: AssessmentCommand::Report(args),
        } => run_assessment_report(args),
        Command::Framework {
            command: FrameworkCommand::Show(args),
        } => run_framework_show(args),
    }
}
