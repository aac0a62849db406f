use crate::demo::{
    run_demo, run_forecast, run_plan, run_valuation, DemoArgs, ForecastArgs, PlanArgs,
    ValuationArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use finnvesta::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "FinnVesta",
    about = "Value public buildings and plan long-term renovation investments (PTS)",
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
    /// Value a single building at a reference year
    Valuation(ValuationArgs),
    /// Forecast the condition of a single building and its renovation year
    Forecast(ForecastArgs),
    /// Generate a PTS plan from a building register CSV
    Plan(PlanArgs),
    /// Run valuation, overview and planning over a built-in sample portfolio
    Demo(DemoArgs),
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
        Command::Valuation(args) => run_valuation(args),
        Command::Forecast(args) => run_forecast(args),
        Command::Plan(args) => run_plan(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plan_command_with_overrides() {
        let cli = Cli::try_parse_from([
            "finnvesta-api",
            "plan",
            "--register",
            "rakennukset.csv",
            "--horizon",
            "20",
            "--trigger-threshold",
            "0.55",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Plan(args)) => {
                assert_eq!(args.register.to_str(), Some("rakennukset.csv"));
                assert_eq!(args.planning.planning_horizon_years, Some(20));
                assert_eq!(args.planning.trigger_threshold, Some(0.55));
                assert_eq!(args.planning.reference_year, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["finnvesta-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }

    #[test]
    fn valuation_requires_building_attributes() {
        let result = Cli::try_parse_from(["finnvesta-api", "valuation", "--area-m2", "1500"]);
        assert!(result.is_err());
    }
}
