use clap::{CommandFactory, FromArgMatches};

use ensemble::common::cli::{CommonOpts, PlanOpts, RootOptions, ScheduleOpts, SubCommand};
use ensemble::common::setup::setup_logging;
use ensemble::config::EnsembleConfig;
use ensemble::plan::{format_plan, format_schedule, plan_task, schedule_requests};

// Commands

fn command_schedule(common: &CommonOpts, opts: ScheduleOpts) -> anyhow::Result<()> {
    let config = EnsembleConfig::load(&opts.config)?;
    let mut scheduler = config.scheduler()?;
    let entries = schedule_requests(&mut scheduler, &opts.requests)?;
    println!("{}", format_schedule(&entries, common.output_mode)?);
    Ok(())
}

fn command_plan(common: &CommonOpts, opts: PlanOpts) -> anyhow::Result<()> {
    let config = EnsembleConfig::load(&opts.config)?;
    let plan = plan_task(&config, &opts)?;
    println!("{}", format_plan(&plan, common.output_mode)?);
    Ok(())
}

fn main() {
    let matches = RootOptions::command().get_matches();
    let top_opts = match RootOptions::from_arg_matches(&matches) {
        Ok(opts) => opts,
        Err(error) => error.exit(),
    };

    setup_logging(top_opts.common.verbose);

    let result = match top_opts.subcmd {
        SubCommand::Schedule(opts) => command_schedule(&top_opts.common, opts),
        SubCommand::Plan(opts) => command_plan(&top_opts.common, opts),
    };

    if let Err(e) = result {
        log::error!("{e:?}");
        std::process::exit(1);
    }
}
