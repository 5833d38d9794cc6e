use dotenv::dotenv;
use frostpath::infra::{
    CompositeReport, ConsoleReport, CsvReport, FrozenLake, FrozenLakeConfig, Simulator,
    StudyConfig, StudyKind,
};
use frostpath::planners::{
    DirectionTable, ExperimentRunner, FixedSequence, Greedy, RngSource, TableDriven, alpha_steps,
};
use frostpath::state::Grid;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("frostpath=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging()?;

    let config = StudyConfig::from_env()?;
    tracing::info!(
        "Map {}, {} episodes per study, step cap {}, slippery: {}",
        config.map_rows.join("/"),
        config.episodes,
        config.max_episode_steps,
        config.slippery
    );

    let layout = Grid::from_layout(config.map_rows.as_slice())?;
    let mut lake = FrozenLake::new(
        layout.clone(),
        FrozenLakeConfig {
            slippery: config.slippery,
            seed: config.seed,
        },
    );

    // The policies only ever see what the simulator renders.
    lake.reset()?;
    let grid = Grid::parse(&lake.render()?, layout.shape())?;
    // Greedy and manual studies still run on layouts the rule cannot route.
    let table = if config.study.needs_table() {
        Some(DirectionTable::build(&grid)?)
    } else {
        None
    };

    let mut sink = CompositeReport::new(vec![Box::new(ConsoleReport::stdout())]);
    if let Some(dir) = &config.report_dir {
        let csv = CsvReport::new(dir)?;
        tracing::info!("Writing CSV reports to {}", csv.outcomes_path().display());
        sink.push(Box::new(csv));
    }

    let mut runner = ExperimentRunner::new(lake, config.max_episode_steps);

    if config.study.includes(StudyKind::Manual) {
        let mut manual = FixedSequence::new(config.manual_path.clone());
        runner.run_study(&mut manual, config.episodes, &mut sink);
    }

    if config.study.includes(StudyKind::Greedy) {
        runner.run_study(&mut Greedy::new(&grid), config.episodes, &mut sink);
    }

    if let (true, Some(table)) = (config.study.includes(StudyKind::Table), &table) {
        tracing::info!("Minimal-direction table:");
        for line in table.to_string().lines() {
            tracing::info!("  {}", line);
        }
        runner.run_study(&mut TableDriven::new(table), config.episodes, &mut sink);
    }

    if let (true, Some(table)) = (config.study.includes(StudyKind::Blended), &table) {
        // Offset so blend draws don't replay the lake's slip draws.
        let mut random = RngSource::from_seed(config.seed.map(|seed| seed.wrapping_add(1)));
        let sweep = runner.run_alpha_sweep(
            &grid,
            table,
            &alpha_steps(config.alpha_steps),
            config.episodes,
            &mut random,
            &mut sink,
        );
        tracing::info!(
            "Sweep over {} alphas: mean {:.2}%, std {:.2}",
            sweep.points.len(),
            sweep.statistics.mean,
            sweep.statistics.std_dev
        );
    }

    Ok(())
}
