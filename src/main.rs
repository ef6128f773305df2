use gle_bath::config::{Config, RunConfig};
use gle_bath::output::output_paths;
use gle_bath::{Integrator, Result, XyzEnergyWriter};
use log::{error, info};

fn main() {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {

    // parse command line options
    let config = Config::new()?;

    // read and check the run file
    let setup = RunConfig::load(&config.run_file)?.into_setup()?;
    info!("project {} (seed {}, dt {}, T {})", setup.project_name, setup.seed,
        setup.constants.delta_t, setup.constants.temperature);

    // initialize the simulation before touching any output
    let mut integrator = Integrator::new(setup.constants, setup.bath, setup.particle, setup.seed)?
        .with_progress(config.stdout_step);

    let mut sink = XyzEnergyWriter::create(&setup.working_path, &setup.project_name)?;
    let (coord_path, energy_path) = output_paths(&setup.working_path, &setup.project_name);
    info!("writing {} and {}", coord_path.display(), energy_path.display());

    let summary = integrator.run(&mut sink)?;
    info!("finished {} steps, {} frames, final kinetic energy {}",
        summary.steps, summary.records, summary.final_kinetic_energy);

    Ok(())
}
