use clap::{Arg, App, ArgMatches};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, SimError};
use crate::particle::Particle;
use crate::state::Constants;
use crate::vec3::Vec3;

/// Command line options.
pub struct Config {
    pub run_file: PathBuf,
    pub stdout_step: Option<usize>,
}

impl Config {

    // initialize configuration from command line arguments
    pub fn new() -> Result<Config> {
        Config::from_matches(&Config::app().get_matches())
    }

    pub fn from_args<I, T>(args: I) -> Result<Config>
        where I: IntoIterator<Item = T>, T: Into<OsString> + Clone {
        let matches = Config::app()
            .get_matches_from_safe(args)
            .map_err(|e| SimError::Config(e.to_string()))?;
        Config::from_matches(&matches)
    }

    fn app() -> App<'static, 'static> {
        App::new("Generalized Langevin bath simulation")
            .version(env!("CARGO_PKG_VERSION"))
            .author("Ian Graham <irgraham1@gmail.com>")
            .about("Integrates a particle harmonically coupled to a bath coordinate that follows a generalized Langevin equation. Writes an xyz trajectory and a kinetic energy log.")
            .arg(Arg::with_name("CONFIG")
                .help("TOML run file with [constants], [bath], [particle] and [meta_data] tables")
                .required(true)
                .index(1))
            .arg(Arg::with_name("IO")
                .short("i")
                .long("iostep")
                .help("Number of steps between progress messages")
                .takes_value(true))
    }

    fn from_matches(matches: &ArgMatches) -> Result<Config> {
        let run_file = matches.value_of("CONFIG")
            .map(PathBuf::from)
            .ok_or_else(|| SimError::Config(String::from("missing run file argument")))?;
        let stdout_step = Config::conv_match::<usize>(matches, "IO")?;
        Ok(Config{run_file: run_file, stdout_step: stdout_step})
    }

    // convert matches to corresponding generic types
    fn conv_match<T>(matches: &ArgMatches, tag: &str) -> Result<Option<T>>
        where T: FromStr, <T as FromStr>::Err: std::fmt::Display {
        match matches.value_of(tag) {
            None => Ok(None),
            Some(raw) => T::from_str(raw)
                .map(Some)
                .map_err(|e| SimError::Config(format!("bad value {:?} for {}: {}", raw, tag, e))),
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantsConfig {
    pub friction_coefficient: f64,
    pub coupling_coefficient: f64,
    #[serde(rename = "K_b")]
    pub k_b: f64,
    pub equilibrium_length: f64,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub mass: f64,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaConfig {
    pub project_name: String,
    pub working_path: String,
    pub random_seed: u64,
    pub step_num: usize,
    pub save_step_num: usize,
    pub temperature: f64,
    pub delta_t: f64,
}

/// Run file as written on disk.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub constants: ConstantsConfig,
    pub bath: BodyConfig,
    pub particle: BodyConfig,
    pub meta_data: MetaConfig,
}

/// Checked inputs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSetup {
    pub constants: Constants,
    pub bath: Particle,
    pub particle: Particle,
    pub seed: u64,
    pub project_name: String,
    pub working_path: PathBuf,
}

impl RunConfig {

    pub fn load(path: &Path) -> Result<RunConfig> {
        // confy would silently write a default file instead
        if !path.is_file() {
            return Err(SimError::Config(format!("run file {} does not exist", path.display())));
        }
        let config: RunConfig = confy::load_path(path)?;
        Ok(config)
    }

    pub fn into_setup(self) -> Result<RunSetup> {
        let meta = self.meta_data;
        let constants = Constants{
            friction_coefficient: self.constants.friction_coefficient,
            coupling_coefficient: self.constants.coupling_coefficient,
            k_b: self.constants.k_b,
            equilibrium_length: self.constants.equilibrium_length,
            temperature: meta.temperature,
            delta_t: meta.delta_t,
            step_num: meta.step_num,
            save_step_num: meta.save_step_num,
        };
        constants.validate()?;

        if meta.project_name.trim().is_empty() {
            return Err(SimError::Config(String::from("project_name must not be empty")));
        }

        let bath = self.bath.into_particle("bath")?;
        let particle = self.particle.into_particle("particle")?;

        Ok(RunSetup{
            constants: constants,
            bath: bath,
            particle: particle,
            seed: meta.random_seed,
            project_name: meta.project_name,
            working_path: PathBuf::from(meta.working_path),
        })
    }
}

impl BodyConfig {

    fn into_particle(self, name: &str) -> Result<Particle> {
        Particle::at_rest(Vec3::new(self.x, self.y, self.z), self.mass)
            .map_err(|e| match e {
                SimError::Config(msg) => SimError::Config(format!("[{}] {}", name, msg)),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_config() -> RunConfig {
        RunConfig{
            constants: ConstantsConfig{friction_coefficient: 0.1, coupling_coefficient: 1.0, k_b: 1.0, equilibrium_length: 1.0},
            bath: BodyConfig{x: 0.0, y: 0.0, z: 0.0, mass: 1.0},
            particle: BodyConfig{x: 1.0, y: 0.0, z: 0.0, mass: 2.0},
            meta_data: MetaConfig{
                project_name: String::from("gle"),
                working_path: String::from("./"),
                random_seed: 42,
                step_num: 100,
                save_step_num: 10,
                temperature: 1.0,
                delta_t: 0.01,
            },
        }
    }

    #[test]
    fn setup_from_valid_config() {
        let setup = run_config().into_setup().unwrap();
        assert_eq!(setup.constants.temperature, 1.0);
        assert_eq!(setup.constants.save_step_num, 10);
        assert_eq!(setup.particle.position, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(setup.particle.mass, 2.0);
        assert_eq!(setup.bath.velocity, Vec3::ZERO);
        assert_eq!(setup.seed, 42);
    }

    #[test]
    fn zero_save_step_rejected() {
        let mut cfg = run_config();
        cfg.meta_data.save_step_num = 0;
        assert!(matches!(cfg.into_setup(), Err(SimError::Config(_))));
    }

    #[test]
    fn bad_mass_names_the_body() {
        let mut cfg = run_config();
        cfg.bath.mass = 0.0;
        match cfg.into_setup() {
            Err(SimError::Config(msg)) => assert!(msg.contains("[bath]"), "{}", msg),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn empty_project_name_rejected() {
        let mut cfg = run_config();
        cfg.meta_data.project_name = String::from("  ");
        assert!(matches!(cfg.into_setup(), Err(SimError::Config(_))));
    }

    #[test]
    fn missing_file_is_config_error() {
        let res = RunConfig::load(Path::new("/nonexistent/run.toml"));
        assert!(matches!(res, Err(SimError::Config(_))));
    }

    #[test]
    fn cli_parses_run_file_and_iostep() {
        let cfg = Config::from_args(vec!["gle-bath", "run.toml", "--iostep", "250"]).unwrap();
        assert_eq!(cfg.run_file, PathBuf::from("run.toml"));
        assert_eq!(cfg.stdout_step, Some(250));

        let cfg = Config::from_args(vec!["gle-bath", "run.toml"]).unwrap();
        assert_eq!(cfg.stdout_step, None);
    }

    #[test]
    fn cli_rejects_bad_iostep() {
        let res = Config::from_args(vec!["gle-bath", "run.toml", "-i", "ten"]);
        assert!(matches!(res, Err(SimError::Config(_))));
    }

    #[test]
    fn cli_requires_run_file() {
        assert!(Config::from_args(vec!["gle-bath"]).is_err());
    }
}
