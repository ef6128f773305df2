use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SimError};
use crate::state::PhysicalState;
use crate::vec3::Vec3;

/// One sampled frame: both positions and the particle's kinetic energy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Record {
    pub step: usize,
    pub bath: Vec3,
    pub particle: Vec3,
    pub kinetic_energy: f64,
}

impl Record {

    pub fn from_state(step: usize, state: &PhysicalState) -> Record {
        Record{
            step: step,
            bath: state.bath.position,
            particle: state.particle.position,
            kinetic_energy: state.particle.kinetic_energy(),
        }
    }
}

/// Destination for sampled frames.
pub trait Sink {
    fn record(&mut self, record: &Record) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes frames as an xyz trajectory and a `step,kinetic_energy` log.
pub struct XyzEnergyWriter<W: Write> {
    coordinates: W,
    energy: W,
}

impl<W: Write> XyzEnergyWriter<W> {

    pub fn new(coordinates: W, energy: W) -> Self {
        XyzEnergyWriter{coordinates: coordinates, energy: energy}
    }

    pub fn into_inner(self) -> (W, W) {
        (self.coordinates, self.energy)
    }
}

impl XyzEnergyWriter<BufWriter<std::fs::File>> {

    // open (and truncate) both output files under `working_path`
    pub fn create(working_path: &Path, project_name: &str) -> Result<Self> {
        let (coord_path, energy_path) = output_paths(working_path, project_name);
        let coordinates = open_output(&coord_path)?;
        let energy = open_output(&energy_path)?;
        Ok(XyzEnergyWriter::new(coordinates, energy))
    }
}

impl<W: Write> Sink for XyzEnergyWriter<W> {

    // H is the bath, C the particle
    fn record(&mut self, record: &Record) -> Result<()> {
        writeln!(self.coordinates, "{}\n", 2)?;
        writeln!(self.coordinates, "H {}", record.bath)?;
        writeln!(self.coordinates, "C {}", record.particle)?;

        writeln!(self.energy, "{},{}", record.step, record.kinetic_energy)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.coordinates.flush()?;
        self.energy.flush()?;
        Ok(())
    }
}

/// Keeps every frame in memory.
#[derive(Default, Debug, Clone)]
pub struct Recorder {
    pub records: Vec<Record>,
    pub finished: bool,
}

impl Sink for Recorder {
    fn record(&mut self, record: &Record) -> Result<()> {
        self.records.push(*record);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

pub fn output_paths(working_path: &Path, project_name: &str) -> (PathBuf, PathBuf) {
    (
        working_path.join(format!("{}.xyz", project_name)),
        working_path.join(format!("{}_energy.csv", project_name)),
    )
}

fn open_output(path: &Path) -> Result<BufWriter<std::fs::File>> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| SimError::Output{path: path.to_path_buf(), source: e})?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(step: usize) -> Record {
        Record{step: step, bath: Vec3::new(0.0, 0.5, -1.0), particle: Vec3::new(1.0, 0.0, 0.25), kinetic_energy: 0.125}
    }

    #[test]
    fn xyz_block_and_energy_line() {
        let mut writer = XyzEnergyWriter::new(Vec::new(), Vec::new());
        writer.record(&record(0)).unwrap();
        writer.record(&record(10)).unwrap();
        writer.finish().unwrap();
        let (coords, energy) = writer.into_inner();
        assert_eq!(
            String::from_utf8(coords).unwrap(),
            "2\n\nH 0 0.5 -1\nC 1 0 0.25\n2\n\nH 0 0.5 -1\nC 1 0 0.25\n"
        );
        assert_eq!(String::from_utf8(energy).unwrap(), "0,0.125\n10,0.125\n");
    }

    #[test]
    fn paths_use_project_name() {
        let (xyz, csv) = output_paths(Path::new("/tmp/run"), "gle");
        assert_eq!(xyz, PathBuf::from("/tmp/run/gle.xyz"));
        assert_eq!(csv, PathBuf::from("/tmp/run/gle_energy.csv"));
    }

    #[test]
    fn missing_directory_reports_path() {
        let res = XyzEnergyWriter::create(Path::new("/nonexistent/definitely/not/here"), "gle");
        match res {
            Err(SimError::Output{path, ..}) => assert!(path.ends_with("gle.xyz")),
            other => panic!("expected output error, got {:?}", other.err()),
        }
    }
}
