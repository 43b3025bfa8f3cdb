//! Python bindings for driving a simulation from a Python renderer.

use crate::config::ScenarioConfig;
use crate::error::TangentBugError;
use crate::simulation::{RunOutcome, Simulation};
use crate::structs::{Mode, Vector2D};
use crate::tangent_bug::NavigatorSnapshot;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn to_py_err(err: impl Into<TangentBugError>) -> PyErr {
    PyValueError::new_err(err.into().to_string())
}

fn xy(v: Vector2D) -> (f64, f64) {
    (v.x, v.y)
}

#[pyclass(name = "Snapshot")]
#[derive(Debug, Clone)]
pub struct PySnapshot {
    #[pyo3(get)]
    pub position: (f64, f64),
    #[pyo3(get)]
    pub mode: String,
    #[pyo3(get)]
    pub point_being_pursued: (f64, f64),
    #[pyo3(get)]
    pub vision_radius: f64,
    #[pyo3(get)]
    pub robot_radius: f64,
    #[pyo3(get)]
    pub tick: u64,
}

impl From<NavigatorSnapshot> for PySnapshot {
    fn from(s: NavigatorSnapshot) -> Self {
        PySnapshot {
            position: xy(s.position),
            mode: s.mode.to_string(),
            point_being_pursued: xy(s.point_being_pursued),
            vision_radius: s.vision_radius,
            robot_radius: s.robot_radius,
            tick: s.tick,
        }
    }
}

#[pymethods]
impl PySnapshot {
    pub fn is_following_boundary(&self) -> bool {
        self.mode == Mode::BoundaryFollowing.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!(
            "Snapshot(tick={}, position=({:.4}, {:.4}), mode={})",
            self.tick, self.position.0, self.position.1, self.mode
        )
    }
}

#[pyclass(name = "Simulation")]
pub struct PySimulation {
    inner: Simulation,
}

#[pymethods]
impl PySimulation {
    /// Loads a YAML scenario, or the built-in demo when no path is given.
    #[new]
    #[pyo3(signature = (path=None))]
    pub fn new(path: Option<&str>) -> PyResult<Self> {
        let config = match path {
            Some(path) => ScenarioConfig::load(path).map_err(to_py_err)?,
            None => ScenarioConfig::default(),
        };
        let inner = Simulation::from_config(&config).map_err(to_py_err)?;
        Ok(PySimulation { inner })
    }

    #[staticmethod]
    pub fn from_yaml(yaml: &str) -> PyResult<Self> {
        let config = ScenarioConfig::from_yaml_str(yaml).map_err(to_py_err)?;
        let inner = Simulation::from_config(&config).map_err(to_py_err)?;
        Ok(PySimulation { inner })
    }

    /// Advances one tick; returns whether the robot is still running.
    pub fn step(&mut self) -> PyResult<bool> {
        let result = self.inner.step().map_err(to_py_err)?;
        Ok(result.still_running)
    }

    /// Runs until done and returns `(outcome, ticks, mode_switches)`.
    #[pyo3(signature = (max_ticks=None))]
    pub fn run(&mut self, max_ticks: Option<u64>) -> PyResult<(String, u64, usize)> {
        let budget = max_ticks.unwrap_or(self.inner.max_ticks());
        let report = self.inner.run(budget).map_err(to_py_err)?;
        let outcome = match report.outcome {
            RunOutcome::GoalReached => "goal_reached",
            RunOutcome::Stalled { .. } => "stalled",
            RunOutcome::BudgetExhausted => "budget_exhausted",
        };
        Ok((outcome.to_string(), report.ticks, report.mode_switches.len()))
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    pub fn snapshot(&self) -> PySnapshot {
        self.inner.snapshot().into()
    }

    /// Obstacle mesh as `(vertices, triangles)`.
    pub fn world_mesh(&self) -> (Vec<(f64, f64)>, Vec<[u32; 3]>) {
        let mesh = self.inner.world().mesh();
        (
            mesh.vertices.iter().copied().map(xy).collect(),
            mesh.triangles.clone(),
        )
    }

    pub fn goal(&self) -> ((f64, f64), f64) {
        let goal = self.inner.navigator().goal();
        (xy(goal.center), goal.radius)
    }
}

#[pymodule]
fn tangent_bug(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySimulation>()?;
    m.add_class::<PySnapshot>()?;
    Ok(())
}
