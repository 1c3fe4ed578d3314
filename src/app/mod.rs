pub mod renderer;
pub mod stats;

use std::sync::Arc;

use rand::Rng;
use rayon::prelude::*;

use crate::{
    agent::Agent,
    app::{renderer::Renderer, stats::Summary},
    brains::{BrainError, BrainKind},
    generators::{MIN_DIMENSION, generate_with_rng, get_rng},
    maze::{Coord, Grid, MazeError},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error(transparent)]
    Brain(#[from] BrainError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// What the per-tick observer wants the trial loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Maze width in grid cells, walls included
    pub width: u16,
    /// Maze height in grid cells, walls included
    pub height: u16,
    /// Number of trials to run
    pub trials: usize,
    /// Base seed. Trial `i` uses `seed + i`. Drawn from OS entropy when `None`.
    pub seed: Option<u64>,
    pub start: Coord,
    /// Goal cell, the bottom-right interior cell when `None`
    pub goal: Option<Coord>,
    /// Brains to race, in display order
    pub brains: Vec<BrainKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 21,
            height: 21,
            trials: 100,
            seed: None,
            start: (1, 1),
            goal: None,
            brains: BrainKind::ALL.to_vec(),
        }
    }
}

/// Steps taken by every brain in one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialResult {
    pub trial: usize,
    pub seed: u64,
    /// Indexed like [`Settings::brains`]
    pub steps: Vec<usize>,
    pub reached_goal: Vec<bool>,
}

/// All finished trials of a run, in trial order.
#[derive(Debug, Clone)]
pub struct Report {
    pub brains: Vec<BrainKind>,
    pub trials: Vec<TrialResult>,
}

impl Report {
    /// Step counts of the brain at `index` across all trials.
    pub fn steps(&self, index: usize) -> Vec<usize> {
        self.trials.iter().map(|t| t.steps[index]).collect()
    }

    pub fn summaries(&self) -> Vec<Summary> {
        self.brains
            .iter()
            .enumerate()
            .filter_map(|(i, &kind)| {
                let reached = self
                    .trials
                    .iter()
                    .map(|t| t.reached_goal[i])
                    .collect::<Vec<_>>();
                Summary::from_steps(kind, &self.steps(i), &reached)
            })
            .collect()
    }
}

pub struct App {
    settings: Settings,
    base_seed: u64,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self, AppError> {
        if settings.width < MIN_DIMENSION || settings.height < MIN_DIMENSION {
            return Err(MazeError::InvalidDimension {
                width: settings.width,
                height: settings.height,
            }
            .into());
        }
        if settings.trials == 0 {
            return Err(AppError::InvalidSettings(
                "at least one trial is required".to_string(),
            ));
        }
        if settings.brains.is_empty() {
            return Err(AppError::InvalidSettings(
                "at least one brain is required".to_string(),
            ));
        }
        let base_seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        tracing::info!(
            "Racing {} brains over {} trials on {}x{} mazes (base seed {})",
            settings.brains.len(),
            settings.trials,
            settings.width,
            settings.height,
            base_seed
        );
        Ok(App {
            settings,
            base_seed,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The seed trial 0 uses. Pass it back as [`Settings::seed`] to replay a run.
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    pub fn trial_seed(&self, trial: usize) -> u64 {
        self.base_seed.wrapping_add(trial as u64)
    }

    /// Generate the trial's maze and start one agent per brain on it.
    pub fn setup_trial(&self, trial: usize) -> Result<(Arc<Grid>, Vec<Agent>), AppError> {
        let mut rng = get_rng(Some(self.trial_seed(trial)));
        let grid = Arc::new(generate_with_rng(
            self.settings.width,
            self.settings.height,
            &mut rng,
        )?);

        let agents = self
            .settings
            .brains
            .iter()
            .map(|kind| -> Result<Agent, AppError> {
                let mut agent =
                    Agent::new(kind.build(&mut rng), self.settings.start, self.settings.goal);
                agent.start(grid.clone())?;
                Ok(agent)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((grid, agents))
    }

    /// Run one trial, stepping every agent once per tick until all of them are done.
    /// `on_tick` sees the board after every tick. Returns `None` if it cancelled the trial.
    pub fn run_trial<F>(
        &self,
        trial: usize,
        mut on_tick: F,
    ) -> Result<Option<TrialResult>, AppError>
    where
        F: FnMut(&Grid, &[Agent]) -> Result<Tick, AppError>,
    {
        let (grid, mut agents) = self.setup_trial(trial)?;

        if on_tick(&grid, &agents)? == Tick::Cancel {
            return Ok(None);
        }
        while agents.iter().any(|agent| !agent.is_done()) {
            for agent in agents.iter_mut().filter(|agent| !agent.is_done()) {
                if agent.step()?.is_none() {
                    tracing::info!(
                        "[trial {}] {}: {} steps",
                        trial + 1,
                        agent.kind(),
                        agent.steps()
                    );
                }
            }
            if on_tick(&grid, &agents)? == Tick::Cancel {
                return Ok(None);
            }
        }

        Ok(Some(TrialResult {
            trial,
            seed: self.trial_seed(trial),
            steps: agents.iter().map(Agent::steps).collect(),
            reached_goal: agents.iter().map(Agent::reached_goal).collect(),
        }))
    }

    /// Run every trial headless on the rayon pool. Results do not depend on scheduling.
    pub fn run(&self) -> Result<Report, AppError> {
        let trials = (0..self.settings.trials)
            .into_par_iter()
            .map(|trial| self.run_trial(trial, |_, _| Ok(Tick::Continue)))
            .collect::<Result<Vec<_>, AppError>>()?;
        Ok(self.report(trials.into_iter().flatten().collect()))
    }

    /// Run every trial one after another, drawing each tick. Stops early when the user cancels;
    /// the report then holds only the trials that finished.
    pub fn run_rendered(&self, renderer: &mut Renderer) -> Result<Report, AppError> {
        let mut finished = Vec::with_capacity(self.settings.trials);
        for trial in 0..self.settings.trials {
            let result =
                self.run_trial(trial, |grid, agents| Ok(renderer.draw(trial, grid, agents)?))?;
            match result {
                Some(result) => finished.push(result),
                None => {
                    tracing::info!("Run cancelled by user after {} trials", finished.len());
                    break;
                }
            }
        }
        Ok(self.report(finished))
    }

    fn report(&self, trials: Vec<TrialResult>) -> Report {
        Report {
            brains: self.settings.brains.clone(),
            trials,
        }
    }
}
