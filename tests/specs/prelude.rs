//! Shared calculator fixture for the behavioral specs.
//!
//! A minimal prevalent application: a running total mutated by four
//! arithmetic commands and read through one query.

use prevalent::{Command, CommandError, CommandRegistry, Engine, Query};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Calc {
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Add {
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Sub {
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mul {
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Div {
    pub amount: f64,
}

impl Command<Calc> for Add {
    const TAG: &'static str = "add";

    fn apply(&self, state: &mut Calc) -> Result<(), CommandError> {
        state.total += self.amount;
        Ok(())
    }
}

impl Command<Calc> for Sub {
    const TAG: &'static str = "sub";

    fn apply(&self, state: &mut Calc) -> Result<(), CommandError> {
        state.total -= self.amount;
        Ok(())
    }
}

impl Command<Calc> for Mul {
    const TAG: &'static str = "mul";

    fn apply(&self, state: &mut Calc) -> Result<(), CommandError> {
        state.total *= self.amount;
        Ok(())
    }
}

impl Command<Calc> for Div {
    const TAG: &'static str = "div";

    fn apply(&self, state: &mut Calc) -> Result<(), CommandError> {
        state.total /= self.amount;
        Ok(())
    }
}

pub struct Total;

impl Query<Calc> for Total {
    type Output = f64;

    fn query(&self, state: &Calc) -> f64 {
        state.total
    }
}

pub fn registry() -> CommandRegistry<Calc> {
    CommandRegistry::new()
        .register::<Add>()
        .register::<Sub>()
        .register::<Mul>()
        .register::<Div>()
}

pub fn load(path: &Path) -> Engine<Calc> {
    Engine::load(path, Calc::default(), &registry()).unwrap()
}

pub fn temp_journal() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calc.journal");
    (dir, path)
}
