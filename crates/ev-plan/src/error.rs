use ev_core::EvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("planner configuration error: {0}")]
    Config(String),

    #[error("no districts configured")]
    NoDistricts,

    #[error(transparent)]
    Core(#[from] EvError),
}

pub type PlanResult<T> = Result<T, PlanError>;
