/// Errors that can occur while setting up or driving the simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("Invalid arena configuration: {0}")]
    InvalidConfig(&'static str),

    #[error("Invalid beacon: {0}")]
    InvalidBeacon(&'static str),
}
