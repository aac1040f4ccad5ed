//! Domain layer - step outcomes, price reading and the simulated scenarios

pub mod clarity;
pub mod outcome;
pub mod price;
pub mod simulation;
