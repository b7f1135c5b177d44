pub mod analyze;
pub mod games;
pub mod health;
