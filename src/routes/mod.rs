pub mod health;
pub mod demo;
