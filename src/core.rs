pub mod definitions;
pub mod engine;
pub mod error;
pub mod game;
pub mod movement;
pub mod position;
pub mod score;
pub mod utils;
pub mod validator;
