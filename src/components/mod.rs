pub mod league;
pub mod squad;
