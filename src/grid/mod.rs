pub mod board;
pub mod solution;
pub mod text;
pub mod vars;
