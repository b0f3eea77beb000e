pub mod bench;
pub mod cnf;
pub mod count;
pub mod error;
pub mod generate;
pub mod grid;
pub mod sat;
pub mod solve;
pub mod solver;
