pub mod cardinality;
#[allow(clippy::module_inception)]
pub mod cnf;
pub mod dimacs;
pub mod gem;
