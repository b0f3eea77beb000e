pub mod backtrack;
pub mod brute;
