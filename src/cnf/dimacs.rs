use std::fmt::Write as _;

use super::cnf::Cnf;

pub fn to_dimacs_with_comments(cnf: &Cnf, comments: &[String]) -> String {
    let mut out = String::new();
    for line in comments {
        let _ = writeln!(out, "c {}", line);
    }
    let _ = writeln!(out, "p cnf {} {}", cnf.num_vars, cnf.clauses.len());
    for clause in &cnf.clauses {
        for &lit in clause {
            let _ = write!(out, "{} ", lit.to_int());
        }
        out.push_str("0\n");
    }
    out
}
