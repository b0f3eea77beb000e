use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lit {
    pub var: u32,
    pub sign: bool,
}

impl Lit {
    pub fn new(var: u32, sign: bool) -> Self {
        Self { var, sign }
    }

    pub fn pos(var: u32) -> Self {
        Self::new(var, true)
    }

    pub fn neg_of(var: u32) -> Self {
        Self::new(var, false)
    }

    /// Signed form: `var` when positive, `-var` when negative.
    pub fn to_int(self) -> i64 {
        let v = self.var as i64;
        if self.sign { v } else { -v }
    }

    pub fn from_int(x: i64) -> Option<Self> {
        if x == 0 {
            return None;
        }
        let var = u32::try_from(x.unsigned_abs()).ok()?;
        Some(Self::new(var, x > 0))
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_int())
    }
}

pub type Clause = Vec<Lit>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cnf {
    pub num_vars: u32,
    pub clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new(num_vars: u32) -> Self {
        Self {
            num_vars,
            clauses: Vec::new(),
        }
    }

    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn max_clause_width(&self) -> usize {
        self.clauses.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn eval_lit_partial(lit: Lit, assignment: &[Option<bool>]) -> Option<bool> {
        let var = lit.var as usize;
        if var >= assignment.len() {
            return None;
        }
        assignment[var].map(|v| if lit.sign { v } else { !v })
    }

    /// `Some(true)` once a literal holds, `Some(false)` only when every
    /// literal is assigned and false, `None` otherwise.
    pub fn eval_clause_partial(clause: &[Lit], assignment: &[Option<bool>]) -> Option<bool> {
        let mut any_unknown = false;
        for &lit in clause {
            match Self::eval_lit_partial(lit, assignment) {
                Some(true) => return Some(true),
                Some(false) => {}
                None => any_unknown = true,
            }
        }
        if any_unknown { None } else { Some(false) }
    }

    /// No clause is fully decided and false. Undecided clauses never count
    /// as violated.
    pub fn is_partially_valid(&self, assignment: &[Option<bool>]) -> bool {
        self.clauses
            .iter()
            .all(|c| Self::eval_clause_partial(c, assignment) != Some(false))
    }

    /// Every clause has a literal that holds under `assignment`.
    pub fn is_satisfied_by(&self, assignment: &[Option<bool>]) -> bool {
        self.clauses
            .iter()
            .all(|c| Self::eval_clause_partial(c, assignment) == Some(true))
    }

    /// Checks a signed-literal model against every clause.
    pub fn is_model(&self, model: &[Lit]) -> bool {
        let width = model
            .iter()
            .map(|l| l.var as usize + 1)
            .max()
            .unwrap_or(0)
            .max(self.num_vars as usize + 1);
        let mut assignment = vec![None; width];
        for lit in model {
            assignment[lit.var as usize] = Some(lit.sign);
        }
        self.is_satisfied_by(&assignment)
    }

    pub fn vars_in_clauses(&self) -> impl Iterator<Item = u32> + '_ {
        self.clauses.iter().flatten().map(|l| l.var)
    }
}
