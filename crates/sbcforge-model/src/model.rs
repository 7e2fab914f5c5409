//! Solver-agnostic model representation.
//!
//! A [`Model`] holds bounded integer and boolean variables, linear range
//! constraints that may be reified on boolean literals, exactly-one groups,
//! max-equalities, boolean-by-integer products and an optional linear
//! objective. Any backend offering indicator constraints (or big-M
//! linearization over bounded domains) can consume it.

use std::fmt;

use sbcforge_core::{Result, SbcError};
use smallvec::SmallVec;

/// Identifier of a model variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }

    /// Literal that holds when this boolean variable is 1.
    pub fn is_true(self) -> Literal {
        Literal::Pos(self)
    }

    /// Literal that holds when this boolean variable is 0.
    pub fn is_false(self) -> Literal {
        Literal::Neg(self)
    }
}

/// A boolean variable or its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Literal {
    Pos(VarId),
    Neg(VarId),
}

impl Literal {
    pub fn var(self) -> VarId {
        match self {
            Literal::Pos(v) | Literal::Neg(v) => v,
        }
    }

    pub fn negate(self) -> Literal {
        match self {
            Literal::Pos(v) => Literal::Neg(v),
            Literal::Neg(v) => Literal::Pos(v),
        }
    }

    /// Whether the literal holds under `values`.
    pub fn holds(self, values: &[i64]) -> bool {
        match self {
            Literal::Pos(v) => values[v.0] != 0,
            Literal::Neg(v) => values[v.0] == 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Bool,
    Int,
}

/// Declared variable with its domain and debug name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDef {
    pub name: String,
    pub kind: VarKind,
    pub lb: i64,
    pub ub: i64,
}

type Terms = SmallVec<[(VarId, i64); 8]>;

/// Integer linear expression `Σ coef·var + constant`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Terms,
    constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(value: i64) -> Self {
        Self {
            terms: Terms::new(),
            constant: value,
        }
    }

    pub fn var(var: VarId) -> Self {
        Self::term(var, 1)
    }

    pub fn term(var: VarId, coef: i64) -> Self {
        let mut expr = Self::new();
        expr.add_term(var, coef);
        expr
    }

    /// Sum of variables with coefficient 1.
    pub fn sum<I: IntoIterator<Item = VarId>>(vars: I) -> Self {
        Self::weighted(vars.into_iter().map(|v| (v, 1)))
    }

    /// Sum of `(var, coef)` terms.
    pub fn weighted<I: IntoIterator<Item = (VarId, i64)>>(terms: I) -> Self {
        let mut expr = Self::new();
        for (var, coef) in terms {
            expr.add_term(var, coef);
        }
        expr
    }

    /// Adds `coef·var`; zero coefficients are dropped.
    pub fn add_term(&mut self, var: VarId, coef: i64) -> &mut Self {
        if coef != 0 {
            self.terms.push((var, coef));
        }
        self
    }

    pub fn add_constant(&mut self, value: i64) -> &mut Self {
        self.constant += value;
        self
    }

    pub fn add_expr(&mut self, other: &LinearExpr) -> &mut Self {
        self.terms.extend(other.terms.iter().copied());
        self.constant += other.constant;
        self
    }

    /// Returns `self - other`.
    pub fn minus(&self, other: &LinearExpr) -> LinearExpr {
        let mut expr = self.clone();
        for &(var, coef) in &other.terms {
            expr.add_term(var, -coef);
        }
        expr.constant -= other.constant;
        expr
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn constant_term(&self) -> i64 {
        self.constant
    }

    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under `values`.
    pub fn evaluate(&self, values: &[i64]) -> i64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * values[var.0])
            .sum::<i64>()
            + self.constant
    }
}

/// Model constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// `lb <= expr <= ub`, enforced only when every literal holds.
    /// `i64::MIN` / `i64::MAX` leave a side open.
    Linear {
        expr: LinearExpr,
        lb: i64,
        ub: i64,
        enforce: SmallVec<[Literal; 2]>,
    },

    /// Exactly one of the boolean variables is 1.
    ExactlyOne(Vec<VarId>),

    /// `target == max(exprs)`.
    MaxEquality { target: VarId, exprs: Vec<LinearExpr> },

    /// `target == factor * operand` with `factor` boolean.
    Product {
        target: VarId,
        factor: VarId,
        operand: VarId,
    },
}

impl Constraint {
    /// Whether the constraint holds under `values`.
    pub fn is_satisfied_by(&self, values: &[i64]) -> bool {
        match self {
            Constraint::Linear {
                expr,
                lb,
                ub,
                enforce,
            } => {
                if !enforce.iter().all(|lit| lit.holds(values)) {
                    return true;
                }
                let value = expr.evaluate(values);
                *lb <= value && value <= *ub
            }
            Constraint::ExactlyOne(vars) => vars.iter().filter(|v| values[v.0] == 1).count() == 1,
            Constraint::MaxEquality { target, exprs } => {
                exprs.iter().map(|e| e.evaluate(values)).max() == Some(values[target.0])
            }
            Constraint::Product {
                target,
                factor,
                operand,
            } => values[target.0] == values[factor.0] * values[operand.0],
        }
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    /// Whether `candidate` is strictly better than `incumbent`.
    pub fn improves(self, candidate: i64, incumbent: i64) -> bool {
        match self {
            Sense::Minimize => candidate < incumbent,
            Sense::Maximize => candidate > incumbent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objective {
    pub sense: Sense,
    pub expr: LinearExpr,
}

/// Variable and constraint counts of a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelStats {
    pub bool_vars: usize,
    pub int_vars: usize,
    pub linear: usize,
    pub reified: usize,
    pub exactly_one: usize,
    pub max_equality: usize,
    pub product: usize,
}

impl ModelStats {
    pub fn constraints(&self) -> usize {
        self.linear + self.reified + self.exactly_one + self.max_equality + self.product
    }
}

impl fmt::Display for ModelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bools, {} ints, {} constraints ",
            self.bool_vars,
            self.int_vars,
            self.constraints()
        )?;
        write!(
            f,
            "({} linear, {} reified, {} exactly-one, {} max, {} product)",
            self.linear, self.reified, self.exactly_one, self.max_equality, self.product
        )
    }
}

/// A compiled optimization model.
///
/// # Example
///
/// ```
/// use sbcforge_model::{LinearExpr, Model};
///
/// let mut model = Model::new();
/// let a = model.new_bool("a");
/// let b = model.new_bool("b");
/// let x = model.new_int("x", 0, 3);
///
/// model.add_eq(LinearExpr::sum([a, b]), 1);
/// model.add_eq_if(LinearExpr::var(x), 2, &[a.is_true()]);
///
/// assert!(model.is_satisfied_by(&[1, 0, 2]));
/// assert!(!model.is_satisfied_by(&[1, 0, 1]));
/// assert!(model.is_satisfied_by(&[0, 1, 1]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    vars: Vec<VarDef>,
    constraints: Vec<Constraint>,
    objective: Option<Objective>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_bool(&mut self, name: impl Into<String>) -> VarId {
        self.push_var(name.into(), VarKind::Bool, 0, 1)
    }

    pub fn new_int(&mut self, name: impl Into<String>, lb: i64, ub: i64) -> VarId {
        self.push_var(name.into(), VarKind::Int, lb, ub)
    }

    fn push_var(&mut self, name: String, kind: VarKind, lb: i64, ub: i64) -> VarId {
        let id = VarId(self.vars.len());
        self.vars.push(VarDef { name, kind, lb, ub });
        id
    }

    pub fn add(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Adds `lb <= expr <= ub` enforced when all `enforce` literals hold.
    pub fn add_range_if(&mut self, expr: LinearExpr, lb: i64, ub: i64, enforce: &[Literal]) {
        self.add(Constraint::Linear {
            expr,
            lb,
            ub,
            enforce: enforce.iter().copied().collect(),
        });
    }

    pub fn add_range(&mut self, expr: LinearExpr, lb: i64, ub: i64) {
        self.add_range_if(expr, lb, ub, &[]);
    }

    pub fn add_eq(&mut self, expr: LinearExpr, value: i64) {
        self.add_range(expr, value, value);
    }

    pub fn add_eq_if(&mut self, expr: LinearExpr, value: i64, enforce: &[Literal]) {
        self.add_range_if(expr, value, value, enforce);
    }

    pub fn add_le(&mut self, expr: LinearExpr, ub: i64) {
        self.add_range(expr, i64::MIN, ub);
    }

    pub fn add_le_if(&mut self, expr: LinearExpr, ub: i64, enforce: &[Literal]) {
        self.add_range_if(expr, i64::MIN, ub, enforce);
    }

    pub fn add_ge(&mut self, expr: LinearExpr, lb: i64) {
        self.add_range(expr, lb, i64::MAX);
    }

    pub fn add_ge_if(&mut self, expr: LinearExpr, lb: i64, enforce: &[Literal]) {
        self.add_range_if(expr, lb, i64::MAX, enforce);
    }

    pub fn add_exactly_one(&mut self, vars: Vec<VarId>) {
        self.add(Constraint::ExactlyOne(vars));
    }

    pub fn add_max_equality(&mut self, target: VarId, exprs: Vec<LinearExpr>) {
        self.add(Constraint::MaxEquality { target, exprs });
    }

    /// Adds `target == factor * operand`.
    pub fn add_product(&mut self, target: VarId, factor: VarId, operand: VarId) {
        self.add(Constraint::Product {
            target,
            factor,
            operand,
        });
    }

    pub fn set_objective(&mut self, sense: Sense, expr: LinearExpr) {
        self.objective = Some(Objective { sense, expr });
    }

    pub fn vars(&self) -> &[VarDef] {
        &self.vars
    }

    pub fn var(&self, id: VarId) -> &VarDef {
        &self.vars[id.0]
    }

    /// Looks up a variable by position, e.g. when reading backend output.
    pub fn var_id(&self, index: usize) -> Option<VarId> {
        (index < self.vars.len()).then_some(VarId(index))
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    /// Smallest and largest value `expr` can take over the variable domains.
    pub fn bounds(&self, expr: &LinearExpr) -> (i64, i64) {
        let mut lo = expr.constant_term();
        let mut hi = expr.constant_term();
        for &(var, coef) in expr.terms() {
            let def = &self.vars[var.0];
            if coef > 0 {
                lo += coef * def.lb;
                hi += coef * def.ub;
            } else {
                lo += coef * def.ub;
                hi += coef * def.lb;
            }
        }
        (lo, hi)
    }

    pub fn stats(&self) -> ModelStats {
        let mut stats = ModelStats::default();
        for def in &self.vars {
            match def.kind {
                VarKind::Bool => stats.bool_vars += 1,
                VarKind::Int => stats.int_vars += 1,
            }
        }
        for constraint in &self.constraints {
            match constraint {
                Constraint::Linear { enforce, .. } if enforce.is_empty() => stats.linear += 1,
                Constraint::Linear { .. } => stats.reified += 1,
                Constraint::ExactlyOne(_) => stats.exactly_one += 1,
                Constraint::MaxEquality { .. } => stats.max_equality += 1,
                Constraint::Product { .. } => stats.product += 1,
            }
        }
        stats
    }

    /// Whether `values` (one per variable) satisfies every domain and
    /// constraint.
    pub fn is_satisfied_by(&self, values: &[i64]) -> bool {
        self.first_violation(values).is_none()
    }

    /// Describes the first domain or constraint violated by `values`.
    pub fn first_violation(&self, values: &[i64]) -> Option<String> {
        if values.len() != self.vars.len() {
            return Some(format!(
                "expected {} values, got {}",
                self.vars.len(),
                values.len()
            ));
        }
        for (def, &value) in self.vars.iter().zip(values) {
            if value < def.lb || value > def.ub {
                return Some(format!(
                    "{} = {} outside [{}, {}]",
                    def.name, value, def.lb, def.ub
                ));
            }
        }
        self.constraints
            .iter()
            .position(|c| !c.is_satisfied_by(values))
            .map(|i| format!("constraint #{i} violated: {:?}", self.constraints[i]))
    }

    /// Checks structural soundness: variable references, domains and
    /// boolean-only positions.
    ///
    /// # Errors
    ///
    /// Returns [`SbcError::ModelInvalid`] describing the first problem.
    pub fn validate(&self) -> Result<()> {
        for def in &self.vars {
            if def.lb > def.ub {
                return Err(invalid(format!("{} has empty domain", def.name)));
            }
            if def.kind == VarKind::Bool && (def.lb < 0 || def.ub > 1) {
                return Err(invalid(format!("{} is not a 0/1 variable", def.name)));
            }
        }
        let known = |v: VarId| v.0 < self.vars.len();
        let is_bool = |v: VarId| known(v) && self.vars[v.0].kind == VarKind::Bool;
        let expr_ok = |e: &LinearExpr| e.terms().iter().all(|&(v, _)| known(v));
        for (i, constraint) in self.constraints.iter().enumerate() {
            let ok = match constraint {
                Constraint::Linear {
                    expr,
                    lb,
                    ub,
                    enforce,
                } => expr_ok(expr) && lb <= ub && enforce.iter().all(|l| is_bool(l.var())),
                Constraint::ExactlyOne(vars) => {
                    !vars.is_empty() && vars.iter().all(|&v| is_bool(v))
                }
                Constraint::MaxEquality { target, exprs } => {
                    known(*target) && !exprs.is_empty() && exprs.iter().all(expr_ok)
                }
                Constraint::Product {
                    target,
                    factor,
                    operand,
                } => known(*target) && is_bool(*factor) && known(*operand),
            };
            if !ok {
                return Err(invalid(format!("constraint #{i} is malformed")));
            }
        }
        if let Some(objective) = &self.objective {
            if !expr_ok(&objective.expr) {
                return Err(invalid("objective references unknown variable".to_string()));
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> SbcError {
    SbcError::ModelInvalid(message)
}
