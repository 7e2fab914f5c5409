//! Big-M linearization of a [`Model`] into plain integer rows.
//!
//! Reified linear constraints, max-equalities and boolean products are
//! rewritten with big-M coefficients derived from the variable domains, so
//! any MILP backend without indicator constraints can solve the result.
//! Auxiliary columns are appended after the model's own variables.

use sbcforge_model::{Constraint, LinearExpr, Literal, Model, Sense, VarKind};

/// Row comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Le,
    Ge,
    Eq,
}

/// `Σ coef·column (cmp) rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub terms: Vec<(usize, i64)>,
    pub cmp: Cmp,
    pub rhs: i64,
}

impl Row {
    pub fn is_satisfied_by(&self, values: &[i64]) -> bool {
        let lhs: i64 = self.terms.iter().map(|&(col, coef)| coef * values[col]).sum();
        match self.cmp {
            Cmp::Le => lhs <= self.rhs,
            Cmp::Ge => lhs >= self.rhs,
            Cmp::Eq => lhs == self.rhs,
        }
    }
}

/// Integer column with its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub lb: i64,
    pub ub: i64,
    pub binary: bool,
}

/// Linear program produced from a [`Model`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearProgram {
    columns: Vec<Column>,
    rows: Vec<Row>,
    objective: Option<(Sense, Vec<(usize, i64)>)>,
    model_vars: usize,
    infeasible: bool,
}

impl LinearProgram {
    pub fn from_model(model: &Model) -> Self {
        let columns = model
            .vars()
            .iter()
            .map(|def| Column {
                lb: def.lb,
                ub: def.ub,
                binary: def.kind == VarKind::Bool,
            })
            .collect();
        let mut program = Self {
            columns,
            rows: Vec::new(),
            objective: None,
            model_vars: model.vars().len(),
            infeasible: false,
        };

        for constraint in model.constraints() {
            match constraint {
                Constraint::Linear {
                    expr,
                    lb,
                    ub,
                    enforce,
                } if enforce.is_empty() => program.linear(model, expr, *lb, *ub),
                Constraint::Linear {
                    expr,
                    lb,
                    ub,
                    enforce,
                } => program.reified(model, expr, *lb, *ub, enforce),
                Constraint::ExactlyOne(vars) => {
                    program.push(vars.iter().map(|v| (v.index(), 1)).collect(), Cmp::Eq, 1);
                }
                Constraint::MaxEquality { target, exprs } => {
                    program.max_equality(model, target.index(), exprs);
                }
                Constraint::Product {
                    target,
                    factor,
                    operand,
                } => program.product(model, target.index(), factor.index(), operand.index()),
            }
        }

        program.objective = model.objective().map(|objective| {
            let terms = objective
                .expr
                .terms()
                .iter()
                .map(|&(v, coef)| (v.index(), coef))
                .collect();
            (objective.sense, terms)
        });
        program
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn objective(&self) -> Option<(Sense, &[(usize, i64)])> {
        self.objective
            .as_ref()
            .map(|(sense, terms)| (*sense, terms.as_slice()))
    }

    /// Number of leading columns that belong to the model.
    pub fn model_vars(&self) -> usize {
        self.model_vars
    }

    /// Whether a constant constraint was already found violated.
    pub fn is_trivially_infeasible(&self) -> bool {
        self.infeasible
    }

    /// Checks `values` (one per column, auxiliaries included).
    pub fn is_satisfied_by(&self, values: &[i64]) -> bool {
        !self.infeasible
            && values.len() == self.columns.len()
            && self
                .columns
                .iter()
                .zip(values)
                .all(|(col, &v)| col.lb <= v && v <= col.ub)
            && self.rows.iter().all(|row| row.is_satisfied_by(values))
    }

    fn linear(&mut self, model: &Model, expr: &LinearExpr, lb: i64, ub: i64) {
        let constant = expr.constant_term();
        if expr.is_constant() {
            if constant < lb || constant > ub {
                self.infeasible = true;
            }
            return;
        }
        let terms = columns_of(expr);
        if lb == ub {
            self.push(terms, Cmp::Eq, lb - constant);
            return;
        }
        let (lo, hi) = model.bounds(expr);
        if lb != i64::MIN && lo < lb {
            self.push(terms.clone(), Cmp::Ge, lb - constant);
        }
        if ub != i64::MAX && hi > ub {
            self.push(terms, Cmp::Le, ub - constant);
        }
    }

    fn reified(&mut self, model: &Model, expr: &LinearExpr, lb: i64, ub: i64, enforce: &[Literal]) {
        let constant = expr.constant_term();
        let (lo, hi) = model.bounds(expr);

        if ub != i64::MAX && hi > ub {
            let big_m = hi - ub;
            let mut terms = columns_of(expr);
            let mut rhs = ub - constant;
            for literal in enforce {
                match *literal {
                    Literal::Pos(v) => {
                        terms.push((v.index(), big_m));
                        rhs += big_m;
                    }
                    Literal::Neg(v) => terms.push((v.index(), -big_m)),
                }
            }
            self.push(terms, Cmp::Le, rhs);
        }

        if lb != i64::MIN && lo < lb {
            let big_m = lb - lo;
            let mut terms = columns_of(expr);
            let mut rhs = lb - constant;
            for literal in enforce {
                match *literal {
                    Literal::Pos(v) => {
                        terms.push((v.index(), -big_m));
                        rhs -= big_m;
                    }
                    Literal::Neg(v) => terms.push((v.index(), big_m)),
                }
            }
            self.push(terms, Cmp::Ge, rhs);
        }
    }

    fn max_equality(&mut self, model: &Model, target: usize, exprs: &[LinearExpr]) {
        let difference = |expr: &LinearExpr| {
            let mut terms = vec![(target, 1)];
            terms.extend(expr.terms().iter().map(|&(v, coef)| (v.index(), -coef)));
            terms
        };

        if let [only] = exprs {
            self.push(difference(only), Cmp::Eq, only.constant_term());
            return;
        }

        let target_ub = self.columns[target].ub;
        let mut selectors = Vec::with_capacity(exprs.len());
        for expr in exprs {
            self.push(difference(expr), Cmp::Ge, expr.constant_term());

            let selector = self.add_binary();
            selectors.push((selector, 1));
            let big_m = (target_ub - model.bounds(expr).0).max(0);
            let mut terms = difference(expr);
            terms.push((selector, big_m));
            self.push(terms, Cmp::Le, expr.constant_term() + big_m);
        }
        self.push(selectors, Cmp::Eq, 1);
    }

    fn product(&mut self, model: &Model, target: usize, factor: usize, operand: usize) {
        let def = &model.vars()[operand];
        let (low, high) = (def.lb, def.ub);

        self.push(vec![(target, 1), (factor, -low)], Cmp::Ge, 0);
        self.push(vec![(target, 1), (factor, -high)], Cmp::Le, 0);
        self.push(
            vec![(target, 1), (operand, -1), (factor, -high)],
            Cmp::Ge,
            -high,
        );
        self.push(
            vec![(target, 1), (operand, -1), (factor, -low)],
            Cmp::Le,
            -low,
        );
    }

    fn add_binary(&mut self) -> usize {
        self.columns.push(Column {
            lb: 0,
            ub: 1,
            binary: true,
        });
        self.columns.len() - 1
    }

    /// Pushes a row with repeated columns merged and zero terms dropped.
    fn push(&mut self, mut terms: Vec<(usize, i64)>, cmp: Cmp, rhs: i64) {
        terms.sort_unstable_by_key(|&(col, _)| col);
        let mut merged: Vec<(usize, i64)> = Vec::with_capacity(terms.len());
        for (col, coef) in terms {
            match merged.last_mut() {
                Some((last, sum)) if *last == col => *sum += coef,
                _ => merged.push((col, coef)),
            }
        }
        merged.retain(|&(_, coef)| coef != 0);

        if merged.is_empty() {
            let holds = match cmp {
                Cmp::Le => 0 <= rhs,
                Cmp::Ge => 0 >= rhs,
                Cmp::Eq => rhs == 0,
            };
            if !holds {
                self.infeasible = true;
            }
            return;
        }
        self.rows.push(Row {
            terms: merged,
            cmp,
            rhs,
        });
    }
}

fn columns_of(expr: &LinearExpr) -> Vec<(usize, i64)> {
    expr.terms()
        .iter()
        .map(|&(v, coef)| (v.index(), coef))
        .collect()
}
