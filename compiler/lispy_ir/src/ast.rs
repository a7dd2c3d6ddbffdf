//! Expression tree.
//!
//! One closed enum covers every form the language has. The evaluator
//! dispatches on it with a single `match`; there is no per-node trait.

use std::fmt;
use std::rc::Rc;

/// Symbol name. Cheap to clone and usable as a `&str` map key.
pub type Name = Rc<str>;

/// Numeric literal in the form it was written.
///
/// `12` is an integer and `12.` or `12.0` a float; arithmetic keeps
/// integers exact until a float joins in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// A user function created by `def`.
///
/// Immutable once built. The environment and every closure value that
/// refers to it share one `Rc<FunctionDef>`.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: Expr,
}

impl FunctionDef {
    pub fn new(name: impl Into<Name>, params: Vec<Name>, body: Expr) -> Self {
        FunctionDef {
            name: name.into(),
            params,
            body,
        }
    }

    /// Number of parameters the function must be called with.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// `42`, `-3`, `1.5`
    Number(Number),
    /// `TRUE` / `FALSE`
    Boolean(bool),
    /// Bare symbol reference.
    Symbol(Name),
    /// `(op arg...)`. The token is resolved against [`crate::BinaryOp`]
    /// at evaluation time.
    Operator { op: Name, args: Vec<Expr> },
    /// `(let name value)`
    Let { name: Name, value: Box<Expr> },
    /// `(def name [params...] body)`
    Definition(Rc<FunctionDef>),
    /// `(if cond then else)`; only the selected branch is evaluated.
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `(name arg...)` / `(name)`. The target is looked up by name when
    /// the invocation runs, so a body may call its own definition.
    Invocation { target: Name, args: Vec<Expr> },
}

impl Expr {
    pub fn int(value: i64) -> Self {
        Expr::Number(Number::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Expr::Number(Number::Float(value))
    }

    pub fn symbol(name: &str) -> Self {
        Expr::Symbol(Name::from(name))
    }

    pub fn operator(op: &str, args: Vec<Expr>) -> Self {
        Expr::Operator {
            op: Name::from(op),
            args,
        }
    }

    pub fn let_binding(name: &str, value: Expr) -> Self {
        Expr::Let {
            name: Name::from(name),
            value: Box::new(value),
        }
    }

    pub fn definition(name: &str, params: &[&str], body: Expr) -> Self {
        let params = params.iter().map(|p| Name::from(*p)).collect();
        Expr::Definition(Rc::new(FunctionDef::new(name, params, body)))
    }

    pub fn if_else(cond: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::If {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn invocation(target: &str, args: Vec<Expr>) -> Self {
        Expr::Invocation {
            target: Name::from(target),
            args,
        }
    }

    /// Short description used in diagnostics and trace output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Number(_) => "number literal",
            Expr::Boolean(_) => "boolean literal",
            Expr::Symbol(_) => "symbol",
            Expr::Operator { .. } => "operator application",
            Expr::Let { .. } => "let binding",
            Expr::Definition(_) => "function definition",
            Expr::If { .. } => "conditional",
            Expr::Invocation { .. } => "invocation",
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, head: &str, args: &[Expr]) -> fmt::Result {
    write!(f, "({head}")?;
    for arg in args {
        write!(f, " {arg}")?;
    }
    write!(f, ")")
}

/// Prints the expression back in surface syntax.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{n}"),
            Expr::Boolean(true) => write!(f, "TRUE"),
            Expr::Boolean(false) => write!(f, "FALSE"),
            Expr::Symbol(name) => write!(f, "{name}"),
            Expr::Operator { op, args } => write_list(f, op, args),
            Expr::Let { name, value } => write!(f, "(let {name} {value})"),
            Expr::Definition(def) => {
                write!(f, "(def {} [{}] {})", def.name, def.params.join(" "), def.body)
            }
            Expr::If {
                cond,
                then_branch,
                else_branch,
            } => write!(f, "(if {cond} {then_branch} {else_branch})"),
            Expr::Invocation { target, args } => write_list(f, target, args),
        }
    }
}
