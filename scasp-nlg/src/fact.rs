//! This module defines [Fact], the owned form of a ground model entry,
//! and the functions that extract facts from a parsed [Response].

use std::fmt::Display;

use thiserror::Error;

use crate::parser::ast::{
    model::Model,
    response::Response,
    statement::Statement,
    term::{Argument as TermArgument, Term},
    variable::Variable,
};

/// Errors that occur while turning model entries into [Fact]s
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactError {
    /// Only terms of arity one or two can be expressed as facts
    #[error("`{functor}` has {arity} arguments, but facts must have one or two")]
    Arity {
        /// Functor of the offending term
        functor: String,
        /// Number of arguments of the offending term
        arity: usize,
    },
    /// Model entry is not a plain term
    #[error("`{statement}` is not a term")]
    UnsupportedStatement {
        /// Text of the offending statement
        statement: String,
    },
    /// Argument that cannot be referred to
    #[error("argument `{argument}` of `{functor}` cannot be used in a fact")]
    UnsupportedArgument {
        /// Functor of the term containing the argument
        functor: String,
        /// Text of the offending argument
        argument: String,
    },
}

/// Argument of a [Fact]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Argument {
    /// Reference to a variable of the model
    Variable(String),
    /// Constant, or the canonical text of a nested term
    Atom(String),
}

impl Argument {
    /// Return the text of this argument.
    pub fn text(&self) -> &str {
        match self {
            Argument::Variable(name) | Argument::Atom(name) => name,
        }
    }
}

impl Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// A unary or binary ground statement taken from a model,
/// e.g. `player(a)` or `participant_in(a,rps)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fact {
    /// Name of the predicate, including a negation prefix
    functor: String,
    /// Subject, followed by the object for binary facts
    arguments: Vec<Argument>,
}

impl Fact {
    /// Create a fact with a single argument.
    pub fn unary(functor: &str, subject: Argument) -> Self {
        Self {
            functor: functor.to_owned(),
            arguments: vec![subject],
        }
    }

    /// Create a fact with a subject and an object.
    pub fn binary(functor: &str, subject: Argument, object: Argument) -> Self {
        Self {
            functor: functor.to_owned(),
            arguments: vec![subject, object],
        }
    }

    /// Create a fact from a list of arguments.
    ///
    /// Returns an error unless there are one or two arguments.
    pub fn new(functor: &str, arguments: Vec<Argument>) -> Result<Self, FactError> {
        if !(1..=2).contains(&arguments.len()) {
            return Err(FactError::Arity {
                functor: functor.to_owned(),
                arity: arguments.len(),
            });
        }

        Ok(Self {
            functor: functor.to_owned(),
            arguments,
        })
    }

    /// Return the name of the predicate.
    pub fn functor(&self) -> &str {
        &self.functor
    }

    /// Return the arguments of this fact.
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Return the subject, i.e. the first argument.
    pub fn subject(&self) -> &Argument {
        &self.arguments[0]
    }

    /// Return the object of a binary fact.
    pub fn object(&self) -> Option<&Argument> {
        self.arguments.get(1)
    }
}

impl Display for Fact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.functor)?;
        for (index, argument) in self.arguments.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{argument}")?;
        }
        f.write_str(")")
    }
}

fn extract_argument(functor: &str, argument: &TermArgument<'_>) -> Result<Argument, FactError> {
    match argument {
        TermArgument::Variable(Variable::Named(variable)) => {
            Ok(Argument::Variable(variable.name().to_owned()))
        }
        TermArgument::Variable(variable @ Variable::Silent(_)) => {
            Err(FactError::UnsupportedArgument {
                functor: functor.to_owned(),
                argument: variable.to_string(),
            })
        }
        TermArgument::Statement(statement) => match statement.as_ref() {
            Statement::Term(term) => Ok(Argument::Atom(term.to_string())),
            other => Err(FactError::UnsupportedArgument {
                functor: functor.to_owned(),
                argument: other.to_string(),
            }),
        },
    }
}

fn extract_term(term: &Term<'_>) -> Result<Fact, FactError> {
    let functor = term.functor().to_string();
    let arguments = term
        .arguments()
        .map(|argument| extract_argument(&functor, argument))
        .collect::<Result<Vec<_>, _>>()?;

    Fact::new(&functor, arguments)
}

/// Convert the entries of a [Model] into [Fact]s, preserving their order.
pub fn extract_facts(model: &Model<'_>) -> Result<Vec<Fact>, FactError> {
    model
        .statements()
        .map(|statement| match statement {
            Statement::Term(term) => extract_term(term),
            other => Err(FactError::UnsupportedStatement {
                statement: other.to_string(),
            }),
        })
        .collect()
}

/// Convert the model of every answer of a [Response] into a list of [Fact]s.
///
/// A response without models results in an empty list.
pub fn extract_models(response: &Response<'_>) -> Result<Vec<Vec<Fact>>, FactError> {
    response
        .answers()
        .iter()
        .map(|answer| {
            let facts = extract_facts(answer.model())?;
            log::trace!("answer {}: {} facts", answer.number(), facts.len());
            Ok(facts)
        })
        .collect()
}
