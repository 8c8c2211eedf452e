// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value expressions.
//!
//! Only the data-literal subset is modelled: decoration payloads are plain
//! data, never lambdas or pattern matches.

use crate::fqname::FQName;
use crate::literal::Literal;
use crate::name::Name;

/// A value expression with attribute payload `A`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<A> {
    Literal(A, Literal),
    Constructor(A, FQName),
    Tuple(A, Vec<Value<A>>),
    List(A, Vec<Value<A>>),
    /// Fields in declaration order.
    Record(A, Vec<(Name, Value<A>)>),
    Variable(A, Name),
    Reference(A, FQName),
    /// Single-argument application; curried calls nest on the function side.
    Apply(A, Box<Value<A>>, Box<Value<A>>),
    Unit(A),
}

impl<A> Value<A> {
    pub fn attributes(&self) -> &A {
        match self {
            Value::Literal(a, _)
            | Value::Constructor(a, _)
            | Value::Tuple(a, _)
            | Value::List(a, _)
            | Value::Record(a, _)
            | Value::Variable(a, _)
            | Value::Reference(a, _)
            | Value::Apply(a, _, _)
            | Value::Unit(a) => a,
        }
    }

    /// Short variant name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Literal(..) => "Literal",
            Value::Constructor(..) => "Constructor",
            Value::Tuple(..) => "Tuple",
            Value::List(..) => "List",
            Value::Record(..) => "Record",
            Value::Variable(..) => "Variable",
            Value::Reference(..) => "Reference",
            Value::Apply(..) => "Apply",
            Value::Unit(..) => "Unit",
        }
    }
}

impl Value<()> {
    /// Apply `function` to each argument in turn: `f a b` becomes `Apply(Apply(f, a), b)`.
    pub fn apply_all(function: Value<()>, args: impl IntoIterator<Item = Value<()>>) -> Value<()> {
        args.into_iter().fold(function, |acc, arg| {
            Value::Apply((), Box::new(acc), Box::new(arg))
        })
    }
}
