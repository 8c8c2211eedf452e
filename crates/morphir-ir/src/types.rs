// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type expressions and type definitions.

use std::fmt;

use crate::fqname::FQName;
use crate::module::AccessControlled;
use crate::name::Name;

// ---------------------------------------------------------------------------
// Type
// ---------------------------------------------------------------------------

/// A type expression. Every node carries an attribute payload `A`.
#[derive(Debug, Clone, PartialEq)]
pub enum Type<A> {
    Variable(A, Name),
    Reference(A, FQName, Vec<Type<A>>),
    Tuple(A, Vec<Type<A>>),
    Record(A, Vec<Field<A>>),
    ExtensibleRecord(A, Name, Vec<Field<A>>),
    Function(A, Box<Type<A>>, Box<Type<A>>),
    Unit(A),
}

/// A named record field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<A> {
    pub name: Name,
    pub tpe: Type<A>,
}

impl<A> Field<A> {
    pub fn new(name: Name, tpe: Type<A>) -> Self {
        Self { name, tpe }
    }
}

impl<A> Type<A> {
    pub fn attributes(&self) -> &A {
        match self {
            Type::Variable(a, _)
            | Type::Reference(a, _, _)
            | Type::Tuple(a, _)
            | Type::Record(a, _)
            | Type::ExtensibleRecord(a, _, _)
            | Type::Function(a, _, _)
            | Type::Unit(a) => a,
        }
    }

    /// Short variant name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Type::Variable(..) => "Variable",
            Type::Reference(..) => "Reference",
            Type::Tuple(..) => "Tuple",
            Type::Record(..) => "Record",
            Type::ExtensibleRecord(..) => "ExtensibleRecord",
            Type::Function(..) => "Function",
            Type::Unit(..) => "Unit",
        }
    }

    /// Structural equality with attribute comparison delegated to `eq_attr`.
    ///
    /// Record fields are compared in order.
    pub fn equal_with<F>(&self, other: &Type<A>, eq_attr: &F) -> bool
    where
        F: Fn(&A, &A) -> bool,
    {
        match (self, other) {
            (Type::Variable(a1, n1), Type::Variable(a2, n2)) => eq_attr(a1, a2) && n1 == n2,
            (Type::Reference(a1, fq1, args1), Type::Reference(a2, fq2, args2)) => {
                eq_attr(a1, a2) && fq1 == fq2 && all_equal(args1, args2, eq_attr)
            }
            (Type::Tuple(a1, e1), Type::Tuple(a2, e2)) => {
                eq_attr(a1, a2) && all_equal(e1, e2, eq_attr)
            }
            (Type::Record(a1, f1), Type::Record(a2, f2)) => {
                eq_attr(a1, a2) && fields_equal(f1, f2, eq_attr)
            }
            (Type::ExtensibleRecord(a1, n1, f1), Type::ExtensibleRecord(a2, n2, f2)) => {
                eq_attr(a1, a2) && n1 == n2 && fields_equal(f1, f2, eq_attr)
            }
            (Type::Function(a1, arg1, ret1), Type::Function(a2, arg2, ret2)) => {
                eq_attr(a1, a2)
                    && arg1.equal_with(arg2, eq_attr)
                    && ret1.equal_with(ret2, eq_attr)
            }
            (Type::Unit(a1), Type::Unit(a2)) => eq_attr(a1, a2),
            _ => false,
        }
    }
}

/// Elm-like rendering, attributes omitted: `{ name : Morphir.SDK:String:string }`.
impl<A> fmt::Display for Type<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Variable(_, name) => write!(f, "{name}"),
            Type::Reference(_, fqname, args) => {
                write!(f, "{fqname}")?;
                for arg in args {
                    write!(f, " ({arg})")?;
                }
                Ok(())
            }
            Type::Tuple(_, elems) => {
                f.write_str("(")?;
                write_joined(f, elems, ", ")?;
                f.write_str(")")
            }
            Type::Record(_, fields) => {
                f.write_str("{ ")?;
                write_fields(f, fields)?;
                f.write_str(" }")
            }
            Type::ExtensibleRecord(_, var, fields) => {
                write!(f, "{{ {var} | ")?;
                write_fields(f, fields)?;
                f.write_str(" }")
            }
            Type::Function(_, arg, ret) => write!(f, "({arg}) -> {ret}"),
            Type::Unit(_) => f.write_str("()"),
        }
    }
}

fn write_joined<A>(f: &mut fmt::Formatter<'_>, types: &[Type<A>], sep: &str) -> fmt::Result {
    for (i, t) in types.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{t}")?;
    }
    Ok(())
}

fn write_fields<A>(f: &mut fmt::Formatter<'_>, fields: &[Field<A>]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{} : {}", field.name, field.tpe)?;
    }
    Ok(())
}

fn all_equal<A, F>(left: &[Type<A>], right: &[Type<A>], eq_attr: &F) -> bool
where
    F: Fn(&A, &A) -> bool,
{
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(l, r)| l.equal_with(r, eq_attr))
}

fn fields_equal<A, F>(left: &[Field<A>], right: &[Field<A>], eq_attr: &F) -> bool
where
    F: Fn(&A, &A) -> bool,
{
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(l, r)| l.name == r.name && l.tpe.equal_with(&r.tpe, eq_attr))
}

/// Structural equality ignoring attributes.
pub fn equal_ignoring_attributes<A>(left: &Type<A>, right: &Type<A>) -> bool {
    left.equal_with(right, &|_: &A, _: &A| true)
}

// ---------------------------------------------------------------------------
// Type definitions
// ---------------------------------------------------------------------------

/// One constructor of a custom type: a name and its ordered, named arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor<A> {
    pub name: Name,
    pub args: Vec<(Name, Type<A>)>,
}

impl<A> Constructor<A> {
    pub fn new(name: Name, args: Vec<(Name, Type<A>)>) -> Self {
        Self { name, args }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

/// The definition behind a named type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition<A> {
    TypeAlias {
        params: Vec<Name>,
        tpe: Type<A>,
    },
    CustomType {
        params: Vec<Name>,
        constructors: AccessControlled<Vec<Constructor<A>>>,
    },
}

impl<A> TypeDefinition<A> {
    pub fn params(&self) -> &[Name] {
        match self {
            TypeDefinition::TypeAlias { params, .. } | TypeDefinition::CustomType { params, .. } => {
                params
            }
        }
    }

    /// Find a constructor by name (custom types only).
    pub fn constructor(&self, name: &Name) -> Option<&Constructor<A>> {
        match self {
            TypeDefinition::CustomType { constructors, .. } => {
                constructors.value.iter().find(|c| &c.name == name)
            }
            TypeDefinition::TypeAlias { .. } => None,
        }
    }
}
