// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Literal values.

/// A literal constant inside a [`Value`](crate::Value).
///
/// New literal kinds may be added; consumers must handle the wildcard case.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Literal {
    Bool(bool),
    Char(char),
    String(String),
    WholeNumber(i64),
    Float(f64),
    /// Decimal kept in its textual form to avoid precision loss.
    Decimal(String),
}

impl Literal {
    /// JSON tag used by the v3 codec.
    pub fn tag(&self) -> &'static str {
        match self {
            Literal::Bool(_) => "BoolLiteral",
            Literal::Char(_) => "CharLiteral",
            Literal::String(_) => "StringLiteral",
            Literal::WholeNumber(_) => "WholeNumberLiteral",
            Literal::Float(_) => "FloatLiteral",
            Literal::Decimal(_) => "DecimalLiteral",
        }
    }
}
