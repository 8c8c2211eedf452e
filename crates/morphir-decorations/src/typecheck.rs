// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type inference and checking of decoration values.
//!
//! Values are plain data, so inference is syntax-directed:
//!
//! | Value | Inferred type |
//! |-------|---------------|
//! | literal | matching `Morphir.SDK` primitive |
//! | record / tuple | structural, element-wise |
//! | list | `List` of the first element's type, `List a` when empty |
//! | unit | `()` |
//! | constructor, possibly applied | reference to the owning custom type |

use morphir_ir::{
    equal_ignoring_attributes, sdk, Constructor, FQName, Field, Literal, Name, Type,
    TypeDefinition, Value,
};
use thiserror::Error;

use crate::schema::{extract_decoration_type, validate_entry_point, DecorationIr, EntryPoint, EntryPointError};

// ---------------------------------------------------------------------------
// TypeCheckError
// ---------------------------------------------------------------------------

/// Why a value does not conform to the expected type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypeCheckError {
    #[error("type mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: Type<()>, actual: Type<()> },

    #[error("expected a value of type {expected}, got {actual}")]
    NotExpectedCustomType { expected: FQName, actual: Type<()> },

    #[error(
        "constructor {constructor} requires {arity} argument(s) but none were provided \
         (partial application not allowed for decoration values)"
    )]
    PartialApplication { constructor: FQName, arity: usize },

    #[error("constructor {constructor} expects {expected} argument(s), got {actual}")]
    ArityMismatch {
        constructor: FQName,
        expected: usize,
        actual: usize,
    },

    #[error("argument {index} of {constructor}: expected {expected}, got {actual}")]
    ArgumentMismatch {
        constructor: FQName,
        index: usize,
        expected: Type<()>,
        actual: Type<()>,
    },

    #[error("constructor {0} not found in decoration IR")]
    ConstructorNotFound(FQName),

    #[error("cannot infer type of non-constructor application (base is {0})")]
    NotAConstructorApplication(&'static str),

    #[error("unsupported value for type inference: {0}")]
    UnsupportedValue(&'static str),

    #[error("field {field:?}: {source}")]
    InField {
        field: String,
        #[source]
        source: Box<TypeCheckError>,
    },

    #[error("element {index}: {source}")]
    InElement {
        index: usize,
        #[source]
        source: Box<TypeCheckError>,
    },
}

impl TypeCheckError {
    fn in_field(name: &Name, source: TypeCheckError) -> Self {
        TypeCheckError::InField {
            field: name.to_camel_case(),
            source: Box::new(source),
        }
    }

    fn in_element(index: usize, source: TypeCheckError) -> Self {
        TypeCheckError::InElement {
            index,
            source: Box::new(source),
        }
    }
}

// ---------------------------------------------------------------------------
// TypeChecker
// ---------------------------------------------------------------------------

/// Checks values against the type named by one entry point of one schema.
#[derive(Debug, Clone)]
pub struct TypeChecker {
    dec_ir: DecorationIr,
    entry_point: EntryPoint,
    expected: TypeDefinition<()>,
}

impl TypeChecker {
    /// Fails when the entry point does not resolve.
    pub fn new(dec_ir: &DecorationIr, entry_point: &str) -> Result<Self, EntryPointError> {
        let ep = validate_entry_point(dec_ir, entry_point)?;
        let expected = extract_decoration_type(dec_ir, entry_point)?.clone();
        Ok(Self {
            dec_ir: dec_ir.clone(),
            entry_point: ep,
            expected,
        })
    }

    pub fn expected_type(&self) -> &TypeDefinition<()> {
        &self.expected
    }

    pub fn entry_point(&self) -> &EntryPoint {
        &self.entry_point
    }

    /// Infer the value's type and match it against the expected definition.
    pub fn check_value_type(&self, value: &Value<()>) -> Result<(), TypeCheckError> {
        let actual = self.infer_value_type(value)?;
        match &self.expected {
            TypeDefinition::TypeAlias { tpe, .. } => {
                if equal_ignoring_attributes(tpe, &actual) {
                    Ok(())
                } else {
                    Err(TypeCheckError::Mismatch {
                        expected: tpe.clone(),
                        actual,
                    })
                }
            }
            TypeDefinition::CustomType { .. } => {
                let expected = FQName::new(
                    self.dec_ir.package_name().clone(),
                    self.entry_point.module().clone(),
                    self.entry_point.local_name().clone(),
                );
                match &actual {
                    Type::Reference(_, fqname, _) if *fqname == expected => Ok(()),
                    _ => Err(TypeCheckError::NotExpectedCustomType { expected, actual }),
                }
            }
        }
    }

    /// Structural type of a value.
    pub fn infer_value_type(&self, value: &Value<()>) -> Result<Type<()>, TypeCheckError> {
        match value {
            Value::Literal(_, lit) => Ok(infer_literal_type(lit)),
            Value::Record(_, fields) => {
                let fields = fields
                    .iter()
                    .map(|(name, v)| {
                        self.infer_value_type(v)
                            .map(|t| Field::new(name.clone(), t))
                            .map_err(|e| TypeCheckError::in_field(name, e))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Type::Record((), fields))
            }
            Value::Tuple(_, elems) => {
                let elems = elems
                    .iter()
                    .enumerate()
                    .map(|(i, v)| {
                        self.infer_value_type(v)
                            .map_err(|e| TypeCheckError::in_element(i, e))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Type::Tuple((), elems))
            }
            Value::List(_, items) => match items.first() {
                // Homogeneity is assumed; only the head is inspected.
                Some(head) => {
                    let item = self
                        .infer_value_type(head)
                        .map_err(|e| TypeCheckError::in_element(0, e))?;
                    Ok(sdk::list_type(item))
                }
                None => Ok(sdk::list_type(sdk::variable("a"))),
            },
            Value::Unit(_) => Ok(Type::Unit(())),
            Value::Constructor(_, fqname) => {
                let (type_name, ctor) = self.lookup_constructor(fqname)?;
                if ctor.arity() > 0 {
                    return Err(TypeCheckError::PartialApplication {
                        constructor: fqname.clone(),
                        arity: ctor.arity(),
                    });
                }
                Ok(self.owning_type(fqname, type_name))
            }
            Value::Apply(..) => self.infer_apply_type(value),
            other => Err(TypeCheckError::UnsupportedValue(other.kind())),
        }
    }

    fn infer_apply_type(&self, value: &Value<()>) -> Result<Type<()>, TypeCheckError> {
        let (fqname, args) = unwrap_constructor_application(value)?;
        let (type_name, ctor) = self.lookup_constructor(fqname)?;

        if args.len() != ctor.arity() {
            return Err(TypeCheckError::ArityMismatch {
                constructor: fqname.clone(),
                expected: ctor.arity(),
                actual: args.len(),
            });
        }

        for (index, (arg, (_, expected))) in args.iter().zip(&ctor.args).enumerate() {
            let actual = self
                .infer_value_type(arg)
                .map_err(|e| TypeCheckError::in_element(index, e))?;
            if !equal_ignoring_attributes(expected, &actual) {
                return Err(TypeCheckError::ArgumentMismatch {
                    constructor: fqname.clone(),
                    index,
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        Ok(self.owning_type(fqname, type_name))
    }

    /// Find a constructor by module path and local name among the schema's
    /// modules. Returns the owning type's name.
    fn lookup_constructor(
        &self,
        fqname: &FQName,
    ) -> Result<(&Name, &Constructor<()>), TypeCheckError> {
        if fqname.package_path() != self.dec_ir.package_name() {
            return Err(TypeCheckError::ConstructorNotFound(fqname.clone()));
        }
        self.dec_ir
            .distribution()
            .module(fqname.module_path())
            .and_then(|module| module.constructor(fqname.local_name()))
            .ok_or_else(|| TypeCheckError::ConstructorNotFound(fqname.clone()))
    }

    fn owning_type(&self, ctor: &FQName, type_name: &Name) -> Type<()> {
        Type::Reference(
            (),
            FQName::new(
                self.dec_ir.package_name().clone(),
                ctor.module_path().clone(),
                type_name.clone(),
            ),
            Vec::new(),
        )
    }
}

fn infer_literal_type(lit: &Literal) -> Type<()> {
    match lit {
        Literal::Bool(_) => sdk::bool_type(),
        Literal::String(_) => sdk::string_type(),
        Literal::Char(_) => sdk::char_type(),
        Literal::WholeNumber(_) => sdk::int_type(),
        Literal::Float(_) => sdk::float_type(),
        Literal::Decimal(_) => sdk::decimal_type(),
        _ => sdk::variable("unknown"),
    }
}

/// Peel `Apply` nodes right to left down to the base constructor.
///
/// `Apply(Apply(C, a), b)` yields `(C, [a, b])`.
fn unwrap_constructor_application(
    value: &Value<()>,
) -> Result<(&FQName, Vec<&Value<()>>), TypeCheckError> {
    let mut args = Vec::new();
    let mut current = value;
    while let Value::Apply(_, function, arg) = current {
        args.push(arg.as_ref());
        current = function.as_ref();
    }
    args.reverse();

    match current {
        Value::Constructor(_, fqname) => Ok((fqname, args)),
        other => Err(TypeCheckError::NotAConstructorApplication(other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{rich_schema, MODULE, PACKAGE};

    fn checker(local: &str) -> TypeChecker {
        TypeChecker::new(&rich_schema(), &format!("{PACKAGE}:{MODULE}:{local}")).unwrap()
    }

    fn string(s: &str) -> Value<()> {
        Value::Literal((), Literal::String(s.to_string()))
    }

    fn int(n: i64) -> Value<()> {
        Value::Literal((), Literal::WholeNumber(n))
    }

    fn ctor(local: &str) -> Value<()> {
        Value::Constructor((), FQName::from_strs(PACKAGE, MODULE, local))
    }

    fn record(fields: Vec<(&str, Value<()>)>) -> Value<()> {
        Value::Record(
            (),
            fields.into_iter().map(|(n, v)| (Name::parse(n), v)).collect(),
        )
    }

    #[test]
    fn test_new_rejects_bad_entry_point() {
        assert!(TypeChecker::new(&rich_schema(), "My.Decoration:Foo:missing").is_err());
        assert!(TypeChecker::new(&rich_schema(), "bad").is_err());
    }

    #[test]
    fn test_expected_type_is_resolved() {
        assert!(matches!(
            checker("color").expected_type(),
            TypeDefinition::CustomType { .. }
        ));
    }

    #[test]
    fn test_unit_matches_unit_alias() {
        checker("shape").check_value_type(&Value::Unit(())).unwrap();
        assert!(checker("shape").check_value_type(&string("x")).is_err());
    }

    #[test]
    fn test_string_matches_string_alias() {
        checker("label").check_value_type(&string("hello")).unwrap();
        let err = checker("label").check_value_type(&int(1)).unwrap_err();
        assert!(matches!(err, TypeCheckError::Mismatch { .. }));
    }

    #[test]
    fn test_literal_inference() {
        let tc = checker("shape");
        let cases = [
            (Literal::Bool(true), sdk::bool_type()),
            (Literal::Char('c'), sdk::char_type()),
            (Literal::Float(1.5), sdk::float_type()),
            (Literal::Decimal("1.25".into()), sdk::decimal_type()),
        ];
        for (lit, expected) in cases {
            assert_eq!(tc.infer_value_type(&Value::Literal((), lit)).unwrap(), expected);
        }
    }

    #[test]
    fn test_record_field_order_is_significant() {
        let tc = checker("entry");
        tc.check_value_type(&record(vec![("name", string("a")), ("value", int(1))]))
            .unwrap();
        assert!(tc
            .check_value_type(&record(vec![("value", int(1)), ("name", string("a"))]))
            .is_err());
        assert!(tc
            .check_value_type(&record(vec![("name", string("a")), ("value", string("1"))]))
            .is_err());
    }

    #[test]
    fn test_list_inference() {
        let tc = checker("tags");
        tc.check_value_type(&Value::List((), vec![string("a"), string("b")]))
            .unwrap();
        // Only the head is inspected.
        tc.check_value_type(&Value::List((), vec![string("a"), int(2)]))
            .unwrap();
        assert_eq!(
            tc.infer_value_type(&Value::List((), vec![])).unwrap(),
            sdk::list_type(sdk::variable("a"))
        );
        assert!(tc.check_value_type(&Value::List((), vec![])).is_err());
    }

    #[test]
    fn test_tuple_inference() {
        let tc = checker("pair");
        let ok = Value::Tuple(
            (),
            vec![
                Value::Literal((), Literal::Bool(true)),
                Value::Literal((), Literal::Float(0.5)),
            ],
        );
        tc.check_value_type(&ok).unwrap();
        let swapped = Value::Tuple(
            (),
            vec![
                Value::Literal((), Literal::Float(0.5)),
                Value::Literal((), Literal::Bool(true)),
            ],
        );
        assert!(tc.check_value_type(&swapped).is_err());
    }

    #[test]
    fn test_nullary_constructor() {
        checker("color").check_value_type(&ctor("red")).unwrap();
    }

    #[test]
    fn test_constructor_partial_application() {
        let err = checker("color").check_value_type(&ctor("custom")).unwrap_err();
        assert!(matches!(err, TypeCheckError::PartialApplication { arity: 1, .. }));
    }

    #[test]
    fn test_constructor_argument_mismatch() {
        let value = Value::apply_all(ctor("custom"), [int(3)]);
        let err = checker("color").check_value_type(&value).unwrap_err();
        assert!(matches!(err, TypeCheckError::ArgumentMismatch { index: 0, .. }));
    }

    #[test]
    fn test_constructor_application_succeeds() {
        let value = Value::apply_all(ctor("custom"), [string("#fff")]);
        checker("color").check_value_type(&value).unwrap();
    }

    #[test]
    fn test_curried_constructor_arity() {
        let tc = checker("range");
        tc.check_value_type(&Value::apply_all(ctor("between"), [int(1), int(5)]))
            .unwrap();
        let err = tc
            .check_value_type(&Value::apply_all(ctor("between"), [int(1)]))
            .unwrap_err();
        assert!(matches!(
            err,
            TypeCheckError::ArityMismatch { expected: 2, actual: 1, .. }
        ));
        let err = tc
            .check_value_type(&Value::apply_all(ctor("between"), [int(1), int(2), int(3)]))
            .unwrap_err();
        assert!(matches!(err, TypeCheckError::ArityMismatch { actual: 3, .. }));
    }

    #[test]
    fn test_constructor_of_other_type_is_rejected() {
        // `high` belongs to `level`, not `color`.
        let err = checker("color").check_value_type(&ctor("high")).unwrap_err();
        assert!(matches!(err, TypeCheckError::NotExpectedCustomType { .. }));
    }

    #[test]
    fn test_unknown_constructor() {
        let err = checker("color").check_value_type(&ctor("blue")).unwrap_err();
        assert!(matches!(err, TypeCheckError::ConstructorNotFound(_)));
    }

    #[test]
    fn test_constructor_from_other_package_is_rejected() {
        let foreign = Value::Constructor((), FQName::from_strs("Other.Pkg", MODULE, "red"));
        let err = checker("color").check_value_type(&foreign).unwrap_err();
        assert!(matches!(err, TypeCheckError::ConstructorNotFound(_)));

        let applied = Value::apply_all(
            Value::Constructor((), FQName::from_strs("Other.Pkg", MODULE, "custom")),
            [string("#fff")],
        );
        let err = checker("color").check_value_type(&applied).unwrap_err();
        assert!(matches!(err, TypeCheckError::ConstructorNotFound(_)));
    }

    #[test]
    fn test_unsupported_values() {
        let tc = checker("shape");
        let var = Value::Variable((), Name::parse("x"));
        assert_eq!(
            tc.infer_value_type(&var),
            Err(TypeCheckError::UnsupportedValue("Variable"))
        );
        let apply = Value::apply_all(var, [int(1)]);
        assert_eq!(
            tc.infer_value_type(&apply),
            Err(TypeCheckError::NotAConstructorApplication("Variable"))
        );
    }

    #[test]
    fn test_nested_errors_carry_context() {
        let value = record(vec![("name", Value::Variable((), Name::parse("x")))]);
        let err = checker("entry").check_value_type(&value).unwrap_err();
        assert!(err.to_string().starts_with("field \"name\""));
        assert!(std::error::Error::source(&err).is_some());
    }
}
