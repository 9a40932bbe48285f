//! Compile-time tags distinguishing expression categories.
//!
//! Tags are never instantiated; they only appear as the type parameter of
//! [`Expr`](super::Expr).

use std::marker::PhantomData;

mod private {
    pub trait Sealed {}
}

/// Marker trait for expression tags. Sealed.
pub trait SqlTypeTag: private::Sealed + 'static {}

/// Marker trait for scalar tags ([`AnyScalar`] and [`Scalar<X>`]).
pub trait ScalarTag: SqlTypeTag {}

/// Marker trait for relation tags ([`AnyRelation`] and [`Relation<X>`]).
pub trait RelationTag: SqlTypeTag {}

/// A scalar of unknown value type. Produced by `boxed()`.
#[derive(Debug)]
pub enum AnyScalar {}

/// A scalar holding values of type `X`.
#[derive(Debug)]
pub struct Scalar<X>(PhantomData<fn() -> X>);

/// A relation of unknown row type.
#[derive(Debug)]
pub enum AnyRelation {}

/// A relation whose rows are `X`.
#[derive(Debug)]
pub struct Relation<X>(PhantomData<fn() -> X>);

impl private::Sealed for AnyScalar {}
impl<X: 'static> private::Sealed for Scalar<X> {}
impl private::Sealed for AnyRelation {}
impl<X: 'static> private::Sealed for Relation<X> {}

impl SqlTypeTag for AnyScalar {}
impl<X: 'static> SqlTypeTag for Scalar<X> {}
impl SqlTypeTag for AnyRelation {}
impl<X: 'static> SqlTypeTag for Relation<X> {}

impl ScalarTag for AnyScalar {}
impl<X: 'static> ScalarTag for Scalar<X> {}
impl RelationTag for AnyRelation {}
impl<X: 'static> RelationTag for Relation<X> {}
