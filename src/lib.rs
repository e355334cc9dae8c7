//! `semact` binds strongly-typed semantic actions to the rules of a grammar-driven parser.
//!
//! A parser reduces each production over a stack of values whose types vary from rule to rule.
//! `semact` keeps that stack type-erased (one [`Slot`] per symbol), yet lets each rule's action be written as an ordinary closure over concrete types:
//! ```
//! use semact::{Empty, ParseRule, Slot};
//!
//! let mut rule = ParseRule::new("sum", "expr -> expr + term");
//! rule.set_action(|lhs: i64, _plus: Empty, rhs: i64| lhs + rhs);
//!
//! let slot = rule.reduce(vec![Slot::new(2i64), Slot::Empty, Slot::new(3i64)]).unwrap();
//! assert_eq!(slot.downcast_ref::<i64>(), Some(&5));
//! ```
//!
//! # Binding
//! Rust has no variadic generics.
//! Instead, [`BindAction`] and [`BindFallibleAction`] are implemented once per callback arity, for 1 through 16 arguments.
//! These implementations are generated by `semact_gen` (see its `semact-gen` command line tool), and expanded in this crate via the `semact_derive::binders!` macro.
//!
//! A bound action:
//! * Reconstructs argument `i` from slot `i` of the reduced production, failing with [`ExtractError`] when the slot holds another type.
//! Positions are absolute, so terminals without value are skipped by taking them as [`Empty`].
//! * Calls the callback.
//! * Records the return value into the rule's slot.
//! Returning [`PassOn`] forwards an input slot; returning [`Empty`] or `()` records nothing.
//!
//! Argument types are `Clone`.
//! Arguments are moved out of their slots, except for actions returning [`PassOn`], whose arguments are cloned so the forwarded input is intact.
//!
//! # Semantic errors
//! An action set via [`ParseRule::set_fallible_action`] returns `Result<Ret, ActionError>`.
//! When it fails with a [`SemanticError`], the error's [`ErrorData`] is recorded in place of the value and parsing continues.
//! A rule reducing over such a payload forwards it as its own value, unless it reacts through [`ParseRule::set_semantic_error_action`] or [`ParseRule::set_semantic_error_handler`]:
//! ```
//! use semact::{ActionError, ErrorData, ParseRule, SemanticError, Slot};
//!
//! let mut lookup = ParseRule::new("lookup", "expr -> id");
//! lookup.set_fallible_action(|name: String| -> Result<i64, ActionError> {
//!     Err(SemanticError::new(format!("undeclared '{name}'")).into())
//! });
//! let mut negate = ParseRule::new("negate", "expr -> expr");
//! negate
//!     .set_action(|value: i64| -value)
//!     .set_semantic_error_action(|error: ErrorData| error);
//!
//! let slot = lookup.reduce(vec![Slot::new("x".to_string())]).unwrap();
//! let slot = negate.reduce(vec![slot]).unwrap();
//! assert!(slot.downcast_ref::<ErrorData>().is_some());
//! ```
//!
//! Any other failure ([`ActionError::Failed`]) propagates out of [`ParseRule::reduce`].
mod action;
mod binders;
mod error;
mod rule;
mod slot;

pub use action::{BindAction, BindFallibleAction, SemanticAction};
pub use error::{ActionError, ErrorCode, ErrorData, ExtractError, SemanticError};
pub use rule::ParseRule;
pub use slot::{Empty, ErasedArgs, PassOn, Slot};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
