use crate::error::ActionError;
use crate::slot::{ErasedArgs, Slot};

/// A semantic action with its argument types erased.
pub type SemanticAction = Box<dyn Fn(ErasedArgs) -> Result<Slot, ActionError>>;

/// Behaviour to erase a callback whose result is recorded as is.
///
/// `Signature` is the callback's `fn(Arg0, ..) -> Ret` type.
/// It only selects between the implementations for each arity, which are generated for callbacks of 1 through 16 arguments.
pub trait BindAction<Signature> {
    fn bind(self) -> SemanticAction;
}

/// Behaviour to erase a callback returning `Result<Ret, ActionError>`.
///
/// A [`SemanticError`](crate::SemanticError) is recorded as its [`ErrorData`](crate::ErrorData) payload in place of the value.
/// Any other error fails the reduction.
pub trait BindFallibleAction<Signature> {
    fn bind(self) -> SemanticAction;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ErrorData, ExtractError, SemanticError};
    use crate::slot::Empty;

    fn erase<S>(action: impl BindAction<S>) -> SemanticAction {
        action.bind()
    }

    fn erase_fallible<S>(action: impl BindFallibleAction<S>) -> SemanticAction {
        action.bind()
    }

    #[test]
    fn bind_unary() {
        // Setup
        let action = erase(|value: i32| value * 2);

        // Execute
        let slot = action(ErasedArgs::new(vec![Slot::new(21i32)])).unwrap();

        // Verify
        assert_eq!(slot.downcast_ref::<i32>(), Some(&42));
    }

    #[test]
    fn bind_sixteen() {
        // Setup
        #[rustfmt::skip]
        let action = erase(
            |a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8, h: u8,
             i: u8, j: u8, k: u8, l: u8, m: u8, n: u8, o: u8, p: u8| {
                [a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p]
                    .iter()
                    .map(|v| *v as u32)
                    .sum::<u32>()
            },
        );
        let slots = (1..=16u8).map(Slot::new).collect();

        // Execute
        let slot = action(ErasedArgs::new(slots)).unwrap();

        // Verify
        assert_eq!(slot.downcast_ref::<u32>(), Some(&136));
    }

    #[test]
    fn bind_extract_failure() {
        // Setup
        let action = erase(|_: Empty, value: String| value.len());

        // Execute
        let result = action(ErasedArgs::new(vec![Slot::Empty, Slot::new(3usize)]));

        // Verify
        assert_matches!(
            result,
            Err(ActionError::Extract(ExtractError::TypeMismatch { index: 1, .. }))
        );
    }

    #[test]
    fn bind_fallible_ok() {
        // Setup
        let action = erase_fallible(|a: i32, b: i32| -> Result<i32, ActionError> { Ok(a - b) });

        // Execute
        let slot = action(ErasedArgs::new(vec![Slot::new(5i32), Slot::new(3i32)])).unwrap();

        // Verify
        assert_eq!(slot.downcast_ref::<i32>(), Some(&2));
    }

    #[test]
    fn bind_fallible_semantic() {
        // Setup
        let action = erase_fallible(|name: String| -> Result<i32, ActionError> {
            Err(SemanticError::new(format!("undeclared '{name}'")).into())
        });

        // Execute
        let slot = action(ErasedArgs::new(vec![Slot::new("x".to_string())])).unwrap();

        // Verify
        assert_eq!(
            slot.downcast_ref::<ErrorData>(),
            Some(&ErrorData {
                code: ErrorCode::SemanticError,
                message: Some("undeclared 'x'".to_string()),
            })
        );
    }

    #[test]
    fn bind_fallible_failed() {
        // Setup
        let action = erase_fallible(|_: Empty| -> Result<(), ActionError> {
            Err(ActionError::other("io"))
        });

        // Execute
        let result = action(ErasedArgs::new(vec![Slot::Empty]));

        // Verify
        assert_matches!(result, Err(ActionError::Failed(_)));
    }
}
