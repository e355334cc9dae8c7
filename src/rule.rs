use std::fmt;

use tracing::debug;

use crate::action::{BindAction, BindFallibleAction, SemanticAction};
use crate::error::ActionError;
use crate::slot::{ErasedArgs, PassOn, Slot};

enum RuleAction {
    PassOn(usize),
    Bound(SemanticAction),
    Discard,
}

impl fmt::Debug for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleAction::PassOn(index) => write!(f, "PassOn({index})"),
            RuleAction::Bound(_) => write!(f, "Bound(..)"),
            RuleAction::Discard => write!(f, "Discard"),
        }
    }
}

/// A grammar production together with the semantic action that reduces it.
///
/// Until an action is set, the rule's value is its first input slot.
pub struct ParseRule {
    name: String,
    expression: String,
    action: RuleAction,
    on_error: Option<SemanticAction>,
}

impl fmt::Debug for ParseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseRule")
            .field("name", &self.name)
            .field("expression", &self.expression)
            .field("action", &self.action)
            .field("on_error", &self.on_error.as_ref().map(|_| ".."))
            .finish()
    }
}

impl ParseRule {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
            action: RuleAction::PassOn(0),
            on_error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Reduce with `action`, recording its return value.
    ///
    /// ### Example
    /// ```
    /// use semact::{Empty, ParseRule, Slot};
    ///
    /// let mut rule = ParseRule::new("sum", "expr -> expr + term");
    /// rule.set_action(|lhs: i64, _: Empty, rhs: i64| lhs + rhs);
    /// let slot = rule.reduce(vec![Slot::new(2i64), Slot::Empty, Slot::new(3i64)]).unwrap();
    /// assert_eq!(slot.downcast_ref::<i64>(), Some(&5));
    /// ```
    pub fn set_action<S, F: BindAction<S>>(&mut self, action: F) -> &mut Self {
        self.action = RuleAction::Bound(action.bind());
        self
    }

    /// Reduce with `action`, recording a [`SemanticError`](crate::SemanticError) as its payload.
    pub fn set_fallible_action<S, F: BindFallibleAction<S>>(&mut self, action: F) -> &mut Self {
        self.action = RuleAction::Bound(action.bind());
        self
    }

    /// Reduce to the input slot at `index`.
    pub fn pass_on(&mut self, index: usize) -> &mut Self {
        self.action = RuleAction::PassOn(index);
        self
    }

    /// Reduce to an empty slot.
    pub fn discard(&mut self) -> &mut Self {
        self.action = RuleAction::Discard;
        self
    }

    /// Reduce with `action` instead whenever an input slot holds a semantic error payload.
    ///
    /// The action is bound positionally like any other, so it names the slot holding the payload by its type.
    /// Use [`ParseRule::set_semantic_error_handler`] when the payload's position varies.
    pub fn set_semantic_error_action<S, F: BindAction<S>>(&mut self, action: F) -> &mut Self {
        self.on_error = Some(action.bind());
        self
    }

    /// Reduce with `handler` over all the inputs whenever an input slot holds a semantic error payload.
    ///
    /// ### Example
    /// ```
    /// use semact::{ErasedArgs, ParseRule, Slot};
    ///
    /// let mut rule = ParseRule::new("call", "expr -> id ( expr )");
    /// rule.set_semantic_error_handler(|args: ErasedArgs| {
    ///     let (index, _) = args.next_semantic_error(0).expect("dispatched on a payload");
    ///     Ok(Slot::new(format!("error in argument {index}")))
    /// });
    /// ```
    pub fn set_semantic_error_handler<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(ErasedArgs) -> Result<Slot, ActionError> + 'static,
    {
        self.on_error = Some(Box::new(handler));
        self
    }

    pub fn has_semantic_error_action(&self) -> bool {
        self.on_error.is_some()
    }

    /// Run this rule's action over the production's input slots.
    ///
    /// When an input holds a semantic error payload, the semantic error action runs instead.
    /// Without one, the first payload is forwarded as the rule's value.
    pub fn reduce(&self, slots: Vec<Slot>) -> Result<Slot, ActionError> {
        let mut args = ErasedArgs::new(slots);

        if let Some((index, data)) = args.next_semantic_error(0) {
            debug!(rule = %self.name, index, error = %data, "reducing semantic error");
            return match &self.on_error {
                Some(on_error) => on_error(args),
                // Without a handler, the payload itself becomes the rule's value.
                None => args.record(PassOn(index)),
            }
            .map_err(|error| self.annotate(error));
        }

        let outcome = match &self.action {
            RuleAction::PassOn(index) => args.record(PassOn(*index)),
            RuleAction::Bound(action) => action(args),
            RuleAction::Discard => Ok(Slot::Empty),
        };
        debug!(rule = %self.name, ok = outcome.is_ok(), "reduced");
        outcome.map_err(|error| self.annotate(error))
    }

    fn annotate(&self, error: ActionError) -> ActionError {
        match error {
            ActionError::Extract(source) => ActionError::Rule {
                rule: self.name.clone(),
                source,
            },
            error => error,
        }
    }
}
