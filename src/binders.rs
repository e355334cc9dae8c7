// One `BindAction` and one `BindFallibleAction` implementation per callback arity.
use crate::action::{BindAction, BindFallibleAction, SemanticAction};
use crate::error::ActionError;
use crate::slot::{ErasedArgs, Slot};

semact_derive::binders!(plain, 16);
semact_derive::binders!(capturing, 16);
