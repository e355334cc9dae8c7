use std::any::{type_name, Any, TypeId};

use crate::error::{ActionError, ErrorData, ExtractError};

/// The placeholder for a slot that carries no value, such as a terminal without attribute.
///
/// Extracting `Empty` succeeds on empty slots; extracting any other type from one fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Empty;

/// Returned from an action to forward the input slot at `.0` as the rule's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PassOn(pub usize);

/// One type-erased value on the reduction stack.
#[derive(Debug, Default)]
pub enum Slot {
    #[default]
    Empty,
    Value {
        type_name: &'static str,
        value: Box<dyn Any>,
    },
}

impl Slot {
    pub fn new<T: Any>(value: T) -> Self {
        Slot::Value {
            type_name: type_name::<T>(),
            value: Box::new(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// The name of the stored type, or `None` for an empty slot.
    pub fn type_name(&self) -> Option<&'static str> {
        match self {
            Slot::Empty => None,
            Slot::Value { type_name, .. } => Some(*type_name),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Slot::Empty => None,
            Slot::Value { value, .. } => value.downcast_ref::<T>(),
        }
    }
}

/// The positional inputs of one reduction.
///
/// Positions are absolute: argument `i` of an action is slot `i` of the reduced production.
#[derive(Debug, Default)]
pub struct ErasedArgs {
    slots: Vec<Slot>,
}

impl ErasedArgs {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Move the argument at `index` out as a `T`.
    ///
    /// The slot is left empty on success, and untouched on a type mismatch.
    pub fn take<T: Any>(&mut self, index: usize) -> Result<T, ExtractError> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ExtractError::OutOfRange { index, len })?;

        match std::mem::take(slot) {
            Slot::Empty => {
                let placeholder: Box<dyn Any> = Box::new(Empty);
                placeholder
                    .downcast::<T>()
                    .map(|value| *value)
                    .map_err(|_| ExtractError::EmptySlot {
                        index,
                        expected: type_name::<T>(),
                    })
            }
            Slot::Value {
                type_name: found,
                value,
            } => match value.downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(value) => {
                    *slot = Slot::Value {
                        type_name: found,
                        value,
                    };
                    Err(ExtractError::TypeMismatch {
                        index,
                        expected: type_name::<T>(),
                        found,
                    })
                }
            },
        }
    }

    /// Reconstruct the argument at `index` for an action returning `R`.
    ///
    /// When `R` is [`PassOn`] the slot is cloned, so the input the action forwards is still intact.
    /// Otherwise the value is moved out, as with [`ErasedArgs::take`].
    pub fn extract<T: Any + Clone, R: Any>(&mut self, index: usize) -> Result<T, ExtractError> {
        if TypeId::of::<R>() != TypeId::of::<PassOn>() {
            return self.take(index);
        }

        if let Some(Slot::Value {
            type_name: found,
            value,
        }) = self.slots.get(index)
        {
            return value
                .downcast_ref::<T>()
                .cloned()
                .ok_or(ExtractError::TypeMismatch {
                    index,
                    expected: type_name::<T>(),
                    found: *found,
                });
        }

        // Empty and out of range slots are left as they are.
        self.take(index)
    }

    /// Adapt an action's return value into the rule's slot.
    ///
    /// [`PassOn`] forwards the indexed input slot; [`Empty`] and `()` record nothing.
    pub fn record<R: Any>(&mut self, ret: R) -> Result<Slot, ActionError> {
        let ret: Box<dyn Any> = Box::new(ret);
        let ret = match ret.downcast::<PassOn>() {
            Ok(pass_on) => return Ok(self.forward(pass_on.0)?),
            Err(ret) => ret,
        };

        if ret.is::<Empty>() || ret.is::<()>() {
            return Ok(Slot::Empty);
        }

        Ok(Slot::Value {
            type_name: type_name::<R>(),
            value: ret,
        })
    }

    pub(crate) fn forward(&mut self, index: usize) -> Result<Slot, ExtractError> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .map(std::mem::take)
            .ok_or(ExtractError::OutOfRange { index, len })
    }

    /// The first slot at or after `from` holding a semantic error payload.
    pub fn next_semantic_error(&self, from: usize) -> Option<(usize, &ErrorData)> {
        self.slots
            .iter()
            .enumerate()
            .skip(from)
            .find_map(|(index, slot)| {
                slot.downcast_ref::<ErrorData>()
                    .filter(|data| data.is_semantic_error())
                    .map(|data| (index, data))
            })
    }

    pub fn has_semantic_error(&self) -> bool {
        self.next_semantic_error(0).is_some()
    }
}

impl From<Vec<Slot>> for ErasedArgs {
    fn from(slots: Vec<Slot>) -> Self {
        ErasedArgs::new(slots)
    }
}
