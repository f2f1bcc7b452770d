//! Variable and label symbols.
//!
//! Symbols compare by identity, not by name. Two declarations of `x` in
//! different scopes are different variables, and the evaluator's store keys on
//! that identity. Cloning a symbol clones the handle, not the identity.

use crate::types::Type;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[derive(Debug)]
struct VariableData {
    name: String,
    is_read_only: bool,
    ty: Type,
}

/// A declared variable.
#[derive(Clone)]
pub struct VariableSymbol(Arc<VariableData>);

impl VariableSymbol {
    /// Create a new, distinct variable.
    pub fn new(name: impl Into<String>, is_read_only: bool, ty: Type) -> Self {
        Self(Arc::new(VariableData {
            name: name.into(),
            is_read_only,
            ty,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn is_read_only(&self) -> bool {
        self.0.is_read_only
    }

    pub fn ty(&self) -> Type {
        self.0.ty
    }
}

impl PartialEq for VariableSymbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for VariableSymbol {}

impl Hash for VariableSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableSymbol")
            .field("name", &self.0.name)
            .field("is_read_only", &self.0.is_read_only)
            .field("ty", &self.0.ty)
            .finish()
    }
}

impl fmt::Display for VariableSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// A jump target in lowered code.
#[derive(Clone)]
pub struct LabelSymbol(Arc<str>);

impl LabelSymbol {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl PartialEq for LabelSymbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for LabelSymbol {}

impl Hash for LabelSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0) as *const u8, state);
    }
}

impl fmt::Debug for LabelSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LabelSymbol({})", self.0)
    }
}

impl fmt::Display for LabelSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
