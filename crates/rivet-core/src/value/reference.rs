use super::{Instance, Value};
use crate::decl::ClassName;
use by_address::ByAddress;
use std::{
    cell::{BorrowError, Ref, RefCell, RefMut},
    fmt,
    rc::Rc,
};

/// A shared handle to a managed entity instance.
///
/// Handles compare by address: two handles are equal when they point at the
/// same instance, which keeps equality well defined on cyclic graphs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct InstanceRef(ByAddress<Rc<RefCell<Instance>>>);

/// The value held by a to-one association attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// The target instance is in memory
    Loaded(InstanceRef),

    /// Only the target's key is known; the session resolves it on demand
    Hollow { class: ClassName, key: Box<Value> },
}

impl InstanceRef {
    pub fn new(instance: Instance) -> Self {
        Self(ByAddress(Rc::new(RefCell::new(instance))))
    }

    #[track_caller]
    pub fn borrow(&self) -> Ref<'_, Instance> {
        self.0.borrow()
    }

    #[track_caller]
    pub fn borrow_mut(&self) -> RefMut<'_, Instance> {
        self.0.borrow_mut()
    }

    pub fn try_borrow(&self) -> Result<Ref<'_, Instance>, BorrowError> {
        self.0.try_borrow()
    }

    /// Address of the shared instance, usable while it is borrowed.
    pub fn as_ptr(&self) -> *const Instance {
        self.0.as_ptr()
    }

    /// Returns true if the handle points at `instance`.
    pub fn points_at(&self, instance: &Instance) -> bool {
        std::ptr::eq(self.as_ptr(), instance)
    }
}

impl Reference {
    pub fn class(&self) -> ClassName {
        match self {
            Self::Loaded(instance) => instance.borrow().class().clone(),
            Self::Hollow { class, .. } => class.clone(),
        }
    }
}

impl fmt::Debug for InstanceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Instances may reference each other; print the identity only.
        match self.0.try_borrow() {
            Ok(instance) => write!(
                f,
                "InstanceRef({} @ {:p})",
                instance.class(),
                Rc::as_ptr(&self.0)
            ),
            Err(_) => write!(f, "InstanceRef(<borrowed> @ {:p})", Rc::as_ptr(&self.0)),
        }
    }
}
