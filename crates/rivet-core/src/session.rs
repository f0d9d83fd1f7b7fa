use crate::{
    schema::{app::TypeId, Metamodel},
    value::Instance,
    Error, Result,
};
use std::{marker::PhantomData, rc::Rc};

/// The unit of work that instances are read and written in.
///
/// A session borrows the metamodel it was opened on. It is not `Send`:
/// instances are shared within one thread only.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    metamodel: &'a Metamodel,

    /// Confines the session to the thread that opened it
    _local: PhantomData<Rc<()>>,
}

impl<'a> Session<'a> {
    pub fn new(metamodel: &'a Metamodel) -> Self {
        Self {
            metamodel,
            _local: PhantomData,
        }
    }

    pub fn metamodel(&self) -> &'a Metamodel {
        self.metamodel
    }

    /// Checks that `instance` is of type `owner` or one of its subtypes.
    pub(crate) fn check_instance(&self, owner: TypeId, instance: &Instance) -> Result<()> {
        let app = &self.metamodel.app;

        let ty = app.get_type(instance.class()).map_err(|err| {
            err.context(Error::invalid_value(format!(
                "instance of `{}` cannot be accessed",
                instance.class()
            )))
        })?;

        if !app.is_assignable(ty.id, owner) {
            return Err(Error::invalid_value(format!(
                "expected an instance of `{}`, found `{}`",
                app.ty(owner).class,
                instance.class()
            )));
        }

        Ok(())
    }
}
