//! Owner-side list of live registrations (DOM listeners on the web).
//!
//! Callbacks that outlive a synchronous setup step, such as a permission
//! prompt resolving later, get a [`RegistryHandle`]. Once the owner calls
//! [`Registry::close`], late pushes are refused and the item is handed back
//! so the caller can drop it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug)]
pub struct Registry<T> {
    items: Option<Rc<RefCell<Vec<T>>>>,
}

#[derive(Debug)]
pub struct RegistryHandle<T> {
    items: Weak<RefCell<Vec<T>>>,
}

impl<T> Clone for RegistryHandle<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            items: Some(Rc::new(RefCell::new(Vec::new()))),
        }
    }

    pub fn is_open(&self) -> bool {
        self.items.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, |items| items.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add an item. Returns it back if the registry is already closed.
    pub fn push(&self, item: T) -> Result<(), T> {
        match &self.items {
            Some(items) => {
                items.borrow_mut().push(item);
                Ok(())
            }
            None => Err(item),
        }
    }

    /// A handle that stops accepting items once this registry is closed.
    pub fn handle(&self) -> RegistryHandle<T> {
        RegistryHandle {
            items: self.items.as_ref().map_or_else(Weak::new, Rc::downgrade),
        }
    }

    /// Drop every item and refuse later pushes. Returns how many were dropped.
    pub fn close(&mut self) -> usize {
        let Some(items) = self.items.take() else {
            return 0;
        };
        // Drained items drop outside the borrow.
        let drained = std::mem::take(&mut *items.borrow_mut());
        drained.len()
    }
}

impl<T> RegistryHandle<T> {
    pub fn is_live(&self) -> bool {
        self.items.strong_count() > 0
    }

    /// Add an item if the owner is still open, otherwise hand it back.
    pub fn push(&self, item: T) -> Result<(), T> {
        match self.items.upgrade() {
            Some(items) => {
                items.borrow_mut().push(item);
                Ok(())
            }
            None => Err(item),
        }
    }
}
