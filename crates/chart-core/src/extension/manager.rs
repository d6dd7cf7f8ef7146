// File: crates/chart-core/src/extension/manager.rs
// Summary: Side table pairing datasets with externally held extensions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::label::DatasetLabelExtension;
use super::selection::DatasetSelectionExtension;
use crate::dataset::{Dataset, DatasetId};

/// Extension capability a dataset can be queried for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Selection,
    /// Selection that can also enumerate its positions.
    IterableSelection,
    Label,
}

/// An extension as stored in (or returned from) the manager.
#[derive(Clone)]
pub enum ExtensionHandle {
    Selection(Rc<dyn DatasetSelectionExtension>),
    Label(Rc<dyn DatasetLabelExtension>),
}

impl ExtensionHandle {
    pub fn dataset_id(&self) -> DatasetId {
        match self {
            Self::Selection(ext) => ext.dataset_id(),
            Self::Label(ext) => ext.dataset_id(),
        }
    }

    pub fn is_attached(&self) -> bool {
        match self {
            Self::Selection(ext) => ext.is_attached(),
            Self::Label(ext) => ext.is_attached(),
        }
    }

    fn slot(&self) -> Slot {
        match self {
            Self::Selection(_) => Slot::Selection,
            Self::Label(_) => Slot::Label,
        }
    }

    fn satisfies(&self, capability: Capability) -> bool {
        match (self, capability) {
            (Self::Selection(_), Capability::Selection) => true,
            (Self::Selection(ext), Capability::IterableSelection) => ext.as_iterable().is_some(),
            (Self::Label(_), Capability::Label) => true,
            _ => false,
        }
    }
}

impl From<Rc<dyn DatasetSelectionExtension>> for ExtensionHandle {
    fn from(ext: Rc<dyn DatasetSelectionExtension>) -> Self { Self::Selection(ext) }
}

impl From<Rc<dyn DatasetLabelExtension>> for ExtensionHandle {
    fn from(ext: Rc<dyn DatasetLabelExtension>) -> Self { Self::Label(ext) }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Slot {
    Selection,
    Label,
}

impl From<Capability> for Slot {
    fn from(c: Capability) -> Self {
        match c {
            Capability::Selection | Capability::IterableSelection => Slot::Selection,
            Capability::Label => Slot::Label,
        }
    }
}

/// Registry of extensions for datasets that do not carry them natively.
///
/// Purely a lookup table: holds extensions, never datasets. Native support on
/// the dataset always takes precedence over a registered extension. Entries
/// whose dataset has been dropped are pruned on every registration.
#[derive(Default)]
pub struct DatasetExtensionManager {
    registry: RefCell<HashMap<(DatasetId, Slot), ExtensionHandle>>,
}

impl DatasetExtensionManager {
    pub fn new() -> Self { Self::default() }

    /// Register `extension` for its owning dataset, replacing any earlier
    /// extension with the same capability.
    pub fn register(&self, extension: impl Into<ExtensionHandle>) {
        self.prune();
        let handle = extension.into();
        let key = (handle.dataset_id(), handle.slot());
        if self.registry.borrow_mut().insert(key, handle).is_some() {
            log::debug!("replaced extension registered for dataset {}", key.0.get());
        }
    }

    pub fn register_selection(&self, extension: Rc<dyn DatasetSelectionExtension>) {
        self.register(extension);
    }

    pub fn register_label(&self, extension: Rc<dyn DatasetLabelExtension>) {
        self.register(extension);
    }

    /// Drop extensions whose dataset no longer exists; returns how many.
    pub fn prune(&self) -> usize {
        let mut registry = self.registry.borrow_mut();
        let before = registry.len();
        registry.retain(|_, handle| handle.is_attached());
        let pruned = before - registry.len();
        if pruned > 0 {
            log::debug!("pruned {pruned} extension(s) of dropped datasets");
        }
        pruned
    }

    pub fn unregister(&self, dataset: DatasetId, capability: Capability) -> Option<ExtensionHandle> {
        self.registry.borrow_mut().remove(&(dataset, capability.into()))
    }

    pub fn supports(&self, dataset: &dyn Dataset, capability: Capability) -> bool {
        self.extension(dataset, capability).is_some()
    }

    /// Native extension if the dataset has one, else the registered one.
    /// `None` when neither satisfies `capability`.
    pub fn extension(&self, dataset: &dyn Dataset, capability: Capability) -> Option<ExtensionHandle> {
        let native = match Slot::from(capability) {
            Slot::Selection => dataset.selection_extension().map(ExtensionHandle::Selection),
            Slot::Label => dataset.label_extension().map(ExtensionHandle::Label),
        };
        if let Some(handle) = native.filter(|h| h.satisfies(capability)) {
            return Some(handle);
        }
        self.registry
            .borrow()
            .get(&(dataset.id(), capability.into()))
            .filter(|h| h.satisfies(capability))
            .cloned()
    }

    pub fn selection_extension(&self, dataset: &dyn Dataset) -> Option<Rc<dyn DatasetSelectionExtension>> {
        match self.extension(dataset, Capability::Selection)? {
            ExtensionHandle::Selection(ext) => Some(ext),
            ExtensionHandle::Label(_) => None,
        }
    }

    pub fn label_extension(&self, dataset: &dyn Dataset) -> Option<Rc<dyn DatasetLabelExtension>> {
        match self.extension(dataset, Capability::Label)? {
            ExtensionHandle::Label(ext) => Some(ext),
            ExtensionHandle::Selection(_) => None,
        }
    }

    pub fn len(&self) -> usize { self.registry.borrow().len() }

    pub fn is_empty(&self) -> bool { self.registry.borrow().is_empty() }
}
