use std::collections::BTreeMap;

use tracing::debug;

use crate::form::ProductForm;
use crate::models::Product;
use crate::notify::Notification;
use crate::store::CatalogStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Creating,
    Editing(i64),
}

/// Form controller: one form's field state plus the Creating/Editing mode
/// and the last rejection's field errors.
pub struct FormSession {
    form: ProductForm,
    mode: Mode,
    errors: BTreeMap<String, String>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        FormSession {
            form: ProductForm::default(),
            mode: Mode::Creating,
            errors: BTreeMap::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Loads a record into the form and switches to Editing.
    pub fn begin_edit(&mut self, product: &Product) {
        debug!("Editing product {}", product.id);
        self.form = ProductForm::from_product(product);
        self.mode = Mode::Editing(product.id);
        self.errors.clear();
    }

    /// Back to Creating with a blank form, nothing written.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Validates the form and applies it to the store. A rejected submission
    /// changes neither the mode nor the store; the field errors stay on the
    /// session for inline display.
    pub fn submit(&mut self, store: &mut CatalogStore) -> Notification {
        let errors = self.form.field_errors();
        if !errors.is_empty() {
            self.errors = errors;
            return Notification::danger("Please review the form input.");
        }

        let Some(fields) = self.form.parsed() else {
            return Notification::danger("Please review the form input.");
        };

        let notice = match self.mode {
            Mode::Creating => {
                store.insert(fields);
                Notification::success("Product added.")
            }
            Mode::Editing(id) => {
                store.update(id, fields);
                Notification::success("Product updated.")
            }
        };
        self.reset();
        notice
    }

    /// Confirmed removal. Absent ids leave everything untouched; removing
    /// the record currently being edited drops the session back to Creating.
    pub fn delete(&mut self, store: &mut CatalogStore, id: i64) -> Option<Notification> {
        if !store.remove(id) {
            return None;
        }
        if self.mode == Mode::Editing(id) {
            self.reset();
        }
        Some(Notification::success("Product deleted."))
    }

    fn reset(&mut self) {
        self.form = ProductForm::default();
        self.mode = Mode::Creating;
        self.errors.clear();
    }
}
