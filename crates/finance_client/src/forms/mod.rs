//! Modal forms for creating, editing and deleting resources.
//!
//! A [`Modal`] owns the transient field values. Submitting validates
//! locally, issues exactly one REST mutation and either closes (the caller
//! then reloads its list) or stays open with an inline error.
mod auth;
mod category;
mod delete;
mod picker;
mod transaction;
mod wallet;

pub use auth::{LoginForm, RegisterForm};
pub use category::CategoryForm;
pub use delete::{DELETE_FAILED, DeleteConfirmation, DeleteError};
pub use picker::{Picker, PickerOption};
pub use transaction::TransactionForm;
pub use wallet::{DEFAULT_CURRENCY, WalletForm};

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::ClientError,
    money::MoneyError,
    resource::{Backend, Resource},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Vui lòng nhập {0}")]
    Required(&'static str),
    #[error(transparent)]
    Amount(#[from] MoneyError),
    #[error("Số tiền phải khác 0")]
    ZeroAmount,
    #[error("Ngày không hợp lệ")]
    InvalidDate,
    #[error("Mật khẩu nhập lại không khớp")]
    PasswordMismatch,
}

/// Field values that validate into a resource draft.
pub trait Form: Clone + fmt::Debug + Send {
    type Resource: Resource;

    const CREATE_FAILED: &'static str;
    const UPDATE_FAILED: &'static str;

    fn validate(&self) -> Result<<Self::Resource as Resource>::Draft, FormError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalMode {
    Add,
    Edit(Uuid),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submitted {
    Saved,
    /// Local validation failed; nothing was sent.
    Invalid,
    /// The backend rejected the mutation.
    Failed,
}

/// A validated mutation, ready to be sent.
#[derive(Clone, Debug)]
pub struct Mutation<R: Resource> {
    pub mode: ModalMode,
    pub draft: R::Draft,
}

impl<R: Resource> Mutation<R> {
    pub async fn send<B: Backend<R>>(&self, backend: &B) -> Result<(), ClientError> {
        match self.mode {
            ModalMode::Add => backend.create(&self.draft).await,
            ModalMode::Edit(id) => backend.update(id, &self.draft).await,
        }
    }
}

#[derive(Debug)]
pub struct Modal<F: Form> {
    mode: ModalMode,
    form: F,
    error: Option<String>,
    open: bool,
    submitting: bool,
}

impl<F: Form> Modal<F> {
    pub fn add(form: F) -> Self {
        Self::open(ModalMode::Add, form)
    }

    pub fn edit(id: Uuid, form: F) -> Self {
        Self::open(ModalMode::Edit(id), form)
    }

    fn open(mode: ModalMode, form: F) -> Self {
        Self {
            mode,
            form,
            error: None,
            open: true,
            submitting: false,
        }
    }

    pub fn mode(&self) -> ModalMode {
        self.mode
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Validates and hands out the mutation to send. `None` when the form
    /// is invalid or a submission is already in flight.
    pub fn prepare(&mut self) -> Option<Mutation<F::Resource>> {
        if self.submitting {
            return None;
        }
        match self.form.validate() {
            Ok(draft) => {
                self.submitting = true;
                self.error = None;
                Some(Mutation {
                    mode: self.mode,
                    draft,
                })
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    /// Records the backend's answer to a prepared mutation.
    pub fn finish(&mut self, result: Result<(), ClientError>) -> Submitted {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.error = None;
                self.open = false;
                Submitted::Saved
            }
            Err(err) => {
                tracing::warn!(path = F::Resource::PATH, "mutation failed: {err}");
                let message = match self.mode {
                    ModalMode::Add => F::CREATE_FAILED,
                    ModalMode::Edit(_) => F::UPDATE_FAILED,
                };
                self.error = Some(message.to_string());
                Submitted::Failed
            }
        }
    }

    pub async fn submit<B: Backend<F::Resource>>(&mut self, backend: &B) -> Submitted {
        let Some(mutation) = self.prepare() else {
            return Submitted::Invalid;
        };
        let result = mutation.send(backend).await;
        self.finish(result)
    }
}
