use std::marker::PhantomData;

use thiserror::Error;
use uuid::Uuid;

use crate::{
    error::ClientError,
    resource::{Backend, Resource},
};

pub const DELETE_FAILED: &str = "Xoá thất bại.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeleteError {
    #[error("Vui lòng xác nhận trước khi xoá")]
    NotConfirmed,
    #[error("Xoá thất bại.")]
    Failed,
}

/// Two-step delete: nothing is sent until the box is ticked.
#[derive(Debug)]
pub struct DeleteConfirmation<R: Resource> {
    id: Uuid,
    label: String,
    confirmed: bool,
    error: Option<&'static str>,
    _resource: PhantomData<R>,
}

impl<R: Resource> DeleteConfirmation<R> {
    pub fn new(item: &R::Item) -> Self {
        Self {
            id: R::id(item),
            label: R::label(item),
            confirmed: false,
            error: None,
            _resource: PhantomData,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn prompt(&self) -> String {
        format!("Bạn có chắc chắn muốn xoá \"{}\"?", self.label)
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn toggle(&mut self) {
        self.confirmed = !self.confirmed;
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// The id to delete, once confirmed.
    pub fn prepare(&mut self) -> Result<Uuid, DeleteError> {
        if !self.confirmed {
            return Err(DeleteError::NotConfirmed);
        }
        Ok(self.id)
    }

    pub fn finish(&mut self, result: Result<(), ClientError>) -> Result<(), DeleteError> {
        match result {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(path = R::PATH, id = %self.id, "delete failed: {err}");
                self.error = Some(DELETE_FAILED);
                Err(DeleteError::Failed)
            }
        }
    }

    pub async fn submit<B: Backend<R>>(&mut self, backend: &B) -> Result<(), DeleteError> {
        let id = self.prepare()?;
        let result = backend.delete(id).await;
        self.finish(result)
    }
}
