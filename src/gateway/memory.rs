//! In-Process Menu Gateway
//!
//! Serves the menu resource from a [`MenuStore`] without any transport and
//! records every call, so screen behaviour can be asserted call by call.
//! Failures are injected with [`MemoryMenuGateway::fail_next`].

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;

use super::{GatewayError, GatewayResult, MenuGateway};
use crate::menu::types::{CreateMenuRequest, MenuId, MenuNode, UpdateMenuRequest};
use crate::store::{MenuStore, StoreError};

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    List,
    Create(CreateMenuRequest),
    Update { id: MenuId, request: UpdateMenuRequest },
    Delete { id: MenuId },
}

/// Menu gateway backed by an in-memory store
#[derive(Debug, Default)]
pub struct MemoryMenuGateway {
    store: RefCell<MenuStore>,
    calls: RefCell<Vec<GatewayCall>>,
    failures: RefCell<VecDeque<GatewayError>>,
}

impl MemoryMenuGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: MenuStore) -> Self {
        Self {
            store: RefCell::new(store),
            ..Default::default()
        }
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Make the next call fail with `error` (queued, one per call)
    pub fn fail_next(&self, error: GatewayError) {
        self.failures.borrow_mut().push_back(error);
    }

    /// Snapshot of the backing store
    pub fn store(&self) -> MenuStore {
        self.store.borrow().clone()
    }

    fn record(&self, call: GatewayCall) -> GatewayResult<()> {
        self.calls.borrow_mut().push(call);
        match self.failures.borrow_mut().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl From<StoreError> for GatewayError {
    fn from(e: StoreError) -> Self {
        let status = match e {
            StoreError::NotFound(_) => 404,
            StoreError::DuplicateId(_) => 409,
            StoreError::UnknownParent(_) | StoreError::Cycle { .. } | StoreError::Validation(_) => 400,
        };
        GatewayError::Server {
            status,
            message: e.to_string(),
        }
    }
}

#[async_trait(?Send)]
impl MenuGateway for MemoryMenuGateway {
    async fn list(&self, _force_refresh: bool) -> GatewayResult<Vec<MenuNode>> {
        self.record(GatewayCall::List)?;
        Ok(self.store.borrow().list())
    }

    async fn create(&self, request: &CreateMenuRequest) -> GatewayResult<MenuNode> {
        self.record(GatewayCall::Create(request.clone()))?;
        Ok(self.store.borrow_mut().create(request)?)
    }

    async fn update(&self, id: &str, request: &UpdateMenuRequest) -> GatewayResult<MenuNode> {
        self.record(GatewayCall::Update {
            id: id.to_string(),
            request: request.clone(),
        })?;
        Ok(self.store.borrow_mut().update(id, request)?)
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        self.record(GatewayCall::Delete { id: id.to_string() })?;
        Ok(self.store.borrow_mut().delete(id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let gateway = MemoryMenuGateway::with_store(MenuStore::seeded_demo());
        gateway.list(false).await.unwrap();
        gateway.delete("1").await.unwrap();

        assert_eq!(
            gateway.calls(),
            vec![GatewayCall::List, GatewayCall::Delete { id: "1".to_string() }]
        );
        assert!(gateway.store().get("1").is_none());
    }

    #[tokio::test]
    async fn test_injected_failure_applies_once() {
        let gateway = MemoryMenuGateway::with_store(MenuStore::seeded_demo());
        gateway.fail_next(GatewayError::Transport("down".to_string()));

        assert!(gateway.list(true).await.unwrap_err().is_transport());
        assert_eq!(gateway.list(true).await.unwrap().len(), 4);
        assert_eq!(gateway.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_store_errors_become_rejections() {
        let gateway = MemoryMenuGateway::new();
        let err = gateway.delete("nope").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.is_rejection());
    }
}
