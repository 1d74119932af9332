//! Typed operation bundle: the adapter functions of one entity, registered
//! explicitly instead of being looked up by name at call time.

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::entity::{Operation, Resource};

pub type OpFuture<T> = Pin<Box<dyn Future<Output = Result<T, String>>>>;

pub type ListFn = Arc<dyn Fn(String) -> OpFuture<Value> + Send + Sync>;
pub type GetFn = Arc<dyn Fn(String, String) -> OpFuture<Value> + Send + Sync>;
pub type CreateFn<D> = Arc<dyn Fn(D, String) -> OpFuture<Value> + Send + Sync>;
pub type UpdateFn<D> = Arc<dyn Fn(String, D, String) -> OpFuture<Value> + Send + Sync>;
pub type DeleteFn = Arc<dyn Fn(String, String) -> OpFuture<()> + Send + Sync>;

/// Adapter functions of one entity. Argument order is fixed:
/// list(token), get(id, token), create(data, token),
/// update(id, data, token), delete(id, token).
pub struct OperationBundle<T: Resource> {
    pub(crate) list: Option<ListFn>,
    pub(crate) get: Option<GetFn>,
    pub(crate) create: Option<CreateFn<T::Draft>>,
    pub(crate) update: Option<UpdateFn<T::Draft>>,
    pub(crate) delete: Option<DeleteFn>,
}

impl<T: Resource> Default for OperationBundle<T> {
    fn default() -> Self {
        Self {
            list: None,
            get: None,
            create: None,
            update: None,
            delete: None,
        }
    }
}

impl<T: Resource> OperationBundle<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, String>> + 'static,
    {
        self.list = Some(Arc::new(move |token| Box::pin(f(token))));
        self
    }

    pub fn get<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, String>> + 'static,
    {
        self.get = Some(Arc::new(move |id, token| Box::pin(f(id, token))));
        self
    }

    pub fn create<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(T::Draft, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, String>> + 'static,
    {
        self.create = Some(Arc::new(move |data, token| Box::pin(f(data, token))));
        self
    }

    pub fn update<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(String, T::Draft, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, String>> + 'static,
    {
        self.update = Some(Arc::new(move |id, data, token| {
            Box::pin(f(id, data, token))
        }));
        self
    }

    pub fn delete<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(String, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), String>> + 'static,
    {
        self.delete = Some(Arc::new(move |id, token| Box::pin(f(id, token))));
        self
    }

    pub fn provides(&self, op: Operation) -> bool {
        match op {
            Operation::List => self.list.is_some(),
            Operation::Get => self.get.is_some(),
            Operation::Create => self.create.is_some(),
            Operation::Update => self.update.is_some(),
            Operation::Delete => self.delete.is_some(),
        }
    }

    pub fn missing(&self) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| !self.provides(*op))
            .collect()
    }
}
