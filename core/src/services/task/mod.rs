//! Task service: owner-scoped CRUD with input checks

mod service;


pub use service::TaskService;
