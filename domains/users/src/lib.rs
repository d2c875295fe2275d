//! Users domain: token login and current-principal introspection

pub mod api;

pub use api::routes;
pub use api::UsersState;
