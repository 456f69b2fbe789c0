//! [`Resource`](crate::resource::Resource) implementations, one per entity

mod billing;
mod general;
mod inventory;
mod security;
