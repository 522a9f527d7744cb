//! Bilingual portfolio site: a headless view-model ([`view::Site`]) over an
//! arena document, and the actix-web service that renders it per request.

pub mod contact;
pub mod core;
pub mod dom;
pub mod error;
pub mod i18n;
pub mod server;
pub mod view;
