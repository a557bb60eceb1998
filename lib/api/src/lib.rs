//! # wordspace API
//!
//! REST surface for the exploration engines. Handlers only parse requests,
//! apply defaults and shape errors; all computation lives in
//! `wordspace-explore`.

pub mod rest;

pub use rest::RestApi;
