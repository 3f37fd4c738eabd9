//! Backend bridge: command queue and the worker that talks to the chess backend.

pub mod commands;
pub mod runtime;
