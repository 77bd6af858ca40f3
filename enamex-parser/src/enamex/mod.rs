//! Main module for enamex library functionality

pub mod assembling;
pub mod ast;
pub mod error;
pub mod formats;
pub mod labels;
pub mod layout;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod spacing;
pub mod token;
