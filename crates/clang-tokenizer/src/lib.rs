//! Semantic highlighting tokens for C++ sources.
//!
//! A file is parsed by Clang (driven as a subprocess that dumps its AST as
//! JSON), the cursors located in that file are collected in document order
//! and each one is classified into a [`TokenCategory`].

pub mod ast;
pub mod config;
pub mod error;
pub mod frontend;
pub mod semantic_tokens;
pub mod tokenizer;
pub mod tokens;

mod text_pos;

pub use ast::{ChildVisit, Cursor, CursorKind, TranslationUnit};
pub use config::TokenizerSettings;
pub use error::TokenizeError;
pub use tokenizer::Tokenizer;
pub use tokens::{Token, TokenCategory, TokenRecord, collect_tokens};
