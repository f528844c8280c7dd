//! tquery compiler: turns a selection into single-pass matching rules.
//!
//! This crate provides:
//! - `compile` - rule construction, axis transposition, and verification
//!
//! The output is a linked [`tquery_rules::RuleSet`] ready for the interpreter.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compile;

pub use compile::{CompileCtx, CompileError, CompileResult, Compiler, verify};
