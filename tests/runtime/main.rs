//! Integration tests for Layer 3: Runtime
//!
//! Tests for the command dispatcher end to end: validation order, both
//! surface syntaxes, update typing, and persistence across sessions.

mod commands;
