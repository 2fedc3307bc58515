//! Schemas shared by the tests.

pub mod starwars;
