//! Testing utilities and harness for Folio-RS

pub mod testing;

pub use testing::*;

pub mod prelude {
    pub use crate::testing::*;
}
