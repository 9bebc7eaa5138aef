pub mod assign;
pub mod binary;
pub mod logical;
pub mod unary;

// Everything here extends `Generator` through `impl` blocks
