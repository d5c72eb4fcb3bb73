pub mod cbc;
pub mod hash;

mod token;
pub use token::Token;
