mod dec;
pub use dec::decrypt;

mod enc;
pub use enc::encrypt;

pub use cipher::block_padding::UnpadError;
pub use cipher::inout::PadError;
