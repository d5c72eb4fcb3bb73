pub type Token<const N: usize> = [u8; N];
