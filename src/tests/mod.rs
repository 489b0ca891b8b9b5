pub mod util;

#[cfg(test)]
mod assembler;
