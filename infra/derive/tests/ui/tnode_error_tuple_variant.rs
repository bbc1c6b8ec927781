#[tnode_derive::tnode_error]
pub enum ChainError {
    Transport(String),
}

fn main() {}
