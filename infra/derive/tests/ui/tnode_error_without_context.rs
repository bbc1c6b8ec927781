use std::borrow::Cow;
use tnode_derive::tnode_error;

#[tnode_error]
pub enum RegistryError {
    #[error("Duplicate unit: {message}")]
    DuplicateUnit { message: Cow<'static, str> },
}

fn main() {
    let err = RegistryError::DuplicateUnit { message: "TestToken".into() };
    assert_eq!(err.to_string(), "Duplicate unit: TestToken");
}
