#[tnode_derive::tnode_error]
pub enum LedgerError {
    #[error("Ledger rejected: {message}")]
    Rejected { message: String, context: String },
}

fn main() {}
