use thiserror::Error;

use crate::host::NodeKind;

#[derive(Error, Debug)]
pub enum IrisError {
    #[error("The host must be an element node, got {0:?}")]
    InvalidHost(NodeKind),
}

pub type Result<T> = std::result::Result<T, IrisError>;
