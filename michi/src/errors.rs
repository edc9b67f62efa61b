#[derive(Debug, Eq, PartialEq)]
pub enum PathError {
    MixedRoots { from: String, to: String },
}

impl std::error::Error for PathError {}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PathError::MixedRoots { from, to } => {
                write!(
                    f,
                    "cannot relate an absolute and a relative path: '{}' -> '{}'",
                    from, to
                )
            }
        }
    }
}
