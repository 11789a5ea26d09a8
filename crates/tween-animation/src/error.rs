#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TweenError {
    NonFiniteEndpoint { endpoint: &'static str },
}

impl std::fmt::Display for TweenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TweenError::NonFiniteEndpoint { endpoint } => {
                write!(f, "tween endpoint `{endpoint}` is not a finite value")
            }
        }
    }
}

impl std::error::Error for TweenError {}
