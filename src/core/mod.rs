// Domain-layer modules and shared errors/models
pub mod temperature {
    pub use crate::temperature::*;
}

pub mod converter {
    pub use crate::converter::*;
}

pub mod validation {
    pub use crate::validation::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod errors {
    pub use crate::errors::*;
}
