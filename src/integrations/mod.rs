//! External service integrations.

pub mod services {
    pub use crate::services::*;
}

pub mod cep_client {
    pub use crate::cep_client::*;
}

pub mod weather_client {
    pub use crate::weather_client::*;
}
