pub use biota_core::GenomeLogic;
pub mod config {
    pub use biota_core::config::*;
}
pub mod error {
    pub use biota_core::error::*;
}
pub mod food_web {
    pub use biota_core::food_web::*;
}
pub mod genome {
    pub use biota_core::genome::*;
}
pub mod metrics {
    pub use biota_core::metrics::*;
}
pub mod notify {
    pub use biota_core::notify::*;
}
pub mod population {
    pub use biota_core::population::*;
}
pub mod systems {
    pub use biota_core::systems::*;
}
pub mod trophic {
    pub use biota_core::trophic::*;
}
pub mod world;
