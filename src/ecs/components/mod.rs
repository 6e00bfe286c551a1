pub mod capture;
pub mod cellar;
pub mod marker;
pub mod satellite;
pub mod territory;

pub use capture::{CaptureDirection, CaptureState, Contest, move_toward};
pub use cellar::{Cellar, claim_horizon, round_random};
pub use marker::Marker;
pub use satellite::Satellite;
pub use territory::{Territory, UnclaimCause};
