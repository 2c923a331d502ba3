pub mod facility;
pub mod mooring;
pub mod quay;
pub mod survey;
pub mod typhoon;

pub use facility::{FacilityGroup, FacilityShape};
pub use mooring::{Alongside, MooringRecord, MooringStatus};
pub use quay::{QuayGeometry, QuayOrigin};
pub use survey::SurveyPoint;
pub use typhoon::TyphoonInfo;
