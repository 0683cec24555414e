mod automation;
mod calculator;
mod classification;
mod costs;
pub mod domain;
pub mod validation;

pub use automation::resolve;
pub use calculator::RoiCalculator;
pub use classification::{classify, ClassificationThresholds};
pub use costs::{CostEstimate, WorkloadEstimate};
pub use domain::{
    AdditionalBenefits, AutomationMetrics, CalculationRecord, ExtendedRoi, HorizonRoi,
    ProcessClassification, ProcessComplexity, ProcessProfile, RoiInput, RoiResult, ROI_HORIZONS,
};
pub use validation::{ProcessForm, ProcessSubmission, ValidationError};
