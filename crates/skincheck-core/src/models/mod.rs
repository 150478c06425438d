//! Data models for SkinCheck

mod diagnosis;
mod photo;
mod promotion;
mod registration;

pub use diagnosis::{
    DiagnosisCategory, DiagnosisRecord, ParseCategoryError, ProductRecord, PRODUCTS_PER_DIAGNOSIS,
};
pub use photo::{CapturedImage, ImageSource};
pub use promotion::{PromotionSubmission, PROMOTION_SUBJECT};
pub use registration::{Gender, RegistrationForm};
