//! One component per screen.

mod analysis;
mod home;
mod promote;
mod register;
mod sign_in;

pub use analysis::AnalysisView;
pub use home::HomeView;
pub use promote::PromotionView;
pub use register::RegistrationView;
pub use sign_in::SignInView;
