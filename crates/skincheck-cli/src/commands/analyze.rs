use skincheck_core::flow::{AnalysisStart, PhotoSource, ScreenController};
use skincheck_core::{
    DiagnosisCategory, IdentityProvider, ImageSource, OutcomeSource, RandomOutcome,
};

use crate::auth::require_identity_client;
use crate::cli::AnalyzeArgs;
use crate::commands::common::{
    diagnosis_item, format_product_lines, format_result_lines, load_app_config, print_json,
};
use crate::error::CliError;
use crate::photo::FilePhotoSource;

pub async fn run_analyze(args: AnalyzeArgs, profile: Option<&str>) -> Result<(), CliError> {
    if !args.image.is_file() {
        return Err(CliError::ImageNotFound(args.image.display().to_string()));
    }

    let (_, config) = load_app_config(profile)?;
    let identity = require_identity_client(&config)?;
    let outcome = match args.seed {
        Some(seed) => RandomOutcome::seeded(seed),
        None => RandomOutcome::from_os_rng(),
    };
    let mut controller = ScreenController::new(outcome);
    let photos = FilePhotoSource::new(&args.image);

    if !args.json {
        eprintln!("Analyzing your picture...");
    }
    let category =
        run_analysis(&mut controller, &identity, &photos, &args.email, &args.password).await?;

    let record = controller.browse_products()?;
    if args.json {
        return print_json(&diagnosis_item(category, record));
    }

    for line in format_result_lines(record) {
        println!("{line}");
    }
    println!();
    println!("Recommended Products");
    for line in format_product_lines(record) {
        println!("{line}");
    }
    Ok(())
}

/// Sign in, capture from the library, analyse and wait for the result.
///
/// Leaves the controller on the result screen.
pub async fn run_analysis<O, I, P>(
    controller: &mut ScreenController<O>,
    identity: &I,
    photos: &P,
    email: &str,
    password: &str,
) -> Result<DiagnosisCategory, CliError>
where
    O: OutcomeSource,
    I: IdentityProvider,
    P: PhotoSource,
{
    controller.sign_in(identity, email, password).await?;
    controller.open_analysis()?;
    controller.capture(photos, ImageSource::Library).await?;

    match controller.analyze()? {
        AnalysisStart::Scheduled(run) => {
            tracing::debug!("Waiting for analysis run {}", run.get());
            Ok(controller.wait_for_result().await?)
        }
        AnalysisStart::AlreadyDiagnosed(category) => Ok(category),
    }
}
