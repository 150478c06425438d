use std::cell::Cell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;
use pretty_assertions::assert_eq;
use skincheck_core::auth::{AuthError, AuthResult, AuthSession, AuthUser};
use skincheck_core::catalog::lookup;
use skincheck_core::flow::{PhotoSource, Screen, ScreenController, SubmissionStatus};
use skincheck_core::mail::OutboxComposer;
use skincheck_core::models::Gender;
use skincheck_core::{
    DiagnosisCategory, FederatedCredential, FixedOutcome, IdentityProvider, ImageSource,
};

use crate::cli::{AuthCommands, Cli, Commands, CompletionShell, ConfigCommands, GenderArg, PromoteArgs};
use crate::commands::analyze::run_analysis;
use crate::commands::auth_cmd::{check_verified, registration_flow, RegistrationInput};
use crate::commands::common::{diagnosis_item, format_product_lines, format_result_lines};
use crate::commands::completions::render_completions;
use crate::commands::config::{apply_profile_update, mask_key, ConfigSummary};
use crate::commands::promote::{promotion_screen, status_message};
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;
use crate::photo::FilePhotoSource;

const JPEG_MAGIC: [u8; 6] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

struct FakeIdentity {
    failure: Option<&'static str>,
    verified: bool,
    sign_ins: Cell<usize>,
}

impl FakeIdentity {
    const fn ok(verified: bool) -> Self {
        Self {
            failure: None,
            verified,
            sign_ins: Cell::new(0),
        }
    }

    const fn failing(message: &'static str) -> Self {
        Self {
            failure: Some(message),
            verified: false,
            sign_ins: Cell::new(0),
        }
    }

    fn session(email: &str) -> AuthSession {
        AuthSession {
            id_token: "id".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: i64::MAX,
            user: AuthUser {
                id: "uid".to_string(),
                email: Some(email.to_string()),
                email_verified: false,
            },
        }
    }

    fn check(&self) -> AuthResult<()> {
        self.failure
            .map_or(Ok(()), |message| Err(AuthError::Api(message.to_string())))
    }
}

impl IdentityProvider for FakeIdentity {
    async fn sign_in(&self, email: &str, _password: &str) -> AuthResult<AuthSession> {
        self.sign_ins.set(self.sign_ins.get() + 1);
        self.check()?;
        Ok(Self::session(email))
    }

    async fn register(&self, email: &str, _password: &str) -> AuthResult<AuthSession> {
        self.check()?;
        Ok(Self::session(email))
    }

    async fn send_verification_email(&self, _session: &AuthSession) -> AuthResult<()> {
        self.check()
    }

    async fn reload_and_check_verified(&self, _session: &AuthSession) -> AuthResult<bool> {
        self.check()?;
        Ok(self.verified)
    }

    async fn send_password_reset(&self, _email: &str) -> AuthResult<()> {
        self.check()
    }

    async fn federated_sign_in(&self, _credential: &FederatedCredential) -> AuthResult<AuthSession> {
        self.check()?;
        Ok(Self::session("google@example.com"))
    }
}

fn write_photo(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn promote_args(email: &str) -> PromoteArgs {
    PromoteArgs {
        email: email.to_string(),
        name: "Serum".to_string(),
        content: "Hydrating".to_string(),
        functionality: "Moisturizes".to_string(),
        image: None,
        outbox: None,
    }
}

#[test]
fn analyze_arguments_parse() {
    let cli = Cli::try_parse_from([
        "skincheck",
        "analyze",
        "--image",
        "face.jpg",
        "--email",
        "user@example.com",
        "--password",
        "secret",
        "--seed",
        "7",
        "--json",
    ])
    .unwrap();

    let Commands::Analyze(args) = cli.command else {
        panic!("expected analyze command");
    };
    assert_eq!(args.image, PathBuf::from("face.jpg"));
    assert_eq!(args.seed, Some(7));
    assert!(args.json);
}

#[test]
fn catalog_category_accepts_dashes_and_rejects_unknown() {
    let cli = Cli::try_parse_from(["skincheck", "catalog", "oily-skin"]).unwrap();
    let Commands::Catalog { category, json } = cli.command else {
        panic!("expected catalog command");
    };
    assert_eq!(category, Some(DiagnosisCategory::OilySkin));
    assert!(!json);

    assert!(Cli::try_parse_from(["skincheck", "catalog", "freckles"]).is_err());
}

#[test]
fn config_init_splits_recipients() {
    let cli = Cli::try_parse_from([
        "skincheck",
        "--profile",
        "work",
        "config",
        "init",
        "--recipients",
        "a@example.com,b@example.com",
    ])
    .unwrap();

    assert_eq!(cli.profile.as_deref(), Some("work"));
    let Commands::Config {
        command: ConfigCommands::Init { recipients, .. },
    } = cli.command
    else {
        panic!("expected config init");
    };
    assert_eq!(
        recipients,
        vec!["a@example.com".to_string(), "b@example.com".to_string()]
    );
}

#[test]
fn register_parses_gender_and_birth_date() {
    let cli = Cli::try_parse_from([
        "skincheck",
        "auth",
        "register",
        "--first-name",
        "Ada",
        "--last-name",
        "Lovelace",
        "--gender",
        "female",
        "--birth-date",
        "1990-12-10",
        "--email",
        "ada@example.com",
        "--password",
        "secret",
    ])
    .unwrap();

    let Commands::Auth {
        command:
            AuthCommands::Register {
                gender, birth_date, ..
            },
    } = cli.command
    else {
        panic!("expected auth register");
    };
    assert_eq!(gender, GenderArg::Female);
    assert_eq!(birth_date, NaiveDate::from_ymd_opt(1990, 12, 10));
}

#[test]
fn result_lines_list_products_in_order() {
    let record = lookup(DiagnosisCategory::Dryness);
    let lines = format_result_lines(record);
    assert_eq!(lines[0], record.title);
    assert_eq!(lines[1], format!("Symptoms: {}", record.symptoms));
    assert_eq!(lines.len(), 3 + record.products.len());
    assert_eq!(lines[3], format!("- {}", record.products[0].name));

    let product_lines = format_product_lines(record);
    assert_eq!(product_lines.len(), 4);
    assert!(product_lines[0].starts_with("1. "));
    assert!(product_lines[0].contains(record.products[0].purchase_url));
}

#[test]
fn diagnosis_json_uses_category_slug() {
    let item = diagnosis_item(
        DiagnosisCategory::LinesWrinkles,
        lookup(DiagnosisCategory::LinesWrinkles),
    );
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["category"], "lines_wrinkles");
    assert_eq!(json["products"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn file_photo_source_reads_library_and_cancels_camera() {
    let dir = tempfile::tempdir().unwrap();
    let source = FilePhotoSource::new(write_photo(&dir, "face.jpg", &JPEG_MAGIC));

    let image = source.capture(ImageSource::Library).await.unwrap();
    assert_eq!(image.mime_type(), "image/jpeg");
    assert_eq!(image.len(), JPEG_MAGIC.len());

    assert!(source.capture(ImageSource::Camera).await.is_none());
    assert!(FilePhotoSource::new(dir.path().join("missing.jpg"))
        .capture(ImageSource::Library)
        .await
        .is_none());
}

#[tokio::test]
async fn analysis_run_reaches_the_fixed_result() {
    let dir = tempfile::tempdir().unwrap();
    let photos = FilePhotoSource::new(write_photo(&dir, "face.jpg", &JPEG_MAGIC));
    let identity = FakeIdentity::ok(true);
    let mut controller = ScreenController::with_delay(
        FixedOutcome(DiagnosisCategory::Dryness),
        Duration::from_millis(10),
    );

    let category = run_analysis(&mut controller, &identity, &photos, "user@example.com", "pw")
        .await
        .unwrap();
    assert_eq!(category, DiagnosisCategory::Dryness);
    assert_eq!(controller.screen(), Screen::ResultShown);

    let record = controller.browse_products().unwrap();
    assert_eq!(record.products, lookup(DiagnosisCategory::Dryness).products);
}

#[tokio::test]
async fn analysis_without_a_photo_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let photos = FilePhotoSource::new(write_photo(&dir, "empty.jpg", &[]));
    let mut controller = ScreenController::with_delay(
        FixedOutcome(DiagnosisCategory::Dryness),
        Duration::from_millis(10),
    );

    let error = run_analysis(
        &mut controller,
        &FakeIdentity::ok(true),
        &photos,
        "user@example.com",
        "pw",
    )
    .await
    .unwrap_err();
    assert_eq!(error.to_string(), "Please upload a photo first to analyze.");
    assert_eq!(controller.screen(), Screen::CaptureReady);
}

#[tokio::test]
async fn analysis_sign_in_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let photos = FilePhotoSource::new(write_photo(&dir, "face.jpg", &JPEG_MAGIC));
    let identity = FakeIdentity::failing("The password is invalid or the user does not have a password.");
    let mut controller = ScreenController::new(FixedOutcome(DiagnosisCategory::Dryness));

    let error = run_analysis(&mut controller, &identity, &photos, "user@example.com", "bad")
        .await
        .unwrap_err();
    assert!(matches!(error, CliError::Flow(_)));
    assert_eq!(
        error.to_string(),
        "The password is invalid or the user does not have a password."
    );
    assert_eq!(controller.screen(), Screen::Unauthenticated);
}

#[tokio::test]
async fn verify_signs_in_then_checks() {
    let verified = FakeIdentity::ok(true);
    assert!(check_verified(&verified, "user@example.com", "pw").await.unwrap());
    assert_eq!(verified.sign_ins.get(), 1);

    let pending = FakeIdentity::ok(false);
    assert!(!check_verified(&pending, "user@example.com", "pw").await.unwrap());
}

#[test]
fn registration_input_fills_the_form() {
    let flow = registration_flow(RegistrationInput {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        gender: GenderArg::Other,
        birth_date: NaiveDate::from_ymd_opt(1990, 12, 10),
        email: "ada@example.com".to_string(),
        password: "secret".to_string(),
    });
    assert_eq!(flow.form.gender, Gender::Other);
    assert_eq!(flow.form.birth_date, NaiveDate::from_ymd_opt(1990, 12, 10).unwrap());
    assert!(flow.form.validate().is_ok());
}

#[tokio::test]
async fn promotion_is_written_to_the_outbox() {
    let dir = tempfile::tempdir().unwrap();
    let outbox = dir.path().join("outbox");
    let mut screen = promotion_screen(
        &promote_args("user@example.com"),
        vec!["team@example.com".to_string()],
    );

    let status = screen
        .submit(&OutboxComposer::new(&outbox))
        .await
        .unwrap()
        .clone();
    assert_eq!(status, SubmissionStatus::Sent);
    assert_eq!(
        status_message(&status, &outbox),
        format!("Product submission queued in {}", outbox.display())
    );

    let files: Vec<_> = std::fs::read_dir(&outbox).unwrap().collect();
    assert_eq!(files.len(), 1);
    let message = std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
    assert!(message.contains("Subject: New Product Submission\r\n"));
    assert!(message.contains("Product Functionality: Moisturizes\r\n"));
}

#[tokio::test]
async fn invalid_promotion_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let outbox = dir.path().join("outbox");
    let mut screen = promotion_screen(&promote_args("not-an-email"), vec![]);

    let error = screen
        .submit(&OutboxComposer::new(&outbox))
        .await
        .unwrap_err();
    assert_eq!(error.to_string(), "Invalid email format.");
    assert!(!outbox.exists());
}

#[test]
fn profile_update_merges_and_activates() {
    let mut config = CliProfilesConfig {
        version: 1,
        active_profile: None,
        profiles: BTreeMap::new(),
    };
    apply_profile_update(
        &mut config,
        "work",
        CliProfile {
            firebase_api_key: Some("AIza-first".to_string()),
            outbox_dir: Some("mail".to_string()),
            ..CliProfile::default()
        },
        true,
    )
    .unwrap();
    apply_profile_update(
        &mut config,
        "work",
        CliProfile {
            promotion_recipients: vec!["team@example.com".to_string()],
            ..CliProfile::default()
        },
        false,
    )
    .unwrap();

    assert_eq!(config.active_profile.as_deref(), Some("work"));
    let profile = config.profile("work").unwrap();
    assert_eq!(profile.firebase_api_key.as_deref(), Some("AIza-first"));
    assert_eq!(profile.outbox_dir.as_deref(), Some("mail"));
    assert_eq!(
        profile.promotion_recipients,
        vec!["team@example.com".to_string()]
    );
}

#[test]
fn profile_update_rejects_bad_recipient() {
    let mut config = CliProfilesConfig::default();
    let result = apply_profile_update(
        &mut config,
        "default",
        CliProfile {
            promotion_recipients: vec!["nobody".to_string()],
            ..CliProfile::default()
        },
        true,
    );
    assert!(matches!(result, Err(CliError::Core(_))));
    assert_eq!(config.active_profile, None);
}

#[test]
fn config_summary_masks_the_api_key() {
    assert_eq!(mask_key("AIzaSyExample"), "AIza****");
    assert_eq!(mask_key("abc"), "****");

    let profile = CliProfile {
        firebase_api_key: Some("AIzaSyExample".to_string()),
        ..CliProfile::default()
    };
    let summary = ConfigSummary::new("default", &profile.to_app_config()).unwrap();
    let lines = summary.lines();
    assert_eq!(lines[0], "profile: default");
    assert_eq!(lines[1], "firebase_api_key: AIza****");
    assert!(!lines.join("\n").contains("SyExample"));
}

#[test]
fn completions_mention_the_binary() {
    for shell in [CompletionShell::Bash, CompletionShell::Zsh, CompletionShell::Fish] {
        let script = String::from_utf8(render_completions(shell)).unwrap();
        assert!(script.contains("skincheck"));
    }
}
