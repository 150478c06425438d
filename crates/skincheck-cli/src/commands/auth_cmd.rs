use chrono::NaiveDate;
use skincheck_core::flow::{
    request_password_reset, RegistrationFlow, ScreenController, EMAIL_NOT_VERIFIED_MESSAGE,
    EMAIL_VERIFIED_MESSAGE,
};
use skincheck_core::{FederatedCredential, IdentityProvider};

use crate::auth::require_identity_client;
use crate::cli::{AuthCommands, GenderArg};
use crate::commands::common::load_app_config;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    let (profile_name, config) = load_app_config(global_profile)?;
    let identity = require_identity_client(&config)?;

    match command {
        AuthCommands::SignIn { email, password } => {
            let session = identity
                .sign_in(email.trim(), &password)
                .await
                .map_err(|error| CliError::Auth(error.to_string()))?;
            let email_label = session.user.email.as_deref().unwrap_or("(no email)");
            println!("Signed in profile '{profile_name}' as {email_label}");
            if !session.user.email_verified {
                println!("Email address is not verified yet.");
            }
            Ok(())
        }
        AuthCommands::Register {
            first_name,
            last_name,
            gender,
            birth_date,
            email,
            password,
        } => {
            let mut flow = registration_flow(RegistrationInput {
                first_name,
                last_name,
                gender,
                birth_date,
                email,
                password,
            });
            flow.submit(&identity).await?;
            if let Some(message) = flow.status_message() {
                println!("{message}");
            }
            println!("Run `skincheck auth verify` once you have clicked the link.");
            Ok(())
        }
        AuthCommands::Verify { email, password } => {
            let verified = check_verified(&identity, &email, &password).await?;
            if verified {
                println!("{EMAIL_VERIFIED_MESSAGE}");
            } else {
                println!("{EMAIL_NOT_VERIFIED_MESSAGE}");
            }
            Ok(())
        }
        AuthCommands::ResetPassword { email } => {
            let message = request_password_reset(&identity, &email).await?;
            println!("{message}");
            Ok(())
        }
        AuthCommands::Google {
            id_token,
            access_token,
        } => {
            let credential = FederatedCredential::google(id_token, access_token);
            let mut controller = ScreenController::random();
            controller.sign_in_federated(&identity, &credential).await?;
            let email_label = controller
                .session()
                .and_then(|session| session.user.email.as_deref())
                .unwrap_or("(no email)");
            println!("Signed in profile '{profile_name}' with Google as {email_label}");
            Ok(())
        }
    }
}

pub struct RegistrationInput {
    pub first_name: String,
    pub last_name: String,
    pub gender: GenderArg,
    pub birth_date: Option<NaiveDate>,
    pub email: String,
    pub password: String,
}

pub fn registration_flow(input: RegistrationInput) -> RegistrationFlow {
    let mut flow = RegistrationFlow::new();
    flow.form.first_name = input.first_name;
    flow.form.last_name = input.last_name;
    flow.form.gender = input.gender.into();
    if let Some(birth_date) = input.birth_date {
        flow.form.birth_date = birth_date;
    }
    flow.form.email = input.email;
    flow.form.password = input.password;
    flow
}

/// Sign in to obtain a fresh session, then reload the account.
pub async fn check_verified<I: IdentityProvider>(
    identity: &I,
    email: &str,
    password: &str,
) -> Result<bool, CliError> {
    let session = identity
        .sign_in(email.trim(), password)
        .await
        .map_err(|error| CliError::Auth(error.to_string()))?;
    identity
        .reload_and_check_verified(&session)
        .await
        .map_err(|error| CliError::Auth(error.to_string()))
}
