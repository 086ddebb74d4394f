//! domain-catcher check-credentials command

use clap::Args;
use console::style;
use gateway::{GatewayConfig, RegistrarGateway, Session, SessionToken, TransipGateway};
use shared::{AuthError, CatcherConfig, ENV_ACCESS_TOKEN};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Default, Args)]
pub struct CheckCredentialsCommand {
    /// Registrar API base URL
    #[arg(long)]
    pub api_url: Option<String>,
}

impl CheckCredentialsCommand {
    pub async fn run(&self) -> anyhow::Result<ExitCode> {
        let mut config = CatcherConfig::from_env()?;
        if let Some(url) = &self.api_url {
            config.api_url = url.trim_end_matches('/').to_string();
        }

        let session = Arc::new(Session::new(config.access_token.clone()));
        let gateway = TransipGateway::new(session.clone(), GatewayConfig::from(&config))?;

        println!("Testing TransIP API credentials...");
        println!("Step 1: Authenticating with TransIP API using access token...");
        if let Err(e) = gateway.authenticate().await {
            report_failure(&e, session.credential());
            return Ok(ExitCode::FAILURE);
        }
        println!("{}", style("✅ Authentication successful!").green());

        println!();
        println!("Step 2: Testing API access with the api-test endpoint...");
        match gateway.api_test().await {
            Ok(200) => {
                println!("{}", style("✅ API access successful!").green());
                println!();
                println!("Your TransIP credentials are working correctly.");
                Ok(ExitCode::SUCCESS)
            }
            Ok(status) => {
                println!("{}", style(format!("❌ API access failed with status: {}", status)).red());
                Ok(ExitCode::FAILURE)
            }
            Err(e) => {
                report_failure(&e, session.credential());
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn report_failure(error: &AuthError, credential: Option<&SessionToken>) {
    eprintln!("{}", style("❌ Credential test failed:").red());

    match error {
        AuthError::Rejected { status, body } => {
            eprintln!("Status: {}", status);
            eprintln!("Response: {}", body);
            if *status == 401 {
                eprintln!();
                eprintln!("Authentication failed. Please check your access token in the .env file:");
                eprintln!("Make sure {} is correct and active", ENV_ACCESS_TOKEN);
            }
        }
        AuthError::Transport(_) => {
            eprintln!("No response received from the API. Check your internet connection.");
        }
        AuthError::MissingCredential => eprintln!("Error: {}", error),
    }

    eprintln!();
    eprintln!("Please check your .env file configuration:");
    for line in credential_hint(credential) {
        eprintln!("{}", line);
    }
}

/// Describe the configured token without revealing it
pub fn credential_hint(credential: Option<&SessionToken>) -> Vec<String> {
    match credential {
        None => vec![format!("{}=not set", ENV_ACCESS_TOKEN)],
        Some(token) if !token.looks_like_jwt() => vec![
            format!("{}=*****", ENV_ACCESS_TOKEN),
            String::new(),
            "Warning: Your access token does not look like a JWT token (should start with \"eyJ\")".to_string(),
            "The proper format looks like: eyJ0eXAiOiJKV1QiLCJhbGciOiJSUzI1...".to_string(),
            "Make sure you have copied the FULL token without any extra spaces or quotes.".to_string(),
        ],
        Some(token) => vec![format!(
            "{}={} (Access token found with JWT format)",
            ENV_ACCESS_TOKEN,
            token.masked()
        )],
    }
}
